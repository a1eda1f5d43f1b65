//! Writers for a module's facts.
//!
//! Two formats are supported:
//!
//! - **TRAP**: one tuple per line, `table(#1,3,"text")`. Every label is
//!   defined on its own line (`#1=@"key"` or `#1=*`) immediately before the
//!   first tuple that mentions it. String literals double embedded quotes.
//! - **JSON**: an object with the schema version, the label definitions, and
//!   one array per non-empty relation whose rows are keyed by column name.
//!
//! Both writers replay the store in emission order and are deterministic.

use std::io::{self, Write};

use serde_json::{json, Map, Value as Json};

use crate::facts::{FactStore, Table, Value, FACTS_SCHEMA_VERSION};
use crate::label::{Label, LabelDef};

// ============================================================================
// TRAP
// ============================================================================

/// Quote a TRAP string literal.
pub fn trap_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn trap_value(value: &Value) -> String {
    match value {
        Value::Label(label) => label.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Str(s) => trap_quote(s),
    }
}

fn trap_definition(label: Label, def: Option<&LabelDef>) -> String {
    match def.and_then(LabelDef::key) {
        Some(key) => format!("{}=@{}", label, trap_quote(key.as_str())),
        None => format!("{}=*", label),
    }
}

/// Write facts as TRAP.
///
/// `header` lines are written first as `//` comments.
pub fn write_trap<W: Write>(
    out: &mut W,
    header: &[String],
    definitions: &[LabelDef],
    store: &FactStore,
) -> io::Result<()> {
    writeln!(out, "// kclfacts schema version {}", FACTS_SCHEMA_VERSION)?;
    for line in header {
        writeln!(out, "// {}", line)?;
    }
    let mut defined = vec![false; definitions.len()];
    for fact in store.facts() {
        for label in fact.labels() {
            match defined.get_mut(label.index()) {
                Some(seen) if *seen => {}
                Some(seen) => {
                    *seen = true;
                    writeln!(out, "{}", trap_definition(label, definitions.get(label.index())))?;
                }
                // Not allocated by this module's manager; nothing to define.
                None => {}
            }
        }
        let values: Vec<String> = fact.values.iter().map(trap_value).collect();
        writeln!(out, "{}({})", fact.table.name(), values.join(","))?;
    }
    Ok(())
}

/// Render facts as a TRAP string.
pub fn to_trap_string(header: &[String], definitions: &[LabelDef], store: &FactStore) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_trap(&mut buf, header, definitions, store);
    String::from_utf8_lossy(&buf).into_owned()
}

// ============================================================================
// JSON
// ============================================================================

fn json_value(value: &Value) -> Json {
    match value {
        Value::Label(label) => Json::String(label.to_string()),
        Value::Int(n) => Json::from(*n),
        Value::Str(s) => Json::String(s.clone()),
    }
}

/// Render facts as a JSON document.
pub fn to_json(module: &str, definitions: &[LabelDef], store: &FactStore) -> Json {
    let labels: Vec<Json> = definitions
        .iter()
        .enumerate()
        .map(|(i, def)| match def.key() {
            Some(key) => json!({ "label": Label(i as u32).to_string(), "key": key.as_str() }),
            None => json!({ "label": Label(i as u32).to_string() }),
        })
        .collect();

    let mut relations = Map::new();
    for table in Table::ALL {
        let rows: Vec<Json> = store
            .rows(table)
            .map(|fact| {
                let row: Map<String, Json> = table
                    .columns()
                    .iter()
                    .zip(&fact.values)
                    .map(|(column, value)| (column.to_string(), json_value(value)))
                    .collect();
                Json::Object(row)
            })
            .collect();
        if !rows.is_empty() {
            relations.insert(table.name().to_string(), Json::Array(rows));
        }
    }

    json!({
        "schema_version": FACTS_SCHEMA_VERSION,
        "module": module,
        "labels": labels,
        "relations": relations,
    })
}
