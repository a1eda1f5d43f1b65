//! Fact relations: the extractor's output model.
//!
//! A [`FactStore`] is an append-only log of [`Fact`]s. Each fact belongs to
//! one [`Table`] (a named relation with a fixed column list) and carries one
//! [`Value`] per column. The log keeps emission order, which is what the TRAP
//! writer replays; per-table views are filters over the same log.
//!
//! # Schema Versioning
//!
//! [`FACTS_SCHEMA_VERSION`] tracks breaking changes to the relation set or to
//! any relation's column order. New node kinds extend a kind enumeration and
//! do not bump the version; renumbering or removing a column does.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::label::Label;

// ============================================================================
// Schema Version
// ============================================================================

/// Schema version of the emitted relations.
pub const FACTS_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Tables
// ============================================================================

/// Every relation the extractor can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    // Program structure
    Roots,
    Packages,
    Files,
    Modules,
    // Node families
    Stmts,
    Exprs,
    Types,
    Identifiers,
    Strings,
    Literals,
    NumberSuffixes,
    // Operators
    UnaryOps,
    BinaryOps,
    CmpOps,
    AugOps,
    QuantOps,
    ConfigEntryOps,
    ExprContexts,
    // Auxiliary constructs
    ConfigEntries,
    Keywords,
    CompClauses,
    Arguments,
    SchemaConfigs,
    IndexSignatures,
    Comments,
    // List containers
    IdentifierLists,
    ExprLists,
    StmtLists,
    KeywordLists,
    TypeLists,
    ConfigEntryLists,
    CompClauseLists,
    // Cross references
    SchemaRefs,
    // Locations and line metrics
    Locations,
    Lines,
    Numlines,
}

impl Table {
    /// All tables in declaration order.
    pub const ALL: [Table; 36] = [
        Table::Roots,
        Table::Packages,
        Table::Files,
        Table::Modules,
        Table::Stmts,
        Table::Exprs,
        Table::Types,
        Table::Identifiers,
        Table::Strings,
        Table::Literals,
        Table::NumberSuffixes,
        Table::UnaryOps,
        Table::BinaryOps,
        Table::CmpOps,
        Table::AugOps,
        Table::QuantOps,
        Table::ConfigEntryOps,
        Table::ExprContexts,
        Table::ConfigEntries,
        Table::Keywords,
        Table::CompClauses,
        Table::Arguments,
        Table::SchemaConfigs,
        Table::IndexSignatures,
        Table::Comments,
        Table::IdentifierLists,
        Table::ExprLists,
        Table::StmtLists,
        Table::KeywordLists,
        Table::TypeLists,
        Table::ConfigEntryLists,
        Table::CompClauseLists,
        Table::SchemaRefs,
        Table::Locations,
        Table::Lines,
        Table::Numlines,
    ];

    /// Relation name as written to output.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Roots => "roots",
            Table::Packages => "packages",
            Table::Files => "files",
            Table::Modules => "modules",
            Table::Stmts => "stmts",
            Table::Exprs => "exprs",
            Table::Types => "types",
            Table::Identifiers => "identifiers",
            Table::Strings => "strings",
            Table::Literals => "literals",
            Table::NumberSuffixes => "number_suffixes",
            Table::UnaryOps => "unary_ops",
            Table::BinaryOps => "binary_ops",
            Table::CmpOps => "cmp_ops",
            Table::AugOps => "aug_ops",
            Table::QuantOps => "quant_ops",
            Table::ConfigEntryOps => "config_entry_ops",
            Table::ExprContexts => "expr_contexts",
            Table::ConfigEntries => "config_entries",
            Table::Keywords => "keywords",
            Table::CompClauses => "comp_clauses",
            Table::Arguments => "arguments",
            Table::SchemaConfigs => "schema_configs",
            Table::IndexSignatures => "index_signatures",
            Table::Comments => "comments",
            Table::IdentifierLists => "identifier_lists",
            Table::ExprLists => "expr_lists",
            Table::StmtLists => "stmt_lists",
            Table::KeywordLists => "keyword_lists",
            Table::TypeLists => "type_lists",
            Table::ConfigEntryLists => "config_entry_lists",
            Table::CompClauseLists => "comp_clause_lists",
            Table::SchemaRefs => "schema_refs",
            Table::Locations => "locations",
            Table::Lines => "lines",
            Table::Numlines => "numlines",
        }
    }

    /// Column names, in wire order.
    pub fn columns(&self) -> &'static [&'static str] {
        const LIST: &[&str] = &["id", "parent", "index"];
        match self {
            Table::Roots => &["id", "path"],
            Table::Packages => &["id", "name", "root"],
            Table::Files => &["id", "path", "sha256"],
            Table::Modules => &["id", "name", "file", "package", "index"],
            Table::Stmts | Table::Exprs => &["id", "kind", "parent", "index", "text"],
            Table::Types => &["id", "kind", "parent", "index", "name"],
            Table::Identifiers => &["id", "parent", "index", "name"],
            Table::Strings => &["id", "parent", "index", "value"],
            Table::Literals => &["id", "kind", "parent", "value"],
            Table::NumberSuffixes => &["id", "suffix", "parent"],
            Table::UnaryOps | Table::BinaryOps | Table::QuantOps | Table::ExprContexts => {
                &["id", "kind", "parent"]
            }
            Table::CmpOps => &["id", "kind", "parent", "index"],
            Table::AugOps => &["id", "kind", "parent", "symbol"],
            Table::ConfigEntryOps => &["id", "kind", "symbol", "parent"],
            Table::ConfigEntries
            | Table::Keywords
            | Table::CompClauses
            | Table::Arguments
            | Table::SchemaConfigs => LIST,
            Table::IndexSignatures => &["id", "parent", "index", "any_other"],
            Table::Comments => &["id", "module", "index", "text", "line_text"],
            Table::IdentifierLists
            | Table::ExprLists
            | Table::StmtLists
            | Table::KeywordLists
            | Table::TypeLists
            | Table::ConfigEntryLists
            | Table::CompClauseLists => LIST,
            Table::SchemaRefs => &["identifier", "schema"],
            Table::Locations => &[
                "id",
                "file",
                "start_line",
                "start_column",
                "end_line",
                "end_column",
            ],
            Table::Lines => &["file", "number", "offset", "length"],
            Table::Numlines => &["file", "lines", "code", "comments"],
        }
    }

    /// Number of columns.
    pub fn arity(&self) -> usize {
        self.columns().len()
    }

    /// Look up a table by its output name.
    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Values and Facts
// ============================================================================

/// One column value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Label(Label),
    Int(i64),
    Str(String),
}

impl Value {
    /// The label, if this value is one.
    pub fn as_label(&self) -> Option<Label> {
        match self {
            Value::Label(label) => Some(*label),
            _ => None,
        }
    }

    /// The integer, if this value is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Label> for Value {
    fn from(label: Label) -> Self {
        Value::Label(label)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Int(i64::from(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// One tuple of one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub table: Table,
    pub values: Vec<Value>,
}

impl Fact {
    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let pos = self.table.columns().iter().position(|c| *c == column)?;
        self.values.get(pos)
    }

    /// Label in the named column.
    pub fn label(&self, column: &str) -> Option<Label> {
        self.get(column).and_then(Value::as_label)
    }

    /// Integer in the named column.
    pub fn int(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_int)
    }

    /// String in the named column.
    pub fn str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Every label mentioned by this fact, in column order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.values.iter().filter_map(Value::as_label)
    }
}

// ============================================================================
// Fact Store
// ============================================================================

/// Append-only store of emitted facts for one module.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: Vec<Fact>,
}

impl FactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        FactStore::default()
    }

    /// Append one tuple to `table`.
    ///
    /// The value count must match the table's arity; a mismatch is a bug in
    /// the caller.
    pub fn add(&mut self, table: Table, values: Vec<Value>) {
        debug_assert_eq!(
            values.len(),
            table.arity(),
            "wrong arity for {}: {:?}",
            table,
            values
        );
        self.facts.push(Fact { table, values });
    }

    /// All facts in emission order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Facts of one table, in emission order.
    pub fn rows(&self, table: Table) -> impl Iterator<Item = &Fact> {
        self.facts.iter().filter(move |f| f.table == table)
    }

    /// Number of facts in one table.
    pub fn count(&self, table: Table) -> usize {
        self.rows(table).count()
    }

    /// Total number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
