//! Symbol Cross-Referencer: links identifiers to the schemas they denote.
//!
//! Resolution follows the symbol table from the identifier's intrinsic id to
//! its schema type, from the type's fully qualified name to the schema
//! symbol, from that symbol's definition to the schema's name node, and from
//! the name node to the schema statement. The statement's stable key is what
//! the identifier links to, so the link agrees with the label the defining
//! module assigns, whichever module that is.
//!
//! Outcomes:
//!
//! - `Ok(Some(key))`: a link.
//! - `Ok(None)`: no link is expected (unresolved identifier, non-schema
//!   type, builtin schema, or a definition outside this program).
//! - `Err(XrefError)`: the tables contradict each other. The caller logs it
//!   and carries on without the link.

use kclfacts_ast::{NodeFamily, NodeId, NodeIndex, SymbolTable};
use kclfacts_core::label::{IdentityManager, Label, StableKey};
use thiserror::Error;
use tracing::debug;

/// Inconsistencies between the symbol table and the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrefError {
    /// A node maps to a symbol id with no symbol.
    #[error("node {node} maps to missing symbol {symbol}")]
    DanglingSymbol { node: String, symbol: String },

    /// A schema name resolves to a symbol id with no symbol.
    #[error("schema {fqn} maps to missing symbol {symbol}")]
    DanglingSchemaSymbol { fqn: String, symbol: String },

    /// A schema symbol's definition has no syntax node.
    #[error("definition {symbol} of schema {fqn} has no node")]
    UnmappedDefinition { fqn: String, symbol: String },

    /// The definition node of a schema is not a schema name.
    #[error("definition node {node} of schema {fqn} is not a schema name")]
    NotASchemaName { fqn: String, node: String },

    /// The schema statement named by a definition was never indexed.
    #[error("schema statement {node} of {fqn} is not in the syntax tree")]
    UnindexedSchema { fqn: String, node: String },
}

/// Resolves identifier ids to schema definitions.
#[derive(Debug, Clone, Copy)]
pub struct CrossReferencer<'a> {
    symbols: &'a SymbolTable,
    index: &'a NodeIndex,
}

impl<'a> CrossReferencer<'a> {
    pub fn new(symbols: &'a SymbolTable, index: &'a NodeIndex) -> Self {
        CrossReferencer { symbols, index }
    }

    /// Resolve the identifier `id` to the label of its schema definition.
    pub fn resolve(
        &self,
        id: &NodeId,
        ids: &mut IdentityManager,
    ) -> Result<Option<Label>, XrefError> {
        Ok(self.resolve_key(id)?.map(|key| ids.stable_label(&key)))
    }

    /// Resolve the identifier `id` to the stable key of its schema
    /// definition.
    pub fn resolve_key(&self, id: &NodeId) -> Result<Option<StableKey>, XrefError> {
        let Some(symbol_id) = self.symbols.symbol_id_of_node(id) else {
            return Ok(None);
        };
        let symbol = self
            .symbols
            .symbol(symbol_id)
            .ok_or_else(|| XrefError::DanglingSymbol {
                node: id.to_string(),
                symbol: symbol_id.clone(),
            })?;
        let Some(fqn) = symbol.ty.as_ref().and_then(|ty| ty.schema_fqn()) else {
            return Ok(None);
        };
        let Some(schema_symbol_id) = self.symbols.symbol_by_fqn(&fqn) else {
            debug!(node = %id, fqn = %fqn, "schema not in symbol table");
            return Ok(None);
        };
        let schema_symbol =
            self.symbols
                .symbol(schema_symbol_id)
                .ok_or_else(|| XrefError::DanglingSchemaSymbol {
                    fqn: fqn.clone(),
                    symbol: schema_symbol_id.clone(),
                })?;
        let Some(def) = schema_symbol.def.as_ref() else {
            debug!(node = %id, fqn = %fqn, "schema symbol has no definition");
            return Ok(None);
        };
        let name_id =
            self.symbols
                .node_of_symbol(def)
                .ok_or_else(|| XrefError::UnmappedDefinition {
                    fqn: fqn.clone(),
                    symbol: def.clone(),
                })?;
        let Some(schema_id) = self.index.schema_of_name(name_id) else {
            return match self.index.get(name_id) {
                // Defined in a package this bundle does not carry.
                None => {
                    debug!(node = %id, fqn = %fqn, "schema defined outside program");
                    Ok(None)
                }
                Some(_) => Err(XrefError::NotASchemaName {
                    fqn,
                    node: name_id.to_string(),
                }),
            };
        };
        match self.index.get(schema_id) {
            Some(info) if info.family == NodeFamily::Stmt => Ok(Some(StableKey::node(
                schema_id.as_str(),
                &info.filename,
                &info.span,
            ))),
            _ => Err(XrefError::UnindexedSchema {
                fqn,
                node: schema_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kclfacts_ast::ParseBundle;
    use serde_json::json;

    fn node(id: &str, line: u32, body: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id, "filename": "main.k",
            "line": line, "column": 0, "end_line": line, "end_column": 1,
            "node": body
        })
    }

    fn bundle(symbols: serde_json::Value) -> ParseBundle {
        let schema = node(
            "schema1",
            1,
            json!({ "type": "Schema", "name": node("name1", 1, json!("P")), "body": [] }),
        );
        let assign = node(
            "assign1",
            2,
            json!({
                "type": "Assign",
                "targets": [node("p1", 2, json!({ "names": ["p"], "ctx": "Store" }))],
                "value": node("v1", 2, json!({ "type": "Missing" })),
            }),
        );
        let text = json!({
            "program": {
                "root": "/src",
                "pkgs": { "__main__": [{ "filename": "main.k", "body": [schema, assign] }] }
            },
            "symbols": symbols,
        })
        .to_string();
        ParseBundle::from_json_str(&text, "test").unwrap()
    }

    fn symbols(def_node: &str) -> serde_json::Value {
        json!({
            "node_symbol_map": { "p1": "s_p", "v1": "s_int", "bad": "s_gone" },
            "symbols": {
                "s_p": { "name": "p", "ty": { "kind": "Schema", "pkg_path": "__main__", "schema_name": "P" } },
                "s_int": { "name": "v", "ty": { "kind": "Int", "pkg_path": "", "schema_name": "" } },
                "s_schema": { "name": "P", "def": "s_def" }
            },
            "fully_qualified_name_map": { "__main__.P": "s_schema" },
            "symbol_node_map": { "s_def": def_node }
        })
    }

    #[test]
    fn resolves_schema_typed_identifier() {
        let b = bundle(symbols("name1"));
        let index = NodeIndex::build(&b.program);
        let xref = CrossReferencer::new(&b.symbols, &index);
        let key = xref.resolve_key(&NodeId::new("p1")).unwrap().unwrap();
        assert_eq!(key.as_str(), "schema1;{main.k},1:0:1:1");

        let mut ids = IdentityManager::new();
        let label = xref.resolve(&NodeId::new("p1"), &mut ids).unwrap();
        assert_eq!(label, ids.lookup(&key));
    }

    #[test]
    fn expected_absences_are_none() {
        let b = bundle(symbols("name1"));
        let index = NodeIndex::build(&b.program);
        let xref = CrossReferencer::new(&b.symbols, &index);
        // unmapped identifier
        assert_eq!(xref.resolve_key(&NodeId::new("unknown")), Ok(None));
        // non-schema type
        assert_eq!(xref.resolve_key(&NodeId::new("v1")), Ok(None));
    }

    #[test]
    fn definition_outside_program_is_none() {
        let b = bundle(symbols("elsewhere"));
        let index = NodeIndex::build(&b.program);
        let xref = CrossReferencer::new(&b.symbols, &index);
        assert_eq!(xref.resolve_key(&NodeId::new("p1")), Ok(None));
    }

    #[test]
    fn inconsistencies_are_errors() {
        let b = bundle(symbols("p1"));
        let index = NodeIndex::build(&b.program);
        let xref = CrossReferencer::new(&b.symbols, &index);
        assert!(matches!(
            xref.resolve_key(&NodeId::new("p1")),
            Err(XrefError::NotASchemaName { .. })
        ));
        assert!(matches!(
            xref.resolve_key(&NodeId::new("bad")),
            Err(XrefError::DanglingSymbol { .. })
        ));
    }
}
