// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Symbol and type resolution table produced by the KCL frontend.
//!
//! The table is consumed as-is. It links syntax to semantics in four hops:
//!
//! ```text
//! node id ──node_symbol_map──▶ symbol ──ty──▶ "pkg_path.schema_name"
//!   "pkg_path.schema_name" ──fully_qualified_name_map──▶ schema symbol
//!   schema symbol ──def──▶ definition symbol ──symbol_node_map──▶ name node id
//! ```
//!
//! Lookups here return `Option`; deciding which absences are expected and
//! which are inconsistencies is up to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nodes::NodeId;

/// Key of a symbol in [`SymbolTable::symbols`].
pub type SymbolId = String;

/// The frontend's resolution tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub node_symbol_map: BTreeMap<NodeId, SymbolId>,
    #[serde(default)]
    pub symbols: BTreeMap<SymbolId, Symbol>,
    #[serde(default)]
    pub fully_qualified_name_map: BTreeMap<String, SymbolId>,
    #[serde(default)]
    pub symbol_node_map: BTreeMap<SymbolId, NodeId>,
}

/// One resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ty: Option<KclType>,
    #[serde(default)]
    pub def: Option<SymbolId>,
}

/// Semantic type of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KclType {
    pub kind: TypeKind,
    #[serde(default)]
    pub pkg_path: String,
    #[serde(default)]
    pub schema_name: String,
}

/// Coarse classification of a semantic type.
///
/// Only schema types take part in cross-referencing; every other kind the
/// frontend reports folds into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Schema,
    #[serde(other)]
    Other,
}

impl KclType {
    /// Fully qualified `pkg_path.schema_name`, for schema types only.
    pub fn schema_fqn(&self) -> Option<String> {
        if self.kind != TypeKind::Schema || self.schema_name.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.pkg_path, self.schema_name))
    }
}

impl SymbolTable {
    /// Symbol the node resolves to.
    ///
    /// `None` both when the node is unmapped and when its symbol id
    /// dangles; use [`SymbolTable::symbol_id_of_node`] to tell them apart.
    pub fn symbol_of_node(&self, id: &NodeId) -> Option<(&SymbolId, &Symbol)> {
        let sid = self.node_symbol_map.get(id)?;
        self.symbols.get(sid).map(|sym| (sid, sym))
    }

    /// Symbol id mapped for the node, whether or not it resolves.
    pub fn symbol_id_of_node(&self, id: &NodeId) -> Option<&SymbolId> {
        self.node_symbol_map.get(id)
    }

    /// Look up a symbol by id.
    pub fn symbol(&self, id: &str) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbol id bound to a fully qualified name.
    pub fn symbol_by_fqn(&self, fqn: &str) -> Option<&SymbolId> {
        self.fully_qualified_name_map.get(fqn)
    }

    /// Node that defines a symbol.
    pub fn node_of_symbol(&self, id: &str) -> Option<&NodeId> {
        self.symbol_node_map.get(id)
    }

    /// Check whether the table carries no resolution at all.
    pub fn is_empty(&self) -> bool {
        self.node_symbol_map.is_empty() && self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_kinds_fold_into_other() {
        let ty: KclType = serde_json::from_value(json!({
            "kind": "StrLit",
            "pkg_path": "",
            "schema_name": ""
        }))
        .unwrap();
        assert_eq!(ty.kind, TypeKind::Other);
        assert_eq!(ty.schema_fqn(), None);
    }

    #[test]
    fn schema_fqn_joins_package_and_name() {
        let ty = KclType {
            kind: TypeKind::Schema,
            pkg_path: "__main__".to_string(),
            schema_name: "Person".to_string(),
        };
        assert_eq!(ty.schema_fqn().as_deref(), Some("__main__.Person"));
    }

    #[test]
    fn chain_lookups() {
        let table: SymbolTable = serde_json::from_value(json!({
            "node_symbol_map": { "n1": "s1" },
            "symbols": {
                "s1": { "name": "p", "ty": { "kind": "Schema", "pkg_path": "app", "schema_name": "P" } },
                "s2": { "name": "P", "def": "s3" }
            },
            "fully_qualified_name_map": { "app.P": "s2" },
            "symbol_node_map": { "s3": "name1" }
        }))
        .unwrap();
        let (_, sym) = table.symbol_of_node(&NodeId::new("n1")).unwrap();
        let fqn = sym.ty.as_ref().and_then(KclType::schema_fqn).unwrap();
        let schema = table.symbol_by_fqn(&fqn).unwrap();
        let def = table.symbol(schema).and_then(|s| s.def.clone()).unwrap();
        assert_eq!(table.node_of_symbol(&def), Some(&NodeId::new("name1")));
    }
}
