// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement nodes.

use serde::{Deserialize, Serialize};

use super::{Arguments, AugOp, Expr, Identifier, NodeRef, SchemaConfig, Type};

/// A KCL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    TypeAlias(TypeAliasStmt),
    Expr(ExprStmt),
    Unification(UnificationStmt),
    Assign(AssignStmt),
    AugAssign(AugAssignStmt),
    Assert(AssertStmt),
    If(IfStmt),
    Import(ImportStmt),
    SchemaAttr(SchemaAttr),
    Schema(SchemaStmt),
    Rule(RuleStmt),
}

impl Stmt {
    /// Variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Stmt::TypeAlias(_) => "TypeAlias",
            Stmt::Expr(_) => "Expr",
            Stmt::Unification(_) => "Unification",
            Stmt::Assign(_) => "Assign",
            Stmt::AugAssign(_) => "AugAssign",
            Stmt::Assert(_) => "Assert",
            Stmt::If(_) => "If",
            Stmt::Import(_) => "Import",
            Stmt::SchemaAttr(_) => "SchemaAttr",
            Stmt::Schema(_) => "Schema",
            Stmt::Rule(_) => "Rule",
        }
    }
}

/// `type Name = T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasStmt {
    pub type_name: NodeRef<Identifier>,
    pub type_value: NodeRef<String>,
    pub ty: NodeRef<Type>,
}

/// A bare expression list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    #[serde(default)]
    pub exprs: Vec<NodeRef<Expr>>,
}

/// `target: Schema {...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnificationStmt {
    pub target: NodeRef<Identifier>,
    pub value: NodeRef<SchemaConfig>,
}

/// `a = b = value` with an optional type annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    #[serde(default)]
    pub targets: Vec<NodeRef<Identifier>>,
    pub value: NodeRef<Expr>,
    #[serde(default)]
    pub ty: Option<NodeRef<Type>>,
}

/// `target += value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugAssignStmt {
    pub target: NodeRef<Identifier>,
    pub value: NodeRef<Expr>,
    pub op: AugOp,
}

/// `assert test if cond, msg`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertStmt {
    pub test: NodeRef<Expr>,
    #[serde(default)]
    pub if_cond: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub msg: Option<NodeRef<Expr>>,
}

/// `if cond: body else: orelse`
///
/// An `elif` chain arrives as a nested `If` in `orelse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default)]
    pub body: Vec<NodeRef<Stmt>>,
    pub cond: NodeRef<Expr>,
    #[serde(default)]
    pub orelse: Vec<NodeRef<Stmt>>,
}

/// `import path as asname`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStmt {
    pub path: NodeRef<String>,
    #[serde(default)]
    pub rawpath: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub asname: Option<NodeRef<String>>,
    #[serde(default)]
    pub pkg_name: String,
}

/// An attribute declared in a schema body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaAttr {
    #[serde(default)]
    pub doc: String,
    pub name: NodeRef<String>,
    #[serde(default)]
    pub op: Option<AugOp>,
    #[serde(default)]
    pub value: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub decorators: Vec<NodeRef<Expr>>,
    pub ty: NodeRef<Type>,
}

/// `schema Name(Parent): ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaStmt {
    #[serde(default)]
    pub doc: Option<NodeRef<String>>,
    pub name: NodeRef<String>,
    #[serde(default)]
    pub parent_name: Option<NodeRef<Identifier>>,
    #[serde(default)]
    pub for_host_name: Option<NodeRef<Identifier>>,
    #[serde(default)]
    pub is_mixin: bool,
    #[serde(default)]
    pub is_protocol: bool,
    #[serde(default)]
    pub args: Option<NodeRef<Arguments>>,
    #[serde(default)]
    pub mixins: Vec<NodeRef<Identifier>>,
    #[serde(default)]
    pub body: Vec<NodeRef<Stmt>>,
    #[serde(default)]
    pub decorators: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub checks: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub index_signature: Option<NodeRef<SchemaIndexSignature>>,
}

/// `[key_name: key_ty]: value_ty = value` inside a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaIndexSignature {
    #[serde(default)]
    pub key_name: Option<NodeRef<String>>,
    pub key_ty: NodeRef<Type>,
    pub value_ty: NodeRef<Type>,
    #[serde(default)]
    pub value: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub any_other: bool,
}

/// `rule Name(Parent): checks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStmt {
    #[serde(default)]
    pub doc: Option<NodeRef<String>>,
    pub name: NodeRef<String>,
    #[serde(default)]
    pub parent_rules: Vec<NodeRef<Identifier>>,
    #[serde(default)]
    pub decorators: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub checks: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub args: Option<NodeRef<Arguments>>,
    #[serde(default)]
    pub for_host_name: Option<NodeRef<Identifier>>,
}
