// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes and the auxiliary constructs that hang off them.

use serde::{Deserialize, Serialize};

use super::{
    BinOp, CmpOp, ConfigEntryOperation, ExprContext, NodeRef, NumberBinarySuffix, QuantOperation,
    Stmt, Type, UnaryOp,
};

/// A KCL expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier(Identifier),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    If(IfExpr),
    Selector(SelectorExpr),
    Call(CallExpr),
    Paren(ParenExpr),
    Quant(QuantExpr),
    List(ListExpr),
    ListIfItem(ListIfItemExpr),
    ListComp(ListComp),
    Starred(StarredExpr),
    DictComp(DictComp),
    ConfigIfEntry(ConfigIfEntryExpr),
    Schema(SchemaConfig),
    Config(ConfigExpr),
    Check(CheckExpr),
    Lambda(LambdaExpr),
    Subscript(Subscript),
    Compare(Compare),
    JoinedString(JoinedString),
    FormattedValue(FormattedValue),
    NumberLit(NumberLit),
    StringLit(StringLit),
    NameConstantLit(NameConstantLit),
    Missing(MissingExpr),
}

impl Expr {
    /// Variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "Identifier",
            Expr::Unary(_) => "Unary",
            Expr::Binary(_) => "Binary",
            Expr::If(_) => "If",
            Expr::Selector(_) => "Selector",
            Expr::Call(_) => "Call",
            Expr::Paren(_) => "Paren",
            Expr::Quant(_) => "Quant",
            Expr::List(_) => "List",
            Expr::ListIfItem(_) => "ListIfItem",
            Expr::ListComp(_) => "ListComp",
            Expr::Starred(_) => "Starred",
            Expr::DictComp(_) => "DictComp",
            Expr::ConfigIfEntry(_) => "ConfigIfEntry",
            Expr::Schema(_) => "Schema",
            Expr::Config(_) => "Config",
            Expr::Check(_) => "Check",
            Expr::Lambda(_) => "Lambda",
            Expr::Subscript(_) => "Subscript",
            Expr::Compare(_) => "Compare",
            Expr::JoinedString(_) => "JoinedString",
            Expr::FormattedValue(_) => "FormattedValue",
            Expr::NumberLit(_) => "NumberLit",
            Expr::StringLit(_) => "StringLit",
            Expr::NameConstantLit(_) => "NameConstantLit",
            Expr::Missing(_) => "Missing",
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// A possibly dotted name such as `a.b.c`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub names: Vec<String>,
    #[serde(default)]
    pub pkgpath: String,
    #[serde(default)]
    pub ctx: ExprContext,
}

impl Identifier {
    /// Dotted name.
    pub fn name(&self) -> String {
        self.names.join(".")
    }

    /// Package path, if the identifier was imported from one.
    pub fn pkgpath(&self) -> Option<&str> {
        if self.pkgpath.is_empty() {
            None
        } else {
            Some(&self.pkgpath)
        }
    }
}

// ============================================================================
// Operators and simple compound expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: NodeRef<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: NodeRef<Expr>,
    pub op: BinOp,
    pub right: NodeRef<Expr>,
}

/// `body if cond else orelse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfExpr {
    pub body: NodeRef<Expr>,
    pub cond: NodeRef<Expr>,
    pub orelse: NodeRef<Expr>,
}

/// `value.attr`, or `value?.attr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorExpr {
    pub value: NodeRef<Expr>,
    pub attr: NodeRef<Identifier>,
    #[serde(default)]
    pub ctx: ExprContext,
    #[serde(default)]
    pub has_question: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub func: NodeRef<Expr>,
    #[serde(default)]
    pub args: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub keywords: Vec<NodeRef<Keyword>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenExpr {
    pub expr: NodeRef<Expr>,
}

/// `all x in xs { test if cond }` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantExpr {
    pub target: NodeRef<Expr>,
    #[serde(default)]
    pub variables: Vec<NodeRef<Identifier>>,
    pub op: QuantOperation,
    pub test: NodeRef<Expr>,
    #[serde(default)]
    pub if_cond: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub ctx: ExprContext,
}

// ============================================================================
// Collections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    #[serde(default)]
    pub elts: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub ctx: ExprContext,
}

/// `if cond: exprs else: orelse` inside a list literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListIfItemExpr {
    pub if_cond: NodeRef<Expr>,
    #[serde(default)]
    pub exprs: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub orelse: Option<NodeRef<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListComp {
    pub elt: NodeRef<Expr>,
    #[serde(default)]
    pub generators: Vec<NodeRef<CompClause>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarredExpr {
    pub value: NodeRef<Expr>,
    #[serde(default)]
    pub ctx: ExprContext,
}

/// `{k: v for k, v in xs}`
///
/// The entry is not a located node of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictComp {
    pub entry: ConfigEntry,
    #[serde(default)]
    pub generators: Vec<NodeRef<CompClause>>,
}

/// `if cond: items else: orelse` inside a config literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigIfEntryExpr {
    pub if_cond: NodeRef<Expr>,
    #[serde(default)]
    pub items: Vec<NodeRef<ConfigEntry>>,
    #[serde(default)]
    pub orelse: Option<NodeRef<Expr>>,
}

/// One `key op value` entry of a config literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(default)]
    pub key: Option<NodeRef<Expr>>,
    pub value: NodeRef<Expr>,
    #[serde(default)]
    pub operation: ConfigEntryOperation,
    #[serde(default)]
    pub insert_index: i64,
}

/// `for targets in iter if ifs` clause of a comprehension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompClause {
    #[serde(default)]
    pub targets: Vec<NodeRef<Identifier>>,
    pub iter: NodeRef<Expr>,
    #[serde(default)]
    pub ifs: Vec<NodeRef<Expr>>,
}

/// `Name(args, kw=v) {config}`: a schema instantiation.
///
/// Also the value of a unification statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub name: NodeRef<Identifier>,
    #[serde(default)]
    pub args: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub kwargs: Vec<NodeRef<Keyword>>,
    pub config: NodeRef<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigExpr {
    #[serde(default)]
    pub items: Vec<NodeRef<ConfigEntry>>,
}

// ============================================================================
// Checks, lambdas, subscripts, comparisons
// ============================================================================

/// `test if if_cond, msg` in a check block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckExpr {
    pub test: NodeRef<Expr>,
    #[serde(default)]
    pub if_cond: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub msg: Option<NodeRef<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpr {
    #[serde(default)]
    pub args: Option<NodeRef<Arguments>>,
    #[serde(default)]
    pub body: Vec<NodeRef<Stmt>>,
    #[serde(default)]
    pub return_ty: Option<NodeRef<Type>>,
}

/// `value[index]` or `value[lower:upper:step]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscript {
    pub value: NodeRef<Expr>,
    #[serde(default)]
    pub index: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub lower: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub upper: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub step: Option<NodeRef<Expr>>,
    #[serde(default)]
    pub ctx: ExprContext,
    #[serde(default)]
    pub has_question: bool,
}

/// `left op0 c0 op1 c1 ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compare {
    pub left: NodeRef<Expr>,
    #[serde(default)]
    pub ops: Vec<CmpOp>,
    #[serde(default)]
    pub comparators: Vec<NodeRef<Expr>>,
}

// ============================================================================
// Call and function auxiliaries
// ============================================================================

/// `arg=value` in a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub arg: NodeRef<Identifier>,
    #[serde(default)]
    pub value: Option<NodeRef<Expr>>,
}

/// Parameter list of a schema, rule or lambda.
///
/// `defaults` and `ty_list` are aligned with `args`; a missing default or
/// annotation is `None` at that position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub args: Vec<NodeRef<Identifier>>,
    #[serde(default)]
    pub defaults: Vec<Option<NodeRef<Expr>>>,
    #[serde(default)]
    pub ty_list: Vec<Option<NodeRef<Type>>>,
}

// ============================================================================
// Strings and literals
// ============================================================================

/// An f-string-like interpolated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedString {
    #[serde(default)]
    pub is_long_string: bool,
    #[serde(default)]
    pub values: Vec<NodeRef<Expr>>,
    #[serde(default)]
    pub raw_value: String,
}

/// `${value: format_spec}` inside a joined string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedValue {
    #[serde(default)]
    pub is_long_string: bool,
    pub value: NodeRef<Expr>,
    #[serde(default)]
    pub format_spec: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLit {
    #[serde(default)]
    pub binary_suffix: Option<NumberBinarySuffix>,
    pub value: NumberLitValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NumberLitValue {
    Int(i64),
    Float(f64),
}

impl NumberLitValue {
    /// Source-like rendering of the value.
    pub fn text(&self) -> String {
        match self {
            NumberLitValue::Int(n) => n.to_string(),
            NumberLitValue::Float(f) => format_float(*f),
        }
    }
}

/// Render a float so that integral values keep a trailing `.0`.
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLit {
    #[serde(default)]
    pub is_long_string: bool,
    #[serde(default)]
    pub raw_value: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameConstantLit {
    pub value: NameConstant,
}

/// `True`, `False`, `None` or `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameConstant {
    True,
    False,
    None,
    Undefined,
}

impl NameConstant {
    /// Source spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            NameConstant::True => "True",
            NameConstant::False => "False",
            NameConstant::None => "None",
            NameConstant::Undefined => "Undefined",
        }
    }
}

/// Placeholder the frontend inserts for a missing expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissingExpr {}
