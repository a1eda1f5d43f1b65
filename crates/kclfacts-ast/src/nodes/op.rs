// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Operators, contexts and number suffixes.
//!
//! These carry no location. Each has a `symbol()` giving its source
//! spelling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    UAdd,
    USub,
    Invert,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::UAdd => "+",
            UnaryOp::USub => "-",
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    FloorDiv,
    LShift,
    RShift,
    BitXor,
    BitAnd,
    BitOr,
    And,
    Or,
    As,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::FloorDiv => "//",
            BinOp::LShift => "<<",
            BinOp::RShift => ">>",
            BinOp::BitXor => "^",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::As => "as",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    In,
    NotIn,
    Not,
    IsNot,
}

impl CmpOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Is => "is",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
            CmpOp::Not => "not",
            CmpOp::IsNot => "is not",
        }
    }
}

/// Assignment operator of an augmented assignment or schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AugOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    FloorDiv,
    LShift,
    RShift,
    BitXor,
    BitAnd,
    BitOr,
}

impl AugOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            AugOp::Assign => "=",
            AugOp::Add => "+=",
            AugOp::Sub => "-=",
            AugOp::Mul => "*=",
            AugOp::Div => "/=",
            AugOp::Mod => "%=",
            AugOp::Pow => "**=",
            AugOp::FloorDiv => "//=",
            AugOp::LShift => "<<=",
            AugOp::RShift => ">>=",
            AugOp::BitXor => "^=",
            AugOp::BitAnd => "&=",
            AugOp::BitOr => "|=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantOperation {
    All,
    Any,
    Filter,
    Map,
}

impl QuantOperation {
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantOperation::All => "all",
            QuantOperation::Any => "any",
            QuantOperation::Filter => "filter",
            QuantOperation::Map => "map",
        }
    }
}

/// How a config entry combines with an existing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfigEntryOperation {
    #[default]
    Union,
    Override,
    Insert,
}

impl ConfigEntryOperation {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConfigEntryOperation::Union => ":",
            ConfigEntryOperation::Override => "=",
            ConfigEntryOperation::Insert => "+=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExprContext {
    #[default]
    Load,
    Store,
}

/// Unit suffix of a number literal, such as `Ki` in `64Ki`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberBinarySuffix {
    #[serde(rename = "n")]
    N,
    #[serde(rename = "u")]
    U,
    #[serde(rename = "m")]
    M,
    #[serde(rename = "k")]
    K,
    #[serde(rename = "K")]
    KUpper,
    #[serde(rename = "M")]
    MUpper,
    G,
    T,
    P,
    Ki,
    Mi,
    Gi,
    Ti,
    Pi,
}

impl NumberBinarySuffix {
    pub fn symbol(&self) -> &'static str {
        match self {
            NumberBinarySuffix::N => "n",
            NumberBinarySuffix::U => "u",
            NumberBinarySuffix::M => "m",
            NumberBinarySuffix::K => "k",
            NumberBinarySuffix::KUpper => "K",
            NumberBinarySuffix::MUpper => "M",
            NumberBinarySuffix::G => "G",
            NumberBinarySuffix::T => "T",
            NumberBinarySuffix::P => "P",
            NumberBinarySuffix::Ki => "Ki",
            NumberBinarySuffix::Mi => "Mi",
            NumberBinarySuffix::Gi => "Gi",
            NumberBinarySuffix::Ti => "Ti",
            NumberBinarySuffix::Pi => "Pi",
        }
    }
}
