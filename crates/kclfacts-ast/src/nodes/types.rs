// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Type annotation nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{format_float, Identifier, NodeRef, NumberBinarySuffix};

/// A type annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Type {
    Any,
    Named(Identifier),
    Basic(BasicType),
    List(ListType),
    Dict(DictType),
    Union(UnionType),
    Literal(LiteralType),
    Function(FunctionType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    Bool,
    Int,
    Float,
    Str,
}

/// `[inner]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListType {
    #[serde(default)]
    pub inner_type: Option<NodeRef<Type>>,
}

/// `{key: value}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictType {
    #[serde(default)]
    pub key_type: Option<NodeRef<Type>>,
    #[serde(default)]
    pub value_type: Option<NodeRef<Type>>,
}

/// `A | B | C`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionType {
    #[serde(default)]
    pub type_elements: Vec<NodeRef<Type>>,
}

/// `(params) -> ret`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    #[serde(default)]
    pub params_ty: Option<Vec<NodeRef<Type>>>,
    #[serde(default)]
    pub ret_ty: Option<NodeRef<Type>>,
}

/// A literal used as a type, such as `"dev" | "prod"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum LiteralType {
    Bool(bool),
    Int(IntLiteralType),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntLiteralType {
    pub value: i64,
    #[serde(default)]
    pub suffix: Option<NumberBinarySuffix>,
}

impl LiteralType {
    /// Value text for the `literals` relation: no quotes or suffix, and
    /// booleans in lowercase.
    pub fn value_text(&self) -> String {
        match self {
            LiteralType::Bool(value) => value.to_string(),
            LiteralType::Int(int) => int.value.to_string(),
            LiteralType::Float(f) => format_float(*f),
            LiteralType::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Str(s) => write!(f, "{:?}", s),
            LiteralType::Int(IntLiteralType {
                value,
                suffix: Some(suffix),
            }) => write!(f, "{}{}", value, suffix.symbol()),
            LiteralType::Bool(true) => f.write_str("True"),
            LiteralType::Bool(false) => f.write_str("False"),
            other => f.write_str(&other.value_text()),
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BasicType::Bool => "bool",
            BasicType::Int => "int",
            BasicType::Float => "float",
            BasicType::Str => "str",
        })
    }
}

/// Renders the annotation in KCL syntax.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("any"),
            Type::Named(ident) => f.write_str(&ident.name()),
            Type::Basic(basic) => write!(f, "{}", basic),
            Type::List(list) => match &list.inner_type {
                Some(inner) => write!(f, "[{}]", inner.node),
                None => f.write_str("[]"),
            },
            Type::Dict(dict) => {
                f.write_str("{")?;
                if let Some(key) = &dict.key_type {
                    write!(f, "{}", key.node)?;
                }
                f.write_str(":")?;
                if let Some(value) = &dict.value_type {
                    write!(f, "{}", value.node)?;
                }
                f.write_str("}")
            }
            Type::Union(union) => {
                for (i, elem) in union.type_elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", elem.node)?;
                }
                Ok(())
            }
            Type::Literal(lit) => write!(f, "{}", lit),
            Type::Function(func) => {
                f.write_str("(")?;
                for (i, param) in func.params_ty.iter().flatten().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param.node)?;
                }
                f.write_str(")")?;
                if let Some(ret) = &func.ret_ty {
                    write!(f, " -> {}", ret.node)?;
                }
                Ok(())
            }
        }
    }
}
