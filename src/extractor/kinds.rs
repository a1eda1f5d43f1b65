//! Kind discriminators.
//!
//! Each family's variants map to a fixed, densely packed integer. The
//! mappings are exhaustive matches, so a new variant does not build until it
//! is given a kind. Numbers are part of the output format: extend, never
//! renumber.

use kclfacts_ast::{
    AugOp, BasicType, BinOp, CmpOp, ConfigEntryOperation, Expr, ExprContext, LiteralType,
    NumberLitValue, QuantOperation, Stmt, Type, UnaryOp,
};

pub fn stmt_kind(stmt: &Stmt) -> u32 {
    match stmt {
        Stmt::TypeAlias(_) => 0,
        Stmt::Expr(_) => 1,
        Stmt::Unification(_) => 2,
        Stmt::Assign(_) => 3,
        Stmt::AugAssign(_) => 4,
        Stmt::Assert(_) => 5,
        Stmt::If(_) => 6,
        Stmt::Import(_) => 7,
        Stmt::SchemaAttr(_) => 8,
        Stmt::Schema(_) => 9,
        Stmt::Rule(_) => 10,
    }
}

pub fn expr_kind(expr: &Expr) -> u32 {
    match expr {
        Expr::Identifier(_) => 0,
        Expr::Unary(_) => 1,
        Expr::Binary(_) => 2,
        Expr::If(_) => 3,
        Expr::Selector(_) => 4,
        Expr::Call(_) => 5,
        Expr::Paren(_) => 6,
        Expr::Quant(_) => 7,
        Expr::List(_) => 8,
        Expr::ListIfItem(_) => 9,
        Expr::ListComp(_) => 10,
        Expr::Starred(_) => 11,
        Expr::DictComp(_) => 12,
        Expr::ConfigIfEntry(_) => 13,
        Expr::Schema(_) => 14,
        Expr::Config(_) => 15,
        Expr::Check(_) => 16,
        Expr::Lambda(_) => 17,
        Expr::Subscript(_) => 18,
        Expr::Compare(_) => 19,
        Expr::JoinedString(_) => 20,
        Expr::FormattedValue(_) => 21,
        Expr::NumberLit(_) => 22,
        Expr::StringLit(_) => 23,
        Expr::NameConstantLit(_) => 24,
        Expr::Missing(_) => 25,
    }
}

pub fn type_kind(ty: &Type) -> u32 {
    match ty {
        Type::Any => 0,
        Type::Named(_) => 1,
        Type::Basic(BasicType::Bool) => 2,
        Type::Basic(BasicType::Int) => 3,
        Type::Basic(BasicType::Float) => 4,
        Type::Basic(BasicType::Str) => 5,
        Type::List(_) => 6,
        Type::Dict(_) => 7,
        Type::Union(_) => 8,
        Type::Function(_) => 9,
        Type::Literal(_) => 10,
    }
}

// Literal kinds.
pub const LITERAL_BOOL: u32 = 0;
pub const LITERAL_INT: u32 = 1;
pub const LITERAL_FLOAT: u32 = 2;
pub const LITERAL_STR: u32 = 3;
pub const LITERAL_NAME_CONSTANT: u32 = 4;

pub fn number_kind(value: &NumberLitValue) -> u32 {
    match value {
        NumberLitValue::Int(_) => LITERAL_INT,
        NumberLitValue::Float(_) => LITERAL_FLOAT,
    }
}

pub fn literal_type_kind(lit: &LiteralType) -> u32 {
    match lit {
        LiteralType::Bool(_) => LITERAL_BOOL,
        LiteralType::Int(_) => LITERAL_INT,
        LiteralType::Float(_) => LITERAL_FLOAT,
        LiteralType::Str(_) => LITERAL_STR,
    }
}

pub fn unary_op_kind(op: UnaryOp) -> u32 {
    match op {
        UnaryOp::UAdd => 0,
        UnaryOp::USub => 1,
        UnaryOp::Invert => 2,
        UnaryOp::Not => 3,
    }
}

pub fn bin_op_kind(op: BinOp) -> u32 {
    match op {
        BinOp::Add => 0,
        BinOp::Sub => 1,
        BinOp::Mul => 2,
        BinOp::Div => 3,
        BinOp::Mod => 4,
        BinOp::Pow => 5,
        BinOp::FloorDiv => 6,
        BinOp::LShift => 7,
        BinOp::RShift => 8,
        BinOp::BitXor => 9,
        BinOp::BitAnd => 10,
        BinOp::BitOr => 11,
        BinOp::And => 12,
        BinOp::Or => 13,
        BinOp::As => 14,
    }
}

pub fn cmp_op_kind(op: CmpOp) -> u32 {
    match op {
        CmpOp::Eq => 0,
        CmpOp::NotEq => 1,
        CmpOp::Lt => 2,
        CmpOp::LtE => 3,
        CmpOp::Gt => 4,
        CmpOp::GtE => 5,
        CmpOp::Is => 6,
        CmpOp::In => 7,
        CmpOp::NotIn => 8,
        CmpOp::Not => 9,
        CmpOp::IsNot => 10,
    }
}

pub fn aug_op_kind(op: AugOp) -> u32 {
    match op {
        AugOp::Assign => 0,
        AugOp::Add => 1,
        AugOp::Sub => 2,
        AugOp::Mul => 3,
        AugOp::Div => 4,
        AugOp::Mod => 5,
        AugOp::Pow => 6,
        AugOp::FloorDiv => 7,
        AugOp::LShift => 8,
        AugOp::RShift => 9,
        AugOp::BitXor => 10,
        AugOp::BitAnd => 11,
        AugOp::BitOr => 12,
    }
}

pub fn quant_op_kind(op: QuantOperation) -> u32 {
    match op {
        QuantOperation::All => 0,
        QuantOperation::Any => 1,
        QuantOperation::Filter => 2,
        QuantOperation::Map => 3,
    }
}

pub fn config_entry_op_kind(op: ConfigEntryOperation) -> u32 {
    match op {
        ConfigEntryOperation::Union => 0,
        ConfigEntryOperation::Override => 1,
        ConfigEntryOperation::Insert => 2,
    }
}

pub fn expr_context_kind(ctx: ExprContext) -> u32 {
    match ctx {
        ExprContext::Load => 0,
        ExprContext::Store => 1,
    }
}
