// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for syntax tree traversal.
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: children are visited in declaration order
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    Arguments, Comment, CompClause, ConfigEntry, Expr, Identifier, Keyword, Module, Node,
    SchemaConfig, SchemaIndexSignature, Stmt, Type,
};

/// Return early from the enclosing walk if a child walk stopped.
macro_rules! walk_or_stop {
    ($e:expr) => {
        if $e == VisitResult::Stop {
            return VisitResult::Stop;
        }
    };
}

fn walk_all<V: Visitor, T>(
    visitor: &mut V,
    nodes: &[Box<Node<T>>],
    walk: fn(&mut V, &Node<T>) -> VisitResult,
) -> VisitResult {
    for node in nodes {
        walk_or_stop!(walk(visitor, node));
    }
    VisitResult::Continue
}

fn walk_opt<V: Visitor, T>(
    visitor: &mut V,
    node: &Option<Box<Node<T>>>,
    walk: fn(&mut V, &Node<T>) -> VisitResult,
) -> VisitResult {
    match node {
        Some(node) => walk(visitor, node),
        None => VisitResult::Continue,
    }
}

// ============================================================================
// Module walk
// ============================================================================

/// Walk a [`Module`]: its body in source order, then its comments.
pub fn walk_module<V: Visitor>(visitor: &mut V, node: &Module) -> VisitResult {
    match visitor.visit_module(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_opt(visitor, &node.doc, walk_string));
            walk_or_stop!(walk_all(visitor, &node.body, walk_stmt));
            walk_or_stop!(walk_all(visitor, &node.comments, walk_comment));
        }
    }
    visitor.leave_module(node);
    VisitResult::Continue
}

/// Walk a comment.
pub fn walk_comment<V: Visitor>(visitor: &mut V, node: &Node<Comment>) -> VisitResult {
    if visitor.visit_comment(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_comment(node);
    VisitResult::Continue
}

/// Walk a located string.
pub fn walk_string<V: Visitor>(visitor: &mut V, node: &Node<String>) -> VisitResult {
    if visitor.visit_string(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_string(node);
    VisitResult::Continue
}

// ============================================================================
// Statement walk
// ============================================================================

/// Walk a statement and its children.
pub fn walk_stmt<V: Visitor>(visitor: &mut V, node: &Node<Stmt>) -> VisitResult {
    match visitor.visit_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_stmt_children(visitor, &node.node));
        }
    }
    visitor.leave_stmt(node);
    VisitResult::Continue
}

fn walk_stmt_children<V: Visitor>(visitor: &mut V, stmt: &Stmt) -> VisitResult {
    match stmt {
        Stmt::TypeAlias(s) => {
            walk_or_stop!(walk_identifier(visitor, &s.type_name));
            walk_or_stop!(walk_string(visitor, &s.type_value));
            walk_type(visitor, &s.ty)
        }
        Stmt::Expr(s) => walk_all(visitor, &s.exprs, walk_expr),
        Stmt::Unification(s) => {
            walk_or_stop!(walk_identifier(visitor, &s.target));
            walk_schema_config(visitor, &s.value)
        }
        Stmt::Assign(s) => {
            walk_or_stop!(walk_all(visitor, &s.targets, walk_identifier));
            walk_or_stop!(walk_expr(visitor, &s.value));
            walk_opt(visitor, &s.ty, walk_type)
        }
        Stmt::AugAssign(s) => {
            walk_or_stop!(walk_identifier(visitor, &s.target));
            walk_expr(visitor, &s.value)
        }
        Stmt::Assert(s) => {
            walk_or_stop!(walk_opt(visitor, &s.if_cond, walk_expr));
            walk_or_stop!(walk_opt(visitor, &s.msg, walk_expr));
            walk_expr(visitor, &s.test)
        }
        Stmt::If(s) => {
            walk_or_stop!(walk_all(visitor, &s.body, walk_stmt));
            walk_or_stop!(walk_all(visitor, &s.orelse, walk_stmt));
            walk_expr(visitor, &s.cond)
        }
        Stmt::Import(s) => {
            walk_or_stop!(walk_string(visitor, &s.path));
            walk_opt(visitor, &s.asname, walk_string)
        }
        Stmt::SchemaAttr(s) => {
            walk_or_stop!(walk_string(visitor, &s.name));
            walk_or_stop!(walk_opt(visitor, &s.value, walk_expr));
            walk_or_stop!(walk_all(visitor, &s.decorators, walk_expr));
            walk_type(visitor, &s.ty)
        }
        Stmt::Schema(s) => {
            walk_or_stop!(walk_opt(visitor, &s.doc, walk_string));
            walk_or_stop!(walk_string(visitor, &s.name));
            walk_or_stop!(walk_opt(visitor, &s.parent_name, walk_identifier));
            walk_or_stop!(walk_opt(visitor, &s.for_host_name, walk_identifier));
            walk_or_stop!(walk_all(visitor, &s.mixins, walk_identifier));
            walk_or_stop!(walk_opt(visitor, &s.args, walk_arguments));
            walk_or_stop!(walk_all(visitor, &s.body, walk_stmt));
            walk_or_stop!(walk_all(visitor, &s.decorators, walk_expr));
            walk_or_stop!(walk_all(visitor, &s.checks, walk_expr));
            walk_opt(visitor, &s.index_signature, walk_index_signature)
        }
        Stmt::Rule(s) => {
            walk_or_stop!(walk_string(visitor, &s.name));
            walk_or_stop!(walk_opt(visitor, &s.doc, walk_string));
            walk_or_stop!(walk_all(visitor, &s.parent_rules, walk_identifier));
            walk_or_stop!(walk_opt(visitor, &s.for_host_name, walk_identifier));
            walk_or_stop!(walk_all(visitor, &s.decorators, walk_expr));
            walk_or_stop!(walk_all(visitor, &s.checks, walk_expr));
            walk_opt(visitor, &s.args, walk_arguments)
        }
    }
}

// ============================================================================
// Expression walk
// ============================================================================

/// Walk an expression and its children.
pub fn walk_expr<V: Visitor>(visitor: &mut V, node: &Node<Expr>) -> VisitResult {
    match visitor.visit_expr(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_expr_children(visitor, &node.node));
        }
    }
    visitor.leave_expr(node);
    VisitResult::Continue
}

fn walk_expr_children<V: Visitor>(visitor: &mut V, expr: &Expr) -> VisitResult {
    match expr {
        Expr::Identifier(_) => VisitResult::Continue,
        Expr::Unary(e) => walk_expr(visitor, &e.operand),
        Expr::Binary(e) => {
            walk_or_stop!(walk_expr(visitor, &e.left));
            walk_expr(visitor, &e.right)
        }
        Expr::If(e) => {
            walk_or_stop!(walk_expr(visitor, &e.body));
            walk_or_stop!(walk_expr(visitor, &e.cond));
            walk_expr(visitor, &e.orelse)
        }
        Expr::Selector(e) => {
            walk_or_stop!(walk_identifier(visitor, &e.attr));
            walk_expr(visitor, &e.value)
        }
        Expr::Call(e) => {
            walk_or_stop!(walk_all(visitor, &e.args, walk_expr));
            walk_or_stop!(walk_expr(visitor, &e.func));
            walk_all(visitor, &e.keywords, walk_keyword)
        }
        Expr::Paren(e) => walk_expr(visitor, &e.expr),
        Expr::Quant(e) => {
            walk_or_stop!(walk_expr(visitor, &e.target));
            walk_or_stop!(walk_expr(visitor, &e.test));
            walk_or_stop!(walk_opt(visitor, &e.if_cond, walk_expr));
            walk_all(visitor, &e.variables, walk_identifier)
        }
        Expr::List(e) => walk_all(visitor, &e.elts, walk_expr),
        Expr::ListIfItem(e) => {
            walk_or_stop!(walk_all(visitor, &e.exprs, walk_expr));
            walk_or_stop!(walk_expr(visitor, &e.if_cond));
            walk_opt(visitor, &e.orelse, walk_expr)
        }
        Expr::ListComp(e) => {
            walk_or_stop!(walk_expr(visitor, &e.elt));
            walk_all(visitor, &e.generators, walk_comp_clause)
        }
        Expr::Starred(e) => walk_expr(visitor, &e.value),
        Expr::DictComp(e) => {
            walk_or_stop!(walk_config_entry_children(visitor, &e.entry));
            walk_all(visitor, &e.generators, walk_comp_clause)
        }
        Expr::ConfigIfEntry(e) => {
            walk_or_stop!(walk_all(visitor, &e.items, walk_config_entry));
            walk_or_stop!(walk_expr(visitor, &e.if_cond));
            walk_opt(visitor, &e.orelse, walk_expr)
        }
        Expr::Schema(e) => walk_schema_config_children(visitor, e),
        Expr::Config(e) => walk_all(visitor, &e.items, walk_config_entry),
        Expr::Check(e) => {
            walk_or_stop!(walk_opt(visitor, &e.if_cond, walk_expr));
            walk_or_stop!(walk_expr(visitor, &e.test));
            walk_opt(visitor, &e.msg, walk_expr)
        }
        Expr::Lambda(e) => {
            walk_or_stop!(walk_opt(visitor, &e.args, walk_arguments));
            walk_or_stop!(walk_all(visitor, &e.body, walk_stmt));
            walk_opt(visitor, &e.return_ty, walk_type)
        }
        Expr::Subscript(e) => {
            walk_or_stop!(walk_expr(visitor, &e.value));
            walk_or_stop!(walk_opt(visitor, &e.index, walk_expr));
            walk_or_stop!(walk_opt(visitor, &e.lower, walk_expr));
            walk_or_stop!(walk_opt(visitor, &e.upper, walk_expr));
            walk_opt(visitor, &e.step, walk_expr)
        }
        Expr::Compare(e) => {
            walk_or_stop!(walk_all(visitor, &e.comparators, walk_expr));
            walk_expr(visitor, &e.left)
        }
        Expr::JoinedString(e) => walk_all(visitor, &e.values, walk_expr),
        Expr::FormattedValue(e) => walk_expr(visitor, &e.value),
        Expr::NumberLit(_) | Expr::StringLit(_) | Expr::NameConstantLit(_) | Expr::Missing(_) => {
            VisitResult::Continue
        }
    }
}

// ============================================================================
// Type walk
// ============================================================================

/// Walk a type annotation and its component types.
pub fn walk_type<V: Visitor>(visitor: &mut V, node: &Node<Type>) -> VisitResult {
    match visitor.visit_type_annotation(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match &node.node {
                Type::Any | Type::Named(_) | Type::Basic(_) | Type::Literal(_) => {
                    VisitResult::Continue
                }
                Type::List(t) => walk_opt(visitor, &t.inner_type, walk_type),
                Type::Dict(t) => {
                    walk_or_stop!(walk_opt(visitor, &t.key_type, walk_type));
                    walk_opt(visitor, &t.value_type, walk_type)
                }
                Type::Union(t) => walk_all(visitor, &t.type_elements, walk_type),
                Type::Function(t) => {
                    if let Some(params) = &t.params_ty {
                        walk_or_stop!(walk_all(visitor, params, walk_type));
                    }
                    walk_opt(visitor, &t.ret_ty, walk_type)
                }
            };
            walk_or_stop!(inner);
        }
    }
    visitor.leave_type_annotation(node);
    VisitResult::Continue
}

// ============================================================================
// Auxiliary walks
// ============================================================================

/// Walk an identifier.
pub fn walk_identifier<V: Visitor>(visitor: &mut V, node: &Node<Identifier>) -> VisitResult {
    if visitor.visit_identifier(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_identifier(node);
    VisitResult::Continue
}

/// Walk a call keyword.
pub fn walk_keyword<V: Visitor>(visitor: &mut V, node: &Node<Keyword>) -> VisitResult {
    match visitor.visit_keyword(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_identifier(visitor, &node.node.arg));
            walk_or_stop!(walk_opt(visitor, &node.node.value, walk_expr));
        }
    }
    visitor.leave_keyword(node);
    VisitResult::Continue
}

/// Walk a config entry.
pub fn walk_config_entry<V: Visitor>(visitor: &mut V, node: &Node<ConfigEntry>) -> VisitResult {
    match visitor.visit_config_entry(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_config_entry_children(visitor, &node.node));
        }
    }
    visitor.leave_config_entry(node);
    VisitResult::Continue
}

fn walk_config_entry_children<V: Visitor>(visitor: &mut V, entry: &ConfigEntry) -> VisitResult {
    walk_or_stop!(walk_opt(visitor, &entry.key, walk_expr));
    walk_expr(visitor, &entry.value)
}

/// Walk a comprehension clause.
pub fn walk_comp_clause<V: Visitor>(visitor: &mut V, node: &Node<CompClause>) -> VisitResult {
    match visitor.visit_comp_clause(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_all(visitor, &node.node.targets, walk_identifier));
            walk_or_stop!(walk_all(visitor, &node.node.ifs, walk_expr));
            walk_or_stop!(walk_expr(visitor, &node.node.iter));
        }
    }
    visitor.leave_comp_clause(node);
    VisitResult::Continue
}

/// Walk a parameter list.
pub fn walk_arguments<V: Visitor>(visitor: &mut V, node: &Node<Arguments>) -> VisitResult {
    match visitor.visit_arguments(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let args = &node.node;
            walk_or_stop!(walk_all(visitor, &args.args, walk_identifier));
            for default in &args.defaults {
                walk_or_stop!(walk_opt(visitor, default, walk_expr));
            }
            for ty in &args.ty_list {
                walk_or_stop!(walk_opt(visitor, ty, walk_type));
            }
        }
    }
    visitor.leave_arguments(node);
    VisitResult::Continue
}

/// Walk a schema instantiation used as a unification value.
pub fn walk_schema_config<V: Visitor>(visitor: &mut V, node: &Node<SchemaConfig>) -> VisitResult {
    match visitor.visit_schema_config(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_schema_config_children(visitor, &node.node));
        }
    }
    visitor.leave_schema_config(node);
    VisitResult::Continue
}

fn walk_schema_config_children<V: Visitor>(visitor: &mut V, config: &SchemaConfig) -> VisitResult {
    walk_or_stop!(walk_identifier(visitor, &config.name));
    walk_or_stop!(walk_all(visitor, &config.args, walk_expr));
    walk_or_stop!(walk_all(visitor, &config.kwargs, walk_keyword));
    walk_expr(visitor, &config.config)
}

/// Walk a schema index signature.
pub fn walk_index_signature<V: Visitor>(
    visitor: &mut V,
    node: &Node<SchemaIndexSignature>,
) -> VisitResult {
    match visitor.visit_index_signature(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let sig = &node.node;
            walk_or_stop!(walk_opt(visitor, &sig.key_name, walk_string));
            walk_or_stop!(walk_type(visitor, &sig.key_ty));
            walk_or_stop!(walk_type(visitor, &sig.value_ty));
            walk_or_stop!(walk_opt(visitor, &sig.value, walk_expr));
        }
    }
    visitor.leave_index_signature(node);
    VisitResult::Continue
}
