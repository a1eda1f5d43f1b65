// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definition for read-only syntax tree traversal.

use crate::nodes::{
    Arguments, Comment, CompClause, ConfigEntry, Expr, Identifier, Keyword, Module, Node,
    SchemaConfig, SchemaIndexSignature, Stmt, Type,
};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// `leave_*` is still called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called.
    Stop,
}

/// Generates `visit_*` / `leave_*` method pairs with default bodies.
///
/// ```ignore
/// visitor_methods! {
///     // Generates visit_stmt and leave_stmt for Node<Stmt>
///     stmt: Node<Stmt>,
/// }
/// ```
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a `", stringify!($node_type), "`.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a `", stringify!($node_type), "`.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Immutable visitor over a KCL syntax tree.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order
///
/// Only located nodes get callbacks. Operators, contexts and bare strings
/// are reached through their owners.
///
/// # Example
///
/// ```ignore
/// use kclfacts_ast::{Identifier, Node, Visitor, VisitResult};
///
/// struct NameCollector {
///     names: Vec<String>,
/// }
///
/// impl Visitor for NameCollector {
///     fn visit_identifier(&mut self, node: &Node<Identifier>) -> VisitResult {
///         self.names.push(node.node.name());
///         VisitResult::Continue
///     }
/// }
/// ```
pub trait Visitor {
    visitor_methods! {
        module: Module,
        comment: Node<Comment>,
        stmt: Node<Stmt>,
        expr: Node<Expr>,
        type_annotation: Node<Type>,
        identifier: Node<Identifier>,
        string: Node<String>,
        keyword: Node<Keyword>,
        config_entry: Node<ConfigEntry>,
        comp_clause: Node<CompClause>,
        arguments: Node<Arguments>,
        schema_config: Node<SchemaConfig>,
        index_signature: Node<SchemaIndexSignature>,
    }
}
