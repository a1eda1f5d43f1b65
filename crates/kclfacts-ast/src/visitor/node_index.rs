// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! NodeIndexCollector: program-wide table of located nodes.
//!
//! The cross-referencer has to turn a definition's intrinsic id back into
//! something it can label, possibly in a module other than the one being
//! extracted. [`NodeIndex`] records, for every located node in a program,
//! where it lives, plus the link from each schema's name node to the schema
//! statement itself.
//!
//! # Usage
//!
//! ```ignore
//! use kclfacts_ast::NodeIndex;
//!
//! let index = NodeIndex::build(&bundle.program);
//! if let Some(schema) = index.schema_of_name(&name_id) {
//!     let info = index.get(schema);
//! }
//! ```

use std::collections::HashMap;

use kclfacts_core::text::SourceSpan;
use tracing::debug;

use super::dispatch::walk_module;
use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    Arguments, Comment, CompClause, ConfigEntry, Expr, Identifier, Keyword, Node, NodeId, Program,
    SchemaConfig, SchemaIndexSignature, Stmt, Type,
};

/// Family of a located node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    Stmt,
    Expr,
    Type,
    Identifier,
    String,
    Keyword,
    ConfigEntry,
    CompClause,
    Arguments,
    SchemaConfig,
    IndexSignature,
    Comment,
}

/// Where a node lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub filename: String,
    pub span: SourceSpan,
    pub family: NodeFamily,
}

/// Intrinsic id → node info for a whole program.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: HashMap<NodeId, NodeInfo>,
    schemas: HashMap<NodeId, NodeId>,
    duplicates: usize,
}

impl NodeIndex {
    /// Index every module of `program`.
    pub fn build(program: &Program) -> Self {
        let mut collector = NodeIndexCollector::default();
        for (_, module) in program.modules() {
            let _ = walk_module(&mut collector, module);
        }
        let index = collector.into_index();
        debug!(
            nodes = index.nodes.len(),
            schemas = index.schemas.len(),
            duplicates = index.duplicates,
            "built node index"
        );
        index
    }

    /// Info for the node with intrinsic id `id`.
    pub fn get(&self, id: &NodeId) -> Option<&NodeInfo> {
        self.nodes.get(id)
    }

    /// Schema statement whose name node is `name_id`.
    pub fn schema_of_name(&self, name_id: &NodeId) -> Option<&NodeId> {
        self.schemas.get(name_id)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of ids that were seen more than once.
    ///
    /// The first occurrence wins.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    fn record<T>(&mut self, node: &Node<T>, family: NodeFamily) {
        if self.nodes.contains_key(&node.id) {
            self.duplicates += 1;
            return;
        }
        self.nodes.insert(
            node.id.clone(),
            NodeInfo {
                filename: node.filename.clone(),
                span: node.span(),
                family,
            },
        );
    }
}

/// Visitor that fills a [`NodeIndex`].
#[derive(Debug, Default)]
pub struct NodeIndexCollector {
    index: NodeIndex,
}

impl NodeIndexCollector {
    /// Finish and return the index.
    pub fn into_index(self) -> NodeIndex {
        self.index
    }
}

impl Visitor for NodeIndexCollector {
    fn visit_stmt(&mut self, node: &Node<Stmt>) -> VisitResult {
        self.index.record(node, NodeFamily::Stmt);
        if let Stmt::Schema(schema) = &node.node {
            self.index
                .schemas
                .insert(schema.name.id.clone(), node.id.clone());
        }
        VisitResult::Continue
    }

    fn visit_expr(&mut self, node: &Node<Expr>) -> VisitResult {
        self.index.record(node, NodeFamily::Expr);
        VisitResult::Continue
    }

    fn visit_type_annotation(&mut self, node: &Node<Type>) -> VisitResult {
        self.index.record(node, NodeFamily::Type);
        VisitResult::Continue
    }

    fn visit_identifier(&mut self, node: &Node<Identifier>) -> VisitResult {
        self.index.record(node, NodeFamily::Identifier);
        VisitResult::Continue
    }

    fn visit_string(&mut self, node: &Node<String>) -> VisitResult {
        self.index.record(node, NodeFamily::String);
        VisitResult::Continue
    }

    fn visit_keyword(&mut self, node: &Node<Keyword>) -> VisitResult {
        self.index.record(node, NodeFamily::Keyword);
        VisitResult::Continue
    }

    fn visit_config_entry(&mut self, node: &Node<ConfigEntry>) -> VisitResult {
        self.index.record(node, NodeFamily::ConfigEntry);
        VisitResult::Continue
    }

    fn visit_comp_clause(&mut self, node: &Node<CompClause>) -> VisitResult {
        self.index.record(node, NodeFamily::CompClause);
        VisitResult::Continue
    }

    fn visit_arguments(&mut self, node: &Node<Arguments>) -> VisitResult {
        self.index.record(node, NodeFamily::Arguments);
        VisitResult::Continue
    }

    fn visit_schema_config(&mut self, node: &Node<SchemaConfig>) -> VisitResult {
        self.index.record(node, NodeFamily::SchemaConfig);
        VisitResult::Continue
    }

    fn visit_index_signature(&mut self, node: &Node<SchemaIndexSignature>) -> VisitResult {
        self.index.record(node, NodeFamily::IndexSignature);
        VisitResult::Continue
    }

    fn visit_comment(&mut self, node: &Node<Comment>) -> VisitResult {
        self.index.record(node, NodeFamily::Comment);
        VisitResult::Continue
    }
}
