// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! KCL syntax tree node types.
//!
//! The tree is produced by the external KCL frontend and read here through
//! serde. Every located node is wrapped in a [`Node`], which carries the
//! frontend's intrinsic id and the node's source span.
//!
//! Statement, expression and type families are closed sum types. A tag the
//! model does not know fails deserialization, which the bundle loader
//! reports as an unsupported variant.

mod expression;
mod module;
mod op;
mod statement;
mod types;

use std::fmt;

use kclfacts_core::text::SourceSpan;
use serde::{Deserialize, Serialize};

pub use expression::*;
pub use module::*;
pub use op::*;
pub use statement::*;
pub use types::*;

// ============================================================================
// Node wrapper
// ============================================================================

/// Intrinsic id the frontend assigned to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// The id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A located syntax node.
///
/// Lines are 1-based; columns are 0-based character offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<T> {
    pub id: NodeId,
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub node: T,
}

/// Owned child node.
pub type NodeRef<T> = Box<Node<T>>;

impl<T> Node<T> {
    /// Wrap `node` with an id and location.
    pub fn new(id: impl Into<String>, filename: impl Into<String>, span: SourceSpan, node: T) -> Self {
        Node {
            id: NodeId::new(id),
            filename: filename.into(),
            line: span.line,
            column: span.column,
            end_line: span.end_line,
            end_column: span.end_column,
            node,
        }
    }

    /// The node's source span.
    pub fn span(&self) -> SourceSpan {
        SourceSpan::new(self.line, self.column, self.end_line, self.end_column)
    }
}
