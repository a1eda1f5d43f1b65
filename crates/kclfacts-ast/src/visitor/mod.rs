// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only traversal of KCL syntax trees.
//!
//! - [`Visitor`]: `visit_*` / `leave_*` callbacks per located node family
//! - `walk_*` functions: drive a visitor over a subtree
//! - [`NodeIndex`]: program-wide intrinsic id table built with a visitor

mod dispatch;
mod node_index;
mod traits;

pub use dispatch::{
    walk_arguments, walk_comment, walk_comp_clause, walk_config_entry, walk_expr,
    walk_identifier, walk_index_signature, walk_keyword, walk_module, walk_schema_config,
    walk_stmt, walk_string, walk_type,
};
pub use node_index::{NodeFamily, NodeIndex, NodeIndexCollector, NodeInfo};
pub use traits::{VisitResult, Visitor};
