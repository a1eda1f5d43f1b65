// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! KCL syntax tree model for kclfacts.
//!
//! The external KCL frontend parses source files and resolves symbols; this
//! crate reads its output and makes it walkable.
//!
//! # Overview
//!
//! - **Nodes**: [`Program`], [`Module`], [`Stmt`], [`Expr`], [`Type`] and
//!   the auxiliary constructs, each located node wrapped in a [`Node`].
//! - **Symbols**: the frontend's [`SymbolTable`].
//! - **Bundles**: [`ParseBundle`] loads both from one JSON document.
//! - **Traversal**: the [`Visitor`] trait, `walk_*` functions, and the
//!   program-wide [`NodeIndex`].

// ============================================================================
// Public modules and re-exports
// ============================================================================

pub mod bundle;
pub use bundle::{is_bundle_path, ParseBundle, BUNDLE_SUFFIX};

pub mod nodes;
pub use nodes::*;

pub mod symbol;
pub use symbol::{KclType, Symbol, SymbolId, SymbolTable, TypeKind};

pub mod visitor;
pub use visitor::{NodeFamily, NodeIndex, NodeInfo, VisitResult, Visitor};
