// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Program, module and comment nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{NodeRef, Stmt};

/// A whole KCL program: the root directory and its packages.
///
/// Packages are kept in a sorted map so every walk over them is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub root: String,
    #[serde(default)]
    pub pkgs: BTreeMap<String, Vec<Module>>,
}

impl Program {
    /// Iterate `(package name, module)` pairs in package order, then
    /// module order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &Module)> {
        self.pkgs
            .iter()
            .flat_map(|(pkg, modules)| modules.iter().map(move |m| (pkg.as_str(), m)))
    }

    /// Total number of modules.
    pub fn module_count(&self) -> usize {
        self.pkgs.values().map(Vec::len).sum()
    }
}

/// One source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub filename: String,
    #[serde(default)]
    pub pkg: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub doc: Option<NodeRef<String>>,
    #[serde(default)]
    pub body: Vec<NodeRef<Stmt>>,
    #[serde(default)]
    pub comments: Vec<NodeRef<Comment>>,
}

/// A `#` comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}
