//! Labels and the identity manager.
//!
//! Every emitted fact is keyed by a [`Label`]. Labels come from one of two
//! allocation policies:
//!
//! - **Stable**: derived from a [`StableKey`] (a node's intrinsic id plus its
//!   source span, or a path/name for program-level entities). The same key
//!   always maps to the same label within a run, and the key itself is
//!   written out so that re-extracting unchanged source yields the same
//!   identity and separate modules agree on shared entities.
//! - **Fresh**: allocated from a monotonic counter for structural facts whose
//!   identity need not survive across runs (list containers, operators).
//!
//! Both policies draw from one counter, so a fresh label can never collide
//! with a stable one.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::SourceSpan;

// ============================================================================
// Label
// ============================================================================

/// Opaque identifier of an extracted entity, local to one module's facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Label(pub u32);

impl Label {
    /// Create a new label.
    pub fn new(id: u32) -> Self {
        Label(id)
    }

    /// Position of this label in its identity manager's definition table.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Stable Keys
// ============================================================================

/// Deterministic identity of an entity that must be referable from other
/// facts or other modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct StableKey(String);

impl StableKey {
    /// Key for a syntax node: intrinsic id plus file and span.
    pub fn node(id: &str, filename: &str, span: &SourceSpan) -> Self {
        StableKey(format!(
            "{};{{{}}},{}",
            id,
            filename,
            span.to_key_fragment()
        ))
    }

    /// Key for the program root directory.
    pub fn root(path: &str) -> Self {
        StableKey(format!("root;{{{}}}", path))
    }

    /// Key for a package, shared by every module of that package.
    pub fn package(root: &str, name: &str) -> Self {
        StableKey(format!("package;{{{}}},{}", root, name))
    }

    /// Key for a source file.
    pub fn file(path: &str) -> Self {
        StableKey(format!("file;{{{}}}", path))
    }

    /// Key for a module.
    pub fn module(filename: &str) -> Self {
        StableKey(format!("module;{{{}}}", filename))
    }

    /// The key text as written to output.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Label Definitions
// ============================================================================

/// How a label was allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum LabelDef {
    /// Stable label bound to a key.
    Keyed { key: StableKey },
    /// Fresh label with no identity beyond this run.
    Fresh,
}

impl LabelDef {
    /// The stable key, if this is a keyed label.
    pub fn key(&self) -> Option<&StableKey> {
        match self {
            LabelDef::Keyed { key } => Some(key),
            LabelDef::Fresh => None,
        }
    }
}

// ============================================================================
// Identity Manager
// ============================================================================

/// Allocates labels for one extraction run.
///
/// The manager never fails: a label is handed out for every request, and the
/// keyed cache guarantees the same stable key always yields the same label.
/// Labels are numbered densely from zero, so the definition table doubles as
/// a label → definition lookup.
#[derive(Debug, Default)]
pub struct IdentityManager {
    keyed: HashMap<StableKey, Label>,
    definitions: Vec<LabelDef>,
}

impl IdentityManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        IdentityManager::default()
    }

    /// Return the label bound to `key`, allocating it on first use.
    pub fn stable_label(&mut self, key: &StableKey) -> Label {
        if let Some(label) = self.keyed.get(key) {
            return *label;
        }
        let label = self.next_label(LabelDef::Keyed { key: key.clone() });
        self.keyed.insert(key.clone(), label);
        label
    }

    /// Allocate a label distinct from every label returned so far.
    pub fn fresh_label(&mut self) -> Label {
        self.next_label(LabelDef::Fresh)
    }

    /// Look up the label bound to `key` without allocating.
    pub fn lookup(&self, key: &StableKey) -> Option<Label> {
        self.keyed.get(key).copied()
    }

    /// Definition of a previously allocated label.
    pub fn definition(&self, label: Label) -> Option<&LabelDef> {
        self.definitions.get(label.index())
    }

    /// Number of labels allocated so far.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check whether no label has been allocated.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions, indexed by label number.
    pub fn definitions(&self) -> &[LabelDef] {
        &self.definitions
    }

    /// Consume the manager, keeping only the definition table.
    pub fn into_definitions(self) -> Vec<LabelDef> {
        self.definitions
    }

    fn next_label(&mut self, def: LabelDef) -> Label {
        let label = Label::new(self.definitions.len() as u32);
        self.definitions.push(def);
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> SourceSpan {
        SourceSpan::new(1, 0, 1, 5)
    }

    #[test]
    fn stable_label_is_cached() {
        let mut ids = IdentityManager::new();
        let key = StableKey::node("n1", "main.k", &span());
        let a = ids.stable_label(&key);
        let b = ids.stable_label(&key);
        assert_eq!(a, b);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.lookup(&key), Some(a));
    }

    #[test]
    fn fresh_labels_never_collide_with_stable_labels() {
        let mut ids = IdentityManager::new();
        let stable = ids.stable_label(&StableKey::file("main.k"));
        let fresh = ids.fresh_label();
        let again = ids.stable_label(&StableKey::file("main.k"));
        let fresh2 = ids.fresh_label();
        assert_ne!(stable, fresh);
        assert_ne!(fresh, fresh2);
        assert_eq!(stable, again);
        assert_eq!(ids.definition(fresh), Some(&LabelDef::Fresh));
        assert_eq!(
            ids.definition(stable).and_then(LabelDef::key),
            Some(&StableKey::file("main.k"))
        );
    }

    #[test]
    fn same_id_different_span_is_a_different_node() {
        let mut ids = IdentityManager::new();
        let a = ids.stable_label(&StableKey::node("n1", "main.k", &span()));
        let b = ids.stable_label(&StableKey::node(
            "n1",
            "main.k",
            &SourceSpan::new(2, 0, 2, 5),
        ));
        assert_ne!(a, b);
    }

    #[test]
    fn allocation_order_is_deterministic() {
        let run = || {
            let mut ids = IdentityManager::new();
            ids.stable_label(&StableKey::root("/src"));
            ids.fresh_label();
            ids.stable_label(&StableKey::module("main.k"));
            ids.into_definitions()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn node_key_format() {
        let key = StableKey::node("abc", "pkg/main.k", &span());
        assert_eq!(key.as_str(), "abc;{pkg/main.k},1:0:1:5");
        assert_eq!(Label::new(7).to_string(), "#7");
    }
}
