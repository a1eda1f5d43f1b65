//! Traversal context threaded through every recursive extraction call.

use crate::label::Label;

/// Immutable `(parent, current, child index)` triple.
///
/// When a node is about to be visited, `current` is the label of the slot
/// owner (the enclosing node or list container) and `child_index` is the
/// node's position in that slot. [`Context::enter`] turns that into the
/// node's own context, whose `current` is the node itself.
///
/// The enclosing statement is carried along for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    parent: Label,
    current: Label,
    child_index: u32,
    statement: Option<Label>,
}

impl Context {
    /// Create a context with no enclosing statement.
    pub fn new(parent: Label, current: Label, child_index: u32) -> Self {
        Context {
            parent,
            current,
            child_index,
            statement: None,
        }
    }

    /// Copy with a different parent.
    pub fn with_parent(self, parent: Label) -> Self {
        Context { parent, ..self }
    }

    /// Copy with a different current label.
    pub fn with_current(self, current: Label) -> Self {
        Context { current, ..self }
    }

    /// Copy with a different child index.
    pub fn with_child_index(self, child_index: u32) -> Self {
        Context {
            child_index,
            ..self
        }
    }

    /// Copy differing only in child index.
    ///
    /// Used once per independent child slot so that numbering restarts and
    /// never leaks between unrelated slots.
    pub fn with_new_idx(self, child_index: u32) -> Self {
        self.with_child_index(child_index)
    }

    /// Copy recording `statement` as the enclosing statement.
    pub fn with_statement(self, statement: Label) -> Self {
        Context {
            statement: Some(statement),
            ..self
        }
    }

    /// Descend into the node labelled `label`.
    ///
    /// The slot owner becomes the parent, `label` becomes current, and the
    /// child index is kept so the node's own fact can record its position.
    pub fn enter(self, label: Label) -> Self {
        Context {
            parent: self.current,
            current: label,
            ..self
        }
    }

    /// Label of the syntactically enclosing node or container.
    pub fn parent(&self) -> Label {
        self.parent
    }

    /// Label of the node this context belongs to.
    pub fn current(&self) -> Label {
        self.current
    }

    /// Position among siblings of the same slot.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Innermost enclosing statement, if any.
    pub fn statement(&self) -> Option<Label> {
        self.statement
    }
}
