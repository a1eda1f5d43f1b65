//! Traversal/Emission Engine.
//!
//! A [`Session`] owns everything one module's extraction mutates: the
//! identity manager, the fact store and the cross-reference counters. The
//! identity manager's key cache is the node → label table: a node's stable
//! key is derived from its intrinsic id and span, so asking for the key
//! again, from this module or through a cross reference, yields the same
//! label. Nothing is shared between sessions, so a failing module cannot
//! disturb another module's facts.
//!
//! Traversal is a pre-order, left-to-right walk over each node's declared
//! child slots. For every located node the engine:
//!
//! 1. checks its span and allocates its stable label,
//! 2. emits its own tuple (label, kind, slot owner, child index, snippet),
//! 3. recurses into its slots, each starting its index at a fixed value,
//! 4. emits its location last.
//!
//! The family visitors live in submodules:
//! - [`stmt`]: statements
//! - [`expr`]: expressions, literals and operators
//! - [`types`]: type annotations
//! - [`auxiliary`]: identifiers, strings and the auxiliary constructs

mod auxiliary;
mod expr;
pub mod kinds;
mod stmt;
mod types;

use kclfacts_ast::{Comment, Module, Node, NodeId, NodeRef};
use kclfacts_core::context::Context;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::{FactStore, Table, Value};
use kclfacts_core::hash::ContentHash;
use kclfacts_core::label::{IdentityManager, Label, LabelDef, StableKey};
use kclfacts_core::text::SourceSpan;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::location::LocationMapper;
use crate::xref::CrossReferencer;

/// Visitor of one located node family.
type VisitFn<'a, T> = fn(&mut Session<'a>, &Node<T>, Context) -> Result<(), ExtractError>;

// ============================================================================
// Module facts
// ============================================================================

/// Cross-reference outcome counters for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct XrefStats {
    /// Links emitted.
    pub linked: usize,
    /// Inconsistencies recovered from.
    pub inconsistent: usize,
}

/// Everything extracted from one module.
#[derive(Debug)]
pub struct ModuleFacts {
    pub filename: String,
    pub definitions: Vec<LabelDef>,
    pub facts: FactStore,
    pub xref: XrefStats,
}

/// Where a module sits in its program.
#[derive(Debug, Clone, Copy)]
pub struct ModuleSite<'a> {
    pub root: &'a str,
    pub package: &'a str,
    /// Position of the module within its package.
    pub index: u32,
}

// ============================================================================
// Session
// ============================================================================

/// Extraction state for a single module.
pub struct Session<'a> {
    config: &'a ExtractorConfig,
    ids: IdentityManager,
    facts: FactStore,
    locations: LocationMapper<'a>,
    xref: Option<CrossReferencer<'a>>,
    stats: XrefStats,
}

impl<'a> Session<'a> {
    /// Start a session for the module stored in `filename` with source
    /// `text`.
    ///
    /// The file's stable label is allocated first, so it is `#0`.
    pub fn new(
        config: &'a ExtractorConfig,
        filename: &'a str,
        text: &'a str,
        xref: Option<CrossReferencer<'a>>,
    ) -> Self {
        let mut ids = IdentityManager::new();
        let file_label = ids.stable_label(&StableKey::file(filename));
        Session {
            config,
            ids,
            facts: FactStore::new(),
            locations: LocationMapper::new(filename, text, file_label, config.snippet_width),
            xref: if config.resolve_schemas { xref } else { None },
            stats: XrefStats::default(),
        }
    }

    /// Extract `module` and return its facts.
    ///
    /// Emits, in order: the program structure (root, package, file, module),
    /// the body, the comments and the line table.
    pub fn extract_module(
        mut self,
        site: ModuleSite<'_>,
        module: &Module,
    ) -> Result<ModuleFacts, ExtractError> {
        let text = self.locations.line_index().text();
        let file_label = self.locations.file_label();

        let root = self.ids.stable_label(&StableKey::root(site.root));
        self.add(Table::Roots, vec![root.into(), site.root.into()]);

        let package = self
            .ids
            .stable_label(&StableKey::package(site.root, site.package));
        self.add(
            Table::Packages,
            vec![package.into(), site.package.into(), root.into()],
        );

        let hash = ContentHash::compute(text.as_bytes());
        self.add(
            Table::Files,
            vec![
                file_label.into(),
                module.filename.as_str().into(),
                hash.as_str().into(),
            ],
        );

        let module_label = self.ids.stable_label(&StableKey::module(&module.filename));
        self.add(
            Table::Modules,
            vec![
                module_label.into(),
                module.name.as_str().into(),
                file_label.into(),
                package.into(),
                site.index.into(),
            ],
        );

        let ctx = Context::new(package, module_label, 0);
        self.visit_list(&module.body, Table::StmtLists, ctx, Self::visit_stmt)?;

        if self.config.emit_comments {
            for (i, comment) in module.comments.iter().enumerate() {
                let comment: &Node<Comment> = comment;
                let (label, span) = self.label_node(comment)?;
                let line_text = self.locations.line_snippet(span.line);
                self.add(
                    Table::Comments,
                    vec![
                        label.into(),
                        module_label.into(),
                        i.into(),
                        comment.node.text.as_str().into(),
                        line_text.into(),
                    ],
                );
                self.finish_node(label, &span);
            }
        }

        if self.config.emit_lines {
            self.locations.emit_lines(&mut self.facts);
        }

        debug!(
            facts = self.facts.len(),
            labels = self.ids.len(),
            schema_refs = self.stats.linked,
            "module extracted"
        );

        Ok(ModuleFacts {
            filename: module.filename.clone(),
            definitions: self.ids.into_definitions(),
            facts: self.facts,
            xref: self.stats,
        })
    }

    // ------------------------------------------------------------------------
    // Emission primitives
    // ------------------------------------------------------------------------

    fn add(&mut self, table: Table, values: Vec<Value>) {
        self.facts.add(table, values);
    }

    fn fresh(&mut self) -> Label {
        self.ids.fresh_label()
    }

    /// Check a node's span and allocate its stable label.
    fn label_node<T>(&mut self, node: &Node<T>) -> Result<(Label, SourceSpan), ExtractError> {
        let span = self.locations.check(node)?;
        let key = StableKey::node(node.id.as_str(), &node.filename, &span);
        let label = self.ids.stable_label(&key);
        Ok((label, span))
    }

    /// Emit the location fact that closes a node's block.
    fn finish_node(&mut self, label: Label, span: &SourceSpan) {
        self.locations.emit_location(&mut self.facts, label, span);
    }

    fn snippet(&self, span: &SourceSpan) -> String {
        self.locations.snippet(span)
    }

    // ------------------------------------------------------------------------
    // Slots
    // ------------------------------------------------------------------------

    /// Visit an optional single-valued slot.
    fn visit_opt<T>(
        &mut self,
        node: &Option<NodeRef<T>>,
        ctx: Context,
        visit: VisitFn<'a, T>,
    ) -> Result<(), ExtractError> {
        match node {
            Some(node) => visit(self, node, ctx),
            None => Ok(()),
        }
    }

    /// Visit a list slot: a container in `table`, then each element in
    /// order. Nothing is emitted for an empty list.
    fn visit_list<T>(
        &mut self,
        nodes: &[NodeRef<T>],
        table: Table,
        ctx: Context,
        visit: VisitFn<'a, T>,
    ) -> Result<(), ExtractError> {
        if nodes.is_empty() {
            return Ok(());
        }
        let list = self.open_list(table, ctx);
        for (i, node) in nodes.iter().enumerate() {
            visit(self, node, list.with_new_idx(i as u32))?;
        }
        Ok(())
    }

    /// Visit a list slot whose elements are aligned with another list.
    ///
    /// Elements keep their position as index; absent positions are
    /// skipped. Nothing is emitted if every position is absent.
    fn visit_positional<T>(
        &mut self,
        nodes: &[Option<NodeRef<T>>],
        table: Table,
        ctx: Context,
        visit: VisitFn<'a, T>,
    ) -> Result<(), ExtractError> {
        if nodes.iter().all(Option::is_none) {
            return Ok(());
        }
        let list = self.open_list(table, ctx);
        for (i, node) in nodes.iter().enumerate() {
            if let Some(node) = node {
                visit(self, node, list.with_new_idx(i as u32))?;
            }
        }
        Ok(())
    }

    /// Emit a list container and return the context its elements hang off.
    fn open_list(&mut self, table: Table, ctx: Context) -> Context {
        let list = self.fresh();
        self.add(
            table,
            vec![list.into(), ctx.current().into(), ctx.child_index().into()],
        );
        ctx.enter(list)
    }

    // ------------------------------------------------------------------------
    // Cross references
    // ------------------------------------------------------------------------

    /// Link `label` to the schema the node `id` resolves to, if any.
    ///
    /// Inconsistent symbol tables cost the link and nothing else.
    fn link_schema(&mut self, id: &NodeId, label: Label, ctx: Context) {
        let Some(xref) = self.xref else {
            return;
        };
        match xref.resolve(id, &mut self.ids) {
            Ok(Some(schema)) => {
                self.add(Table::SchemaRefs, vec![label.into(), schema.into()]);
                self.stats.linked += 1;
            }
            Ok(None) => {}
            Err(err) => {
                self.stats.inconsistent += 1;
                warn!(
                    node = %id,
                    statement = ?ctx.statement(),
                    error = %err,
                    "skipping schema reference"
                );
            }
        }
    }
}
