//! Location Mapper: spans, snippets and line facts for one module.
//!
//! Every located node is checked against the module's source text before it
//! is labelled. A span that does not fit is an upstream defect and aborts the
//! module with [`ExtractError::SpanOutOfBounds`]; nothing is clamped.

use kclfacts_ast::Node;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::{FactStore, Table};
use kclfacts_core::label::Label;
use kclfacts_core::text::{render_one_line, LineIndex, SourceSpan};

/// Maps nodes of one module to locations and snippets.
#[derive(Debug)]
pub struct LocationMapper<'a> {
    filename: &'a str,
    file_label: Label,
    index: LineIndex<'a>,
    snippet_width: usize,
}

impl<'a> LocationMapper<'a> {
    /// Create a mapper over `text`, the source of `filename`.
    pub fn new(filename: &'a str, text: &'a str, file_label: Label, snippet_width: usize) -> Self {
        LocationMapper {
            filename,
            file_label,
            index: LineIndex::new(text),
            snippet_width,
        }
    }

    /// Label of the file locations refer to.
    pub fn file_label(&self) -> Label {
        self.file_label
    }

    /// The module's line index.
    pub fn line_index(&self) -> &LineIndex<'a> {
        &self.index
    }

    /// Verify that `node` lies within the source text.
    pub fn check<T>(&self, node: &Node<T>) -> Result<SourceSpan, ExtractError> {
        let span = node.span();
        self.index
            .check_span(&span)
            .map_err(|_| ExtractError::SpanOutOfBounds {
                node: node.id.to_string(),
                file: self.filename.to_string(),
                span,
                lines: self.index.line_count(),
            })?;
        Ok(span)
    }

    /// One-line rendering of the source covered by `span`.
    pub fn snippet(&self, span: &SourceSpan) -> String {
        self.index
            .slice(span)
            .map(|text| render_one_line(text, self.snippet_width))
            .unwrap_or_default()
    }

    /// One-line rendering of the whole of line `number`.
    pub fn line_snippet(&self, number: u32) -> String {
        self.index
            .line_text(number)
            .map(|text| render_one_line(text, self.snippet_width))
            .unwrap_or_default()
    }

    /// Emit the location fact of `label`.
    pub fn emit_location(&self, facts: &mut FactStore, label: Label, span: &SourceSpan) {
        facts.add(
            Table::Locations,
            vec![
                label.into(),
                self.file_label.into(),
                span.line.into(),
                span.column.into(),
                span.end_line.into(),
                span.end_column.into(),
            ],
        );
    }

    /// Emit the line table and line metrics of the file.
    pub fn emit_lines(&self, facts: &mut FactStore) {
        for line in self.index.lines() {
            facts.add(
                Table::Lines,
                vec![
                    self.file_label.into(),
                    line.number.into(),
                    line.offset.into(),
                    line.length.into(),
                ],
            );
        }
        let metrics = self.index.metrics();
        facts.add(
            Table::Numlines,
            vec![
                self.file_label.into(),
                metrics.lines.into(),
                metrics.code.into(),
                metrics.comments.into(),
            ],
        );
    }
}
