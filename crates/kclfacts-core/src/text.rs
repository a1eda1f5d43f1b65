//! Source text utilities: spans, the line index, and one-line rendering.
//!
//! ## Coordinate Conventions
//!
//! Spans use the frontend's coordinates:
//!
//! - Lines are **1-indexed**
//! - Columns are **0-indexed** and count Unicode scalar values, not bytes
//! - Line offsets in the [`LineIndex`] are **0-indexed** byte offsets
//!
//! Unlike editor positions, nothing here clamps: a span that does not fit its
//! text is reported by [`LineIndex::check_span`] and the caller decides what
//! to do with it.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Source Span
// ============================================================================

/// Start and end position of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    /// Create a span from its four coordinates.
    pub fn new(line: u32, column: u32, end_line: u32, end_column: u32) -> Self {
        SourceSpan {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Compact `l:c:el:ec` form used inside stable keys.
    pub fn to_key_fragment(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.line, self.column, self.end_line, self.end_column
        )
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.line, self.column, self.end_line, self.end_column
        )
    }
}

// ============================================================================
// Line Index
// ============================================================================

/// One physical line of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// 1-based line number.
    pub number: u32,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length in bytes, excluding the line terminator.
    pub length: usize,
    /// Length in characters, excluding the line terminator.
    pub chars: u32,
}

/// Why a span does not fit its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanFault {
    /// A line number is zero or past the last line.
    Line(u32),
    /// A column is past the end of its line.
    Column { line: u32, column: u32 },
    /// The end precedes the start.
    Inverted,
}

/// Line table of one source file.
///
/// Both `\n` and `\r\n` terminate a line. A trailing terminator does not
/// start a new line, so `"a\n"` and `"a"` both have one line, and the empty
/// text has none.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    lines: Vec<LineInfo>,
}

impl<'a> LineIndex<'a> {
    /// Build the line table for `text`.
    pub fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0usize;
        for (i, raw) in text.split_inclusive('\n').enumerate() {
            let content = raw
                .strip_suffix('\n')
                .map(|s| s.strip_suffix('\r').unwrap_or(s))
                .unwrap_or(raw);
            lines.push(LineInfo {
                number: i as u32 + 1,
                offset,
                length: content.len(),
                chars: content.chars().count() as u32,
            });
            offset += raw.len();
        }
        LineIndex { text, lines }
    }

    /// The indexed text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of lines.
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// All lines in order.
    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    /// Info for 1-based line `number`.
    pub fn line(&self, number: u32) -> Option<&LineInfo> {
        let pos = (number as usize).checked_sub(1)?;
        self.lines.get(pos)
    }

    /// Text of 1-based line `number`, without its terminator.
    pub fn line_text(&self, number: u32) -> Option<&'a str> {
        let info = self.line(number)?;
        self.text.get(info.offset..info.offset + info.length)
    }

    /// Check that `span` lies within the text.
    ///
    /// Columns may equal the line length (a position just past the last
    /// character). A span may also end at column 0 of the line after the
    /// last one, which is where the frontend places end-of-file positions.
    pub fn check_span(&self, span: &SourceSpan) -> Result<(), SpanFault> {
        let start = self.line(span.line).ok_or(SpanFault::Line(span.line))?;
        if span.column > start.chars {
            return Err(SpanFault::Column {
                line: span.line,
                column: span.column,
            });
        }
        match self.line(span.end_line) {
            Some(end) => {
                if span.end_column > end.chars {
                    return Err(SpanFault::Column {
                        line: span.end_line,
                        column: span.end_column,
                    });
                }
            }
            None => {
                let eof = span.end_line == self.line_count() + 1 && span.end_column == 0;
                if !eof {
                    return Err(SpanFault::Line(span.end_line));
                }
            }
        }
        if (span.end_line, span.end_column) < (span.line, span.column) {
            return Err(SpanFault::Inverted);
        }
        Ok(())
    }

    /// Source text covered by `span`, or `None` if it does not fit.
    pub fn slice(&self, span: &SourceSpan) -> Option<&'a str> {
        self.check_span(span).ok()?;
        let start = self.byte_offset(span.line, span.column)?;
        let end = self.byte_offset(span.end_line, span.end_column)?;
        self.text.get(start..end)
    }

    /// Byte offset of a line and 0-based character column.
    fn byte_offset(&self, line: u32, column: u32) -> Option<usize> {
        match self.line(line) {
            Some(info) => {
                let content = self.text.get(info.offset..info.offset + info.length)?;
                let within = content
                    .char_indices()
                    .nth(column as usize)
                    .map(|(i, _)| i)
                    .unwrap_or(content.len());
                Some(info.offset + within)
            }
            None if line == self.line_count() + 1 => Some(self.text.len()),
            None => None,
        }
    }

    /// Line metrics: total lines, lines with code, and comment-only lines.
    pub fn metrics(&self) -> LineMetrics {
        let mut metrics = LineMetrics {
            lines: self.line_count(),
            ..LineMetrics::default()
        };
        for info in &self.lines {
            let content = &self.text[info.offset..info.offset + info.length];
            let trimmed = content.trim_start();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('#') {
                metrics.comments += 1;
            } else {
                metrics.code += 1;
            }
        }
        metrics
    }
}

/// Summary counts over a file's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMetrics {
    pub lines: u32,
    pub code: u32,
    pub comments: u32,
}

// ============================================================================
// One-line Rendering
// ============================================================================

/// Render `text` on a single line of at most `width` characters.
///
/// Runs of whitespace (newlines included) collapse to one space and the
/// result is trimmed. Longer results are cut and end in `...`, which counts
/// toward `width`.
pub fn render_one_line(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }
    const ELLIPSIS: &str = "...";
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
