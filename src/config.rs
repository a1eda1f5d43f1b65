//! Extraction run configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default maximum width of rendered source snippets.
pub const DEFAULT_SNIPPET_WIDTH: usize = 100;

/// On-disk format of emitted facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Trap,
    Json,
}

impl OutputFormat {
    /// Output subdirectory and file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Trap => "trap",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trap" => Ok(OutputFormat::Trap),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected trap or json", other)),
        }
    }
}

/// Knobs for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum characters of the one-line rendering of a node.
    pub snippet_width: usize,
    /// Emit the `comments` relation.
    pub emit_comments: bool,
    /// Emit the `lines` and `numlines` relations.
    pub emit_lines: bool,
    /// Resolve identifiers against the symbol table and emit `schema_refs`.
    pub resolve_schemas: bool,
    pub output_format: OutputFormat,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            snippet_width: DEFAULT_SNIPPET_WIDTH,
            emit_comments: true,
            emit_lines: true,
            resolve_schemas: true,
            output_format: OutputFormat::Trap,
        }
    }
}

impl ExtractorConfig {
    /// Set the snippet width.
    pub fn with_snippet_width(mut self, width: usize) -> Self {
        self.snippet_width = width;
        self
    }

    /// Set the output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable comment facts.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.emit_comments = enabled;
        self
    }

    /// Enable or disable line facts.
    pub fn with_lines(mut self, enabled: bool) -> Self {
        self.emit_lines = enabled;
        self
    }

    /// Enable or disable schema cross-references.
    pub fn with_schema_refs(mut self, enabled: bool) -> Self {
        self.resolve_schemas = enabled;
        self
    }
}
