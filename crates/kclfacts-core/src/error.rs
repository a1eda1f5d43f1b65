//! Error types and exit code constants for kclfacts.
//!
//! ## Error Taxonomy
//!
//! - **Unsupported variant**: the syntax tree carries a variant the extractor
//!   does not know. Fatal for the module that carries it.
//! - **Span out of bounds**: a node's location lies outside its source text.
//!   Fatal for the module.
//! - **Parse failure**: the upstream frontend output could not be read or
//!   decoded. A broken bundle envelope skips the bundle; a broken module
//!   tree skips that module.
//!
//! Cross-reference inconsistencies are not represented here: they are
//! recovered inside the extractor and never abort a module.
//!
//! ## Exit Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Parse failures (unreadable bundles, malformed module trees)
//! - `4`: Extraction failures (a module aborted)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;

use thiserror::Error;

use crate::text::SourceSpan;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for the run summary and CLI exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// An input bundle could not be read or decoded.
    ParseFailure = 3,
    /// At least one module aborted during extraction.
    ExtractionFailure = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Extraction Errors
// ============================================================================

/// Errors that abort extraction of a bundle or a module.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The caller asked for something that cannot be done.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// A node variant has no case in the extractor.
    #[error("unsupported {family} variant: {detail}")]
    UnsupportedVariant { family: String, detail: String },

    /// A node's span does not fit inside its source text.
    #[error("node {node} spans {span} but {file} has {lines} lines")]
    SpanOutOfBounds {
        node: String,
        file: String,
        span: SourceSpan,
        lines: u32,
    },

    /// The upstream parse result could not be read or decoded.
    #[error("parse failed for {path}: {message}")]
    Parse { path: String, message: String },

    /// Reading source text or writing output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding of emitted facts failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        ExtractError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::InvalidArguments { .. } => "invalid_arguments",
            ExtractError::UnsupportedVariant { .. } => "unsupported_variant",
            ExtractError::SpanOutOfBounds { .. } => "span_out_of_bounds",
            ExtractError::Parse { .. } => "parse_failure",
            ExtractError::Io { .. } => "io",
            ExtractError::Json(_) => "json",
        }
    }
}

impl From<&ExtractError> for OutputErrorCode {
    fn from(err: &ExtractError) -> Self {
        match err {
            ExtractError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            ExtractError::Parse { .. } => OutputErrorCode::ParseFailure,
            ExtractError::UnsupportedVariant { .. } | ExtractError::SpanOutOfBounds { .. } => {
                OutputErrorCode::ExtractionFailure
            }
            ExtractError::Io { .. } => OutputErrorCode::ExtractionFailure,
            ExtractError::Json(_) => OutputErrorCode::InternalError,
        }
    }
}
