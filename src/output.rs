//! Fact files and the JSON run summary.
//!
//! ## Layout
//!
//! Each extracted module produces one file under the output directory:
//!
//! - TRAP: `<output>/trap/<module path>.trap`
//! - JSON: `<output>/json/<module path>.json`
//!
//! The module path is the module's filename with root and parent components
//! neutralised, so every file lands inside the output directory.
//!
//! ## Run summary
//!
//! The summary is the single JSON document written to stdout. Like every
//! response it leads with `status` and carries a schema version; lists keep
//! input order so the same inputs produce the same bytes.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use kclfacts_core::error::{ExtractError, OutputErrorCode};
use kclfacts_core::facts::FACTS_SCHEMA_VERSION;
use kclfacts_core::writer::{to_json, write_trap};
use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::extractor::ModuleFacts;

/// Current schema version of the run summary.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Fact files
// ============================================================================

/// Relative path of a module inside an output tree, without extension.
pub fn module_relative_path(filename: &str) -> PathBuf {
    let mut rel = PathBuf::new();
    for component in Path::new(filename).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::ParentDir => rel.push("__"),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    if rel.as_os_str().is_empty() {
        rel.push("module");
    }
    rel
}

/// Where the facts of `filename` are written.
pub fn module_output_path(out_dir: &Path, format: OutputFormat, filename: &str) -> PathBuf {
    let rel = module_relative_path(filename);
    let mut name = rel.into_os_string();
    name.push(".");
    name.push(format.extension());
    out_dir.join(format.extension()).join(name)
}

/// Write one module's facts and return the path written.
pub fn write_module(
    out_dir: &Path,
    format: OutputFormat,
    facts: &ModuleFacts,
) -> Result<PathBuf, ExtractError> {
    let path = module_output_path(out_dir, format, &facts.filename);
    let display = path.display().to_string();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExtractError::io(&display, e))?;
    }
    let file = File::create(&path).map_err(|e| ExtractError::io(&display, e))?;
    let mut out = BufWriter::new(file);

    match format {
        OutputFormat::Trap => {
            let header = vec![format!("module {}", facts.filename)];
            write_trap(&mut out, &header, &facts.definitions, &facts.facts)
                .map_err(|e| ExtractError::io(&display, e))?;
        }
        OutputFormat::Json => {
            let doc = to_json(&facts.filename, &facts.definitions, &facts.facts);
            serde_json::to_writer_pretty(&mut out, &doc)?;
            writeln!(out).map_err(|e| ExtractError::io(&display, e))?;
        }
    }
    out.flush().map_err(|e| ExtractError::io(&display, e))?;
    Ok(path)
}

// ============================================================================
// Run summary
// ============================================================================

/// A module whose facts were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedModule {
    pub module: String,
    pub package: String,
    /// Path of the written fact file.
    pub output: String,
    pub facts: usize,
    pub labels: usize,
    pub schema_refs: usize,
    /// Cross references skipped because the symbol table was inconsistent.
    #[serde(skip_serializing_if = "is_zero", default)]
    pub skipped_refs: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// A bundle or module that produced no facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Bundle path, or module filename.
    pub input: String,
    /// Machine-readable error kind, e.g. `span_out_of_bounds`.
    pub kind: String,
    /// Numeric error code.
    pub code: u8,
    pub message: String,
}

impl Failure {
    pub fn from_error(input: impl Into<String>, err: &ExtractError) -> Self {
        Failure {
            input: input.into(),
            kind: err.kind().to_string(),
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// Summary of an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// `ok` if every bundle and module succeeded, `error` otherwise.
    pub status: String,
    pub schema_version: String,
    /// Version of the fact schema the files were written in.
    pub facts_schema_version: u32,
    pub format: OutputFormat,
    pub bundles: usize,
    pub modules: usize,
    pub extracted: Vec<ExtractedModule>,
    pub failures: Vec<Failure>,
}

impl RunSummary {
    pub fn new(format: OutputFormat) -> Self {
        RunSummary {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            facts_schema_version: FACTS_SCHEMA_VERSION,
            format,
            bundles: 0,
            modules: 0,
            extracted: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record_extracted(&mut self, module: ExtractedModule) {
        self.modules += 1;
        self.extracted.push(module);
    }

    pub fn record_module_failure(&mut self, filename: &str, err: &ExtractError) {
        self.modules += 1;
        self.record_failure(Failure::from_error(filename, err));
    }

    pub fn record_failure(&mut self, failure: Failure) {
        self.status = "error".to_string();
        self.failures.push(failure);
    }

    /// The most severe failure code, or `None` if the run succeeded.
    ///
    /// Parse failures outrank module failures.
    pub fn exit_code(&self) -> Option<OutputErrorCode> {
        let mut worst: Option<OutputErrorCode> = None;
        for failure in &self.failures {
            let code = match failure.code {
                2 => OutputErrorCode::InvalidArguments,
                3 => OutputErrorCode::ParseFailure,
                4 => OutputErrorCode::ExtractionFailure,
                _ => OutputErrorCode::InternalError,
            };
            worst = Some(match worst {
                Some(prev) if rank(prev) >= rank(code) => prev,
                _ => code,
            });
        }
        worst
    }
}

fn rank(code: OutputErrorCode) -> u8 {
    match code {
        OutputErrorCode::ExtractionFailure => 1,
        OutputErrorCode::ParseFailure => 2,
        OutputErrorCode::InvalidArguments => 3,
        OutputErrorCode::InternalError => 4,
    }
}

/// Error response for runs that could not start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub schema_version: String,
    pub error: Failure,
}

impl ErrorResponse {
    pub fn from_error(err: &ExtractError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: Failure::from_error("", err),
        }
    }
}

// ============================================================================
// Response Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
