//! Binary entry point for the kclfacts CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Extract every bundle under build/ into facts/trap/...
//! kclfacts extract --output facts build/
//!
//! # JSON facts, sources read from a checkout instead of the program root
//! kclfacts extract --format json --source-root ~/src/app app.kast.json
//! ```
//!
//! The run summary is written to stdout as JSON; logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use kclfacts::cli::{run_extract, ExtractOptions};
use kclfacts::config::{ExtractorConfig, OutputFormat, DEFAULT_SNIPPET_WIDTH};
use kclfacts::error::OutputErrorCode;
use kclfacts::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Relational fact extraction for KCL programs.
#[derive(Parser, Debug)]
#[command(name = "kclfacts", version, about = "Relational fact extraction for KCL programs")]
struct Cli {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract facts from parse bundles.
    Extract(ExtractArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Parse bundles (`*.kast.json`) or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory fact files are written under.
    #[arg(long, short, default_value = "kclfacts-out")]
    output: PathBuf,

    /// Read module sources relative to this directory instead of the
    /// program root recorded in the bundle.
    #[arg(long)]
    source_root: Option<PathBuf>,

    /// Fact file format.
    #[arg(long, value_enum, default_value = "trap")]
    format: FormatArg,

    /// Maximum width of rendered source snippets.
    #[arg(long, default_value_t = DEFAULT_SNIPPET_WIDTH)]
    snippet_width: usize,

    /// Do not emit the comments relation.
    #[arg(long)]
    no_comments: bool,

    /// Do not emit the lines and numlines relations.
    #[arg(long)]
    no_lines: bool,

    /// Do not resolve identifiers to schema definitions.
    #[arg(long)]
    no_schema_refs: bool,
}

impl ExtractArgs {
    fn into_options(self) -> ExtractOptions {
        let config = ExtractorConfig::default()
            .with_snippet_width(self.snippet_width)
            .with_output_format(self.format.into())
            .with_comments(!self.no_comments)
            .with_lines(!self.no_lines)
            .with_schema_refs(!self.no_schema_refs);
        ExtractOptions {
            inputs: self.inputs,
            output: self.output,
            source_root: self.source_root,
            config,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Trap,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Trap => OutputFormat::Trap,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let result = match cli.command {
        Command::Extract(args) => run_extract(&args.into_options()),
    };

    match result {
        Ok(summary) => {
            let _ = emit_response(&summary, &mut io::stdout());
            let _ = io::stdout().flush();
            match summary.exit_code() {
                None => ExitCode::SUCCESS,
                Some(code) => ExitCode::from(code.code()),
            }
        }
        Err(err) => {
            let response = ErrorResponse::from_error(&err);
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();
            ExitCode::from(OutputErrorCode::from(&err).code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extract_defaults() {
        let cli = Cli::try_parse_from(["kclfacts", "extract", "a.kast.json"]).unwrap();
        assert!(matches!(cli.log_level, LogLevel::Warn));
        let Command::Extract(args) = cli.command;
        let options = args.into_options();
        assert_eq!(options.inputs, vec![PathBuf::from("a.kast.json")]);
        assert_eq!(options.output, PathBuf::from("kclfacts-out"));
        assert_eq!(options.config, ExtractorConfig::default());
    }

    #[test]
    fn parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "kclfacts",
            "--log-level",
            "debug",
            "extract",
            "--output",
            "/tmp/out",
            "--format",
            "json",
            "--snippet-width",
            "40",
            "--no-comments",
            "--no-schema-refs",
            "build",
        ])
        .unwrap();
        assert!(matches!(cli.log_level, LogLevel::Debug));
        let Command::Extract(args) = cli.command;
        let options = args.into_options();
        assert_eq!(options.config.output_format, OutputFormat::Json);
        assert_eq!(options.config.snippet_width, 40);
        assert!(!options.config.emit_comments);
        assert!(options.config.emit_lines);
        assert!(!options.config.resolve_schemas);
    }

    #[test]
    fn extract_requires_an_input() {
        assert!(Cli::try_parse_from(["kclfacts", "extract"]).is_err());
    }

    #[test]
    fn warn_converts_to_tracing_level() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
    }
}
