//! CLI front door.
//!
//! `kclfacts extract` reads parse bundles, extracts every module and writes
//! one fact file per module. The caller (`main.rs`) turns the returned
//! [`RunSummary`] into JSON on stdout and an exit status.
//!
//! ## Error Handling
//!
//! Bad inputs (a path that does not exist, no bundles found) fail the whole
//! run with an invalid-arguments error. Anything after that is recorded in
//! the summary: an unreadable bundle is skipped, a failing module is
//! reported, and the run carries on.

use std::path::{Path, PathBuf};

use kclfacts_ast::{is_bundle_path, ParseBundle};
use kclfacts_core::error::ExtractError;
use tracing::{info, info_span, warn};
use walkdir::WalkDir;

use crate::config::{ExtractorConfig, OutputFormat};
use crate::extractor::ModuleFacts;
use crate::output::{write_module, ExtractedModule, Failure, RunSummary};
use crate::program::{extract_bundle, FsSource};

/// Inputs of an `extract` run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Bundle files, or directories to search for bundles.
    pub inputs: Vec<PathBuf>,
    /// Directory fact files are written under.
    pub output: PathBuf,
    /// Directory module sources are read from, instead of the program root.
    pub source_root: Option<PathBuf>,
    pub config: ExtractorConfig,
}

/// Expand `inputs` into the list of bundle files to extract.
///
/// Files are taken as given. Directories are walked for `*.kast.json`
/// files, which are returned in sorted order.
pub fn discover_bundles(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ExtractError> {
    if inputs.is_empty() {
        return Err(ExtractError::invalid_arguments("no input bundles given"));
    }
    let mut bundles = Vec::new();
    for input in inputs {
        if input.is_file() {
            bundles.push(input.clone());
        } else if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(false)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable directory entry");
                        None
                    }
                })
                .filter(|e| e.file_type().is_file() && is_bundle_path(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            bundles.extend(found);
        } else {
            return Err(ExtractError::invalid_arguments(format!(
                "input '{}' does not exist",
                input.display()
            )));
        }
    }
    if bundles.is_empty() {
        return Err(ExtractError::invalid_arguments("no *.kast.json bundles found"));
    }
    Ok(bundles)
}

/// Run `extract`.
pub fn run_extract(options: &ExtractOptions) -> Result<RunSummary, ExtractError> {
    let bundles = discover_bundles(&options.inputs)?;
    let sources = FsSource::new(options.source_root.clone());
    let format = options.config.output_format;
    let mut summary = RunSummary::new(format);

    for path in &bundles {
        let _span = info_span!("bundle", path = %path.display()).entered();
        summary.bundles += 1;
        let bundle = match ParseBundle::load(path) {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "skipping bundle");
                summary.record_failure(Failure::from_error(path.display().to_string(), &err));
                continue;
            }
        };

        for outcome in extract_bundle(bundle, &sources, &options.config) {
            let written = outcome
                .result
                .and_then(|facts| write_extracted(&options.output, format, &outcome.package, facts));
            match written {
                Ok(module) => summary.record_extracted(module),
                Err(err) => summary.record_module_failure(&outcome.filename, &err),
            }
        }
    }

    info!(
        bundles = summary.bundles,
        modules = summary.modules,
        failures = summary.failures.len(),
        "extraction finished"
    );
    Ok(summary)
}

fn write_extracted(
    out_dir: &Path,
    format: OutputFormat,
    package: &str,
    facts: ModuleFacts,
) -> Result<ExtractedModule, ExtractError> {
    let path = write_module(out_dir, format, &facts)?;
    Ok(ExtractedModule {
        module: facts.filename.clone(),
        package: package.to_string(),
        output: path.display().to_string(),
        facts: facts.facts.len(),
        labels: facts.definitions.len(),
        schema_refs: facts.xref.linked,
        skipped_refs: facts.xref.inconsistent,
    })
}
