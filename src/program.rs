//! Program/Module driver.
//!
//! Extracts every module of a parsed program. Each module runs in its own
//! [`Session`], so an error in one module is reported for that module alone
//! and the others still produce complete facts.
//!
//! Source text is obtained through a [`SourceLoader`]: [`FsSource`] reads
//! files from disk, [`MemorySource`] serves text held in memory.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use kclfacts_ast::{NodeIndex, ParseBundle, Program};
use kclfacts_core::error::ExtractError;
use tracing::{debug, info, info_span, warn};

use crate::config::ExtractorConfig;
use crate::extractor::{ModuleFacts, ModuleSite, Session};
use crate::xref::CrossReferencer;

// ============================================================================
// Source loading
// ============================================================================

/// Supplies the source text of a module.
pub trait SourceLoader {
    /// Return the text of `filename`, a module of the program rooted at
    /// `root`.
    fn load(&self, root: &str, filename: &str) -> Result<String, ExtractError>;
}

/// Reads module sources from the filesystem.
///
/// Relative filenames are resolved against the override root if one is set,
/// and against the program root otherwise.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    pub fn new(root: Option<PathBuf>) -> Self {
        FsSource { root }
    }

    /// Path a module's source is read from.
    pub fn resolve(&self, root: &str, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.root {
            Some(base) => base.join(path),
            None => Path::new(root).join(path),
        }
    }
}

impl SourceLoader for FsSource {
    fn load(&self, root: &str, filename: &str) -> Result<String, ExtractError> {
        let path = self.resolve(root, filename);
        fs::read_to_string(&path).map_err(|e| ExtractError::io(path.display().to_string(), e))
    }
}

/// Module sources held in memory, keyed by filename.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, text: impl Into<String>) {
        self.files.insert(filename.into(), text.into());
    }

    pub fn with_file(mut self, filename: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(filename, text);
        self
    }
}

impl SourceLoader for MemorySource {
    fn load(&self, _root: &str, filename: &str) -> Result<String, ExtractError> {
        self.files.get(filename).cloned().ok_or_else(|| {
            ExtractError::io(
                filename,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no source registered"),
            )
        })
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Result of extracting one module.
#[derive(Debug)]
pub struct ModuleOutcome {
    pub filename: String,
    pub package: String,
    pub result: Result<ModuleFacts, ExtractError>,
}

impl ModuleOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Extract every module of `bundle`'s program.
///
/// Packages are visited in name order and modules in their order within the
/// package. Outcomes are returned in that order. A module whose syntax tree
/// failed to decode gets its decode error as its outcome and keeps its
/// position, so the index of its siblings is unchanged.
pub fn extract_bundle(
    bundle: ParseBundle,
    sources: &dyn SourceLoader,
    config: &ExtractorConfig,
) -> Vec<ModuleOutcome> {
    let ParseBundle {
        program,
        symbols,
        mut rejected,
    } = bundle;
    let index = NodeIndex::build(&program);
    if index.duplicates() > 0 {
        warn!(
            duplicates = index.duplicates(),
            "node ids are not unique; first occurrence wins"
        );
    }
    let xref = CrossReferencer::new(&symbols, &index);

    info!(
        root = %program.root,
        packages = program.pkgs.len(),
        modules = program.module_count(),
        rejected = rejected.len(),
        "extracting program"
    );
    extract_modules(&program, &mut rejected, sources, config, Some(xref))
}

/// Extract every module of `program`, resolving schema references through
/// `xref` when given.
pub fn extract_program(
    program: &Program,
    sources: &dyn SourceLoader,
    config: &ExtractorConfig,
    xref: Option<CrossReferencer<'_>>,
) -> Vec<ModuleOutcome> {
    extract_modules(program, &mut BTreeMap::new(), sources, config, xref)
}

fn extract_modules(
    program: &Program,
    rejected: &mut BTreeMap<(String, usize), ExtractError>,
    sources: &dyn SourceLoader,
    config: &ExtractorConfig,
    xref: Option<CrossReferencer<'_>>,
) -> Vec<ModuleOutcome> {
    let mut outcomes = Vec::with_capacity(program.module_count());
    for (package, modules) in &program.pkgs {
        for (i, module) in modules.iter().enumerate() {
            let _span = info_span!("module", file = %module.filename).entered();
            let result = match rejected.remove(&(package.clone(), i)) {
                Some(err) => Err(err),
                None => {
                    let site = ModuleSite {
                        root: &program.root,
                        package,
                        index: i as u32,
                    };
                    sources
                        .load(&program.root, &module.filename)
                        .and_then(|text| {
                            Session::new(config, &module.filename, &text, xref)
                                .extract_module(site, module)
                        })
                }
            };
            match &result {
                Ok(facts) => debug!(
                    facts = facts.facts.len(),
                    schema_refs = facts.xref.linked,
                    "module done"
                ),
                Err(err) => warn!(kind = err.kind(), error = %err, "module aborted"),
            }
            outcomes.push(ModuleOutcome {
                filename: module.filename.clone(),
                package: package.clone(),
                result,
            });
        }
    }
    outcomes
}
