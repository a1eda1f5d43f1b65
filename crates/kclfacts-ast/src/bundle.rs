// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parse bundles: the frontend's output for one program.
//!
//! A bundle is a JSON document `{ "program": ..., "symbols": ... }`. Loading
//! it is the only place where an upstream parse failure can surface.
//!
//! The envelope (root, package map, symbol table) is decoded first and a
//! failure there rejects the whole bundle. Each module's syntax tree is then
//! decoded on its own, so a module carrying an unknown variant or a
//! malformed node is rejected alone and its siblings still load.

use std::collections::BTreeMap;
use std::path::Path;

use kclfacts_core::error::ExtractError;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::nodes::{Module, Program};
use crate::symbol::SymbolTable;

/// File suffix of parse bundles.
pub const BUNDLE_SUFFIX: &str = ".kast.json";

/// Syntax tree and symbol table of one program.
#[derive(Debug, Default)]
pub struct ParseBundle {
    pub program: Program,
    pub symbols: SymbolTable,
    /// Modules whose syntax tree could not be decoded, keyed by package name
    /// and position within the package. Their slot in `program` holds an
    /// empty module carrying only the filename, package and name.
    pub rejected: BTreeMap<(String, usize), ExtractError>,
}

#[derive(Deserialize)]
struct RawBundle {
    program: RawProgram,
    #[serde(default)]
    symbols: SymbolTable,
}

#[derive(Deserialize)]
struct RawProgram {
    root: String,
    #[serde(default)]
    pkgs: BTreeMap<String, Vec<Value>>,
}

impl ParseBundle {
    /// Decode a bundle from JSON text.
    ///
    /// `origin` names the source in errors. A tag the node model does not
    /// know becomes [`ExtractError::UnsupportedVariant`]; any other decode
    /// failure is [`ExtractError::Parse`]. Failures inside one module's tree
    /// are recorded in [`ParseBundle::rejected`] instead of failing the
    /// bundle.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, ExtractError> {
        let raw: RawBundle = serde_json::from_str(text).map_err(|err| classify(err, origin))?;

        let mut bundle = ParseBundle {
            program: Program {
                root: raw.program.root,
                pkgs: BTreeMap::new(),
            },
            symbols: raw.symbols,
            rejected: BTreeMap::new(),
        };
        for (package, values) in raw.program.pkgs {
            let mut modules = Vec::with_capacity(values.len());
            for (i, value) in values.into_iter().enumerate() {
                let placeholder = placeholder_module(&value, &package, i);
                match serde_json::from_value::<Module>(value) {
                    Ok(module) => modules.push(module),
                    Err(err) => {
                        let err = classify(err, &placeholder.filename);
                        warn!(
                            module = %placeholder.filename,
                            kind = err.kind(),
                            error = %err,
                            "rejecting module"
                        );
                        bundle.rejected.insert((package.clone(), i), err);
                        modules.push(placeholder);
                    }
                }
            }
            bundle.program.pkgs.insert(package, modules);
        }
        Ok(bundle)
    }

    /// Read and decode a bundle file.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|err| ExtractError::Parse {
            path: origin.clone(),
            message: err.to_string(),
        })?;
        let bundle = Self::from_json_str(&text, &origin)?;
        debug!(
            bundle = %origin,
            modules = bundle.program.module_count(),
            rejected = bundle.rejected.len(),
            "loaded parse bundle"
        );
        Ok(bundle)
    }

    /// Check whether the module at `index` of `package` failed to decode.
    pub fn is_rejected(&self, package: &str, index: usize) -> bool {
        self.rejected.contains_key(&(package.to_string(), index))
    }
}

/// Check whether `path` looks like a parse bundle.
pub fn is_bundle_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(BUNDLE_SUFFIX))
}

/// Stand-in for a module that failed to decode.
///
/// Keeps whatever identifying fields can still be read so the failure is
/// reported under the module's own filename.
fn placeholder_module(value: &Value, package: &str, index: usize) -> Module {
    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
    Module {
        filename: field("filename").unwrap_or_else(|| format!("{}[{}]", package, index)),
        pkg: field("pkg").unwrap_or_else(|| package.to_string()),
        name: field("name").unwrap_or_default(),
        ..Module::default()
    }
}

fn classify(err: serde_json::Error, origin: &str) -> ExtractError {
    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("unknown variant ") {
        let detail = rest.split(',').next().unwrap_or(rest).to_string();
        let location = match err.line() {
            0 => origin.to_string(),
            line => format!("{} (line {} column {})", origin, line, err.column()),
        };
        return ExtractError::UnsupportedVariant {
            family: "syntax node".to_string(),
            detail: format!("{} in {}", detail, location),
        };
    }
    ExtractError::Parse {
        path: origin.to_string(),
        message,
    }
}
