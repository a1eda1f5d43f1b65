//! CLI end-to-end tests.
//!
//! These tests write bundles and sources into a temporary directory, then
//! run extraction through the library front door and through the actual
//! `kclfacts` binary.
//!
//! Exit code expectations:
//! - 0: Success
//! - 2: Invalid arguments (missing input, no bundles)
//! - 3: Parse failure (unreadable bundle)
//! - 4: Extraction failure (a module could not be extracted)

mod support;

use std::fs;
use std::path::Path;
use std::process::Command;

use kclfacts::cli::{run_extract, ExtractOptions};
use kclfacts::config::{ExtractorConfig, OutputFormat};
use serde_json::{json, Value};
use tempfile::TempDir;

use support::Tree;

/// Write `main.k` and a bundle rooted at `dir` describing it.
///
/// `end_column` is the end of the assignment's span; past 5 it no longer
/// fits the source.
fn write_program(dir: &Path, end_column: u32) {
    fs::write(dir.join("main.k"), "x = 1\n").unwrap();

    let mut t = Tree::new("main.k");
    let value = t.at(1, 4, 1, 5).int(1);
    let stmt = t.at(1, 0, 1, end_column).assign("x", value);
    let bundle = json!({
        "program": {
            "root": dir.display().to_string(),
            "pkgs": { "__main__": [{ "filename": "main.k", "name": "main", "body": [stmt] }] }
        },
        "symbols": {}
    });
    fs::write(dir.join("main.kast.json"), bundle.to_string()).unwrap();
}

/// Run kclfacts with given arguments and return (stdout, exit_code).
fn run_kclfacts(args: &[&str]) -> (String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_kclfacts"))
        .args(args)
        .output()
        .expect("failed to execute kclfacts");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (stdout, output.status.code().unwrap_or(-1))
}

// ============================================================================
// Library front door
// ============================================================================

#[test]
fn writes_one_trap_file_per_module() {
    let dir = TempDir::new().unwrap();
    write_program(dir.path(), 5);
    let out = dir.path().join("out");

    let summary = run_extract(&ExtractOptions {
        inputs: vec![dir.path().to_path_buf()],
        output: out.clone(),
        source_root: None,
        config: ExtractorConfig::default(),
    })
    .unwrap();

    assert_eq!(summary.status, "ok");
    assert_eq!(summary.bundles, 1);
    assert_eq!(summary.modules, 1);
    assert!(summary.exit_code().is_none());

    let written = out.join("trap").join("main.k.trap");
    assert_eq!(summary.extracted[0].output, written.display().to_string());
    let trap = fs::read_to_string(&written).unwrap();
    assert!(trap.starts_with("// kclfacts schema version 1\n// module main.k\n"));
    assert!(trap.contains("stmts("));
    assert!(trap.ends_with("numlines(#0,1,1,0)\n"));
}

#[test]
fn json_format_writes_json_files() {
    let dir = TempDir::new().unwrap();
    write_program(dir.path(), 5);
    let out = dir.path().join("out");

    let summary = run_extract(&ExtractOptions {
        inputs: vec![dir.path().join("main.kast.json")],
        output: out.clone(),
        source_root: None,
        config: ExtractorConfig::default().with_output_format(OutputFormat::Json),
    })
    .unwrap();
    assert_eq!(summary.status, "ok");

    let text = fs::read_to_string(out.join("json").join("main.k.json")).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["module"], "main.k");
}

#[test]
fn source_root_overrides_program_root() {
    let dir = TempDir::new().unwrap();
    write_program(dir.path(), 5);
    // the recorded root no longer holds the source
    let checkout = dir.path().join("checkout");
    fs::create_dir_all(&checkout).unwrap();
    fs::rename(dir.path().join("main.k"), checkout.join("main.k")).unwrap();

    let options = |source_root| ExtractOptions {
        inputs: vec![dir.path().join("main.kast.json")],
        output: dir.path().join("out"),
        source_root,
        config: ExtractorConfig::default(),
    };

    let without = run_extract(&options(None)).unwrap();
    assert_eq!(without.failures.len(), 1);
    assert_eq!(without.failures[0].kind, "io");

    let with = run_extract(&options(Some(checkout))).unwrap();
    assert_eq!(with.status, "ok");
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn binary_succeeds_with_exit_0() {
    let dir = TempDir::new().unwrap();
    write_program(dir.path(), 5);
    let out = dir.path().join("out");

    let (stdout, code) = run_kclfacts(&[
        "extract",
        "--output",
        out.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stdout: {}", stdout);
    let summary: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["modules"], 1);
    assert!(out.join("trap").join("main.k.trap").is_file());
}

#[test]
fn missing_input_returns_exit_2() {
    let (stdout, code) = run_kclfacts(&["extract", "/definitely/not/here.kast.json"]);
    assert_eq!(code, 2);
    let response: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(response["status"], "error");
    assert_eq!(response["error"]["kind"], "invalid_arguments");
}

#[test]
fn broken_bundle_returns_exit_3() {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path().join("broken.kast.json");
    fs::write(&bundle, "{ \"program\": ").unwrap();
    let out = dir.path().join("out");

    let (stdout, code) = run_kclfacts(&[
        "extract",
        "--output",
        out.to_str().unwrap(),
        bundle.to_str().unwrap(),
    ]);
    assert_eq!(code, 3);
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["failures"][0]["kind"], "parse_failure");
}

#[test]
fn failing_module_returns_exit_4() {
    let dir = TempDir::new().unwrap();
    write_program(dir.path(), 30);
    let out = dir.path().join("out");

    let (stdout, code) = run_kclfacts(&[
        "extract",
        "--output",
        out.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);
    assert_eq!(code, 4);
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["failures"][0]["kind"], "span_out_of_bounds");
    assert_eq!(summary["failures"][0]["input"], "main.k");
    assert!(!out.join("trap").join("main.k.trap").exists());
}

#[test]
fn undecodable_module_fails_alone() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.k"), "x = 1\n").unwrap();
    fs::write(dir.path().join("b.k"), "while x:\n").unwrap();

    let mut a = Tree::new("a.k");
    let value = a.at(1, 4, 1, 5).int(1);
    let stmt = a.at(1, 0, 1, 5).assign("x", value);
    let mut b = Tree::new("b.k");
    let unknown = b.node(json!({ "type": "While", "body": [] }));
    let bundle = json!({
        "program": {
            "root": dir.path().display().to_string(),
            "pkgs": { "__main__": [
                { "filename": "a.k", "name": "a", "body": [stmt] },
                { "filename": "b.k", "name": "b", "body": [unknown] }
            ] }
        }
    });
    fs::write(dir.path().join("main.kast.json"), bundle.to_string()).unwrap();
    let out = dir.path().join("out");

    let (stdout, code) = run_kclfacts(&[
        "extract",
        "--output",
        out.to_str().unwrap(),
        dir.path().join("main.kast.json").to_str().unwrap(),
    ]);
    assert_eq!(code, 4, "stdout: {}", stdout);
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["modules"], 2);
    assert_eq!(summary["failures"].as_array().map(Vec::len), Some(1));
    assert_eq!(summary["failures"][0]["kind"], "unsupported_variant");
    assert_eq!(summary["failures"][0]["input"], "b.k");
    assert!(out.join("trap").join("a.k.trap").is_file());
}
