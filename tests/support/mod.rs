//! Shared helpers for integration tests: JSON builders for parse bundles and
//! shortcuts for running the extractor over them.

#![allow(dead_code)]

use kclfacts::config::ExtractorConfig;
use kclfacts::extractor::ModuleFacts;
use kclfacts::program::{extract_bundle, MemorySource, ModuleOutcome};
use kclfacts_ast::ParseBundle;
use serde_json::{json, Value};

pub const ROOT: &str = "/src";

/// Builds syntax nodes for one file with generated ids.
///
/// Every node gets the current span, which tests move with [`Tree::at`].
pub struct Tree {
    file: String,
    prefix: String,
    next: usize,
    span: (u32, u32, u32, u32),
}

impl Tree {
    pub fn new(file: &str) -> Self {
        let prefix = file.trim_end_matches(".k").replace('/', "_");
        Tree {
            file: file.to_string(),
            prefix,
            next: 0,
            span: (1, 0, 1, 1),
        }
    }

    /// Set the span of nodes built from now on.
    pub fn at(&mut self, line: u32, column: u32, end_line: u32, end_column: u32) -> &mut Self {
        self.span = (line, column, end_line, end_column);
        self
    }

    /// Number of nodes built so far.
    pub fn count(&self) -> usize {
        self.next
    }

    /// Next id this tree would assign.
    pub fn peek_id(&self) -> String {
        format!("{}_{}", self.prefix, self.next)
    }

    pub fn node(&mut self, body: Value) -> Value {
        let id = self.peek_id();
        self.next += 1;
        self.node_with_id(&id, body)
    }

    pub fn node_with_id(&self, id: &str, body: Value) -> Value {
        let (line, column, end_line, end_column) = self.span;
        json!({
            "id": id,
            "filename": self.file,
            "line": line,
            "column": column,
            "end_line": end_line,
            "end_column": end_column,
            "node": body,
        })
    }

    // ------------------------------------------------------------------
    // Leaves
    // ------------------------------------------------------------------

    /// `Node<Identifier>`.
    pub fn ident(&mut self, name: &str, ctx: &str) -> Value {
        let names: Vec<&str> = name.split('.').collect();
        self.node(json!({ "names": names, "ctx": ctx }))
    }

    /// `Node<String>`.
    pub fn string(&mut self, value: &str) -> Value {
        self.node(json!(value))
    }

    /// Identifier expression in load context.
    pub fn name(&mut self, name: &str) -> Value {
        let names: Vec<&str> = name.split('.').collect();
        self.node(json!({ "type": "Identifier", "names": names, "ctx": "Load" }))
    }

    pub fn int(&mut self, value: i64) -> Value {
        self.node(json!({ "type": "NumberLit", "value": { "type": "Int", "value": value } }))
    }

    pub fn str_lit(&mut self, value: &str) -> Value {
        self.node(json!({ "type": "StringLit", "value": value, "raw_value": format!("{:?}", value) }))
    }

    pub fn basic(&mut self, ty: &str) -> Value {
        self.node(json!({ "type": "Basic", "value": ty }))
    }

    pub fn named_type(&mut self, name: &str) -> Value {
        let names: Vec<&str> = name.split('.').collect();
        self.node(json!({ "type": "Named", "value": { "names": names } }))
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub fn assign(&mut self, target: &str, value: Value) -> Value {
        let target = self.ident(target, "Store");
        self.node(json!({ "type": "Assign", "targets": [target], "value": value }))
    }

    pub fn expr_stmt(&mut self, expr: Value) -> Value {
        self.node(json!({ "type": "Expr", "exprs": [expr] }))
    }

    /// `schema <name>:` with the given body.
    pub fn schema(&mut self, name: &str, body: Vec<Value>) -> Value {
        let name = self.string(name);
        self.node(json!({ "type": "Schema", "name": name, "body": body }))
    }
}

// ============================================================================
// Bundles
// ============================================================================

/// One module of a bundle.
pub fn module(filename: &str, name: &str, body: Vec<Value>) -> Value {
    json!({ "filename": filename, "pkg": "__main__", "name": name, "body": body })
}

/// Bundle JSON with every module in package `__main__`.
pub fn bundle_json(modules: Vec<Value>, symbols: Value) -> String {
    json!({
        "program": { "root": ROOT, "pkgs": { "__main__": modules } },
        "symbols": symbols,
    })
    .to_string()
}

pub fn empty_symbols() -> Value {
    json!({})
}

/// Extract a bundle whose module sources are `sources`.
pub fn run(bundle: &str, sources: &[(&str, &str)], config: &ExtractorConfig) -> Vec<ModuleOutcome> {
    let bundle = ParseBundle::from_json_str(bundle, "test.kast.json").unwrap();
    let mut memory = MemorySource::new();
    for (filename, text) in sources {
        memory.insert(*filename, *text);
    }
    extract_bundle(bundle, &memory, config)
}

/// Extract a single module `main.k` with source `text`.
pub fn extract_main(text: &str, body: Vec<Value>) -> ModuleFacts {
    extract_main_with(text, body, &ExtractorConfig::default())
}

pub fn extract_main_with(text: &str, body: Vec<Value>, config: &ExtractorConfig) -> ModuleFacts {
    let bundle = bundle_json(vec![module("main.k", "main", body)], empty_symbols());
    let mut outcomes = run(&bundle, &[("main.k", text)], config);
    outcomes.remove(0).result.unwrap()
}
