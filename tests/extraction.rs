//! End-to-end extraction tests over small hand-built programs.
//!
//! Each test builds a parse bundle, runs the program driver over in-memory
//! sources and inspects the resulting facts.

mod support;

use std::collections::{BTreeSet, HashMap, HashSet};

use kclfacts::config::ExtractorConfig;
use kclfacts::error::ExtractError;
use kclfacts::facts::{Table, Value as FactValue};
use kclfacts::label::{Label, LabelDef};
use kclfacts::writer::{to_json, to_trap_string};
use serde_json::{json, Value};

use support::{bundle_json, empty_symbols, extract_main, extract_main_with, module, run, Tree};

// ============================================================================
// Golden output
// ============================================================================

#[test]
fn single_assignment_trap() {
    let mut t = Tree::new("main.k");
    t.at(1, 0, 1, 1);
    let target = t.node_with_id("t1", json!({ "names": ["x"], "ctx": "Store" }));
    t.at(1, 4, 1, 5);
    let value = t.node_with_id(
        "v1",
        json!({ "type": "NumberLit", "value": { "type": "Int", "value": 1 } }),
    );
    t.at(1, 0, 1, 5);
    let stmt = t.node_with_id(
        "s1",
        json!({ "type": "Assign", "targets": [target], "value": value }),
    );

    let facts = extract_main("x = 1\n", vec![stmt]);
    let trap = to_trap_string(&[], &facts.definitions, &facts.facts);

    let expected = concat!(
        "// kclfacts schema version 1\n",
        "#1=@\"root;{/src}\"\n",
        "roots(#1,\"/src\")\n",
        "#2=@\"package;{/src},__main__\"\n",
        "packages(#2,\"__main__\",#1)\n",
        "#0=@\"file;{main.k}\"\n",
        "files(#0,\"main.k\",\"9e26bf369911c45c243c684147b23fc9e1dcfcf257d299a1c632016a6fcd33f4\")\n",
        "#3=@\"module;{main.k}\"\n",
        "modules(#3,\"main\",#0,#2,0)\n",
        "#4=*\n",
        "stmt_lists(#4,#3,0)\n",
        "#5=@\"s1;{main.k},1:0:1:5\"\n",
        "stmts(#5,3,#4,0,\"x = 1\")\n",
        "#6=*\n",
        "identifier_lists(#6,#5,0)\n",
        "#7=@\"t1;{main.k},1:0:1:1\"\n",
        "identifiers(#7,#6,0,\"x\")\n",
        "#8=*\n",
        "expr_contexts(#8,1,#7)\n",
        "locations(#7,#0,1,0,1,1)\n",
        "#9=@\"v1;{main.k},1:4:1:5\"\n",
        "exprs(#9,22,#5,0,\"1\")\n",
        "#10=*\n",
        "literals(#10,1,#9,\"1\")\n",
        "locations(#9,#0,1,4,1,5)\n",
        "locations(#5,#0,1,0,1,5)\n",
        "lines(#0,1,0,5)\n",
        "numlines(#0,1,1,0)\n",
    );
    assert_eq!(trap, expected);
}

// ============================================================================
// Exhaustive corpus
// ============================================================================

/// A program touching every statement, expression and type variant.
///
/// All nodes share the span 1:0-1:1, which fits the one-line source the
/// corpus is extracted with.
fn corpus(t: &mut Tree) -> Vec<Value> {
    let mut exprs = Vec::new();

    exprs.push(t.name("a"));

    let operand = t.int(1);
    exprs.push(t.node(json!({ "type": "Unary", "op": "USub", "operand": operand })));

    let (left, right) = (t.int(1), t.int(2));
    exprs.push(t.node(json!({ "type": "Binary", "left": left, "op": "Add", "right": right })));

    let (body, cond, orelse) = (t.int(1), t.name("c"), t.int(2));
    exprs.push(t.node(json!({ "type": "If", "body": body, "cond": cond, "orelse": orelse })));

    let (value, attr) = (t.name("a"), t.ident("b", "Load"));
    exprs.push(t.node(json!({ "type": "Selector", "value": value, "attr": attr })));

    let (func, arg) = (t.name("f"), t.int(1));
    let (kw_arg, kw_value) = (t.ident("k", "Load"), t.int(2));
    let keyword = t.node(json!({ "arg": kw_arg, "value": kw_value }));
    exprs.push(t.node(json!({ "type": "Call", "func": func, "args": [arg], "keywords": [keyword] })));

    let inner = t.int(1);
    exprs.push(t.node(json!({ "type": "Paren", "expr": inner })));

    let (target, var, test, if_cond) = (t.name("xs"), t.ident("v", "Load"), t.name("v"), t.name("v"));
    exprs.push(t.node(json!({
        "type": "Quant", "target": target, "variables": [var], "op": "All",
        "test": test, "if_cond": if_cond
    })));

    let elt = t.int(1);
    exprs.push(t.node(json!({ "type": "List", "elts": [elt] })));

    let (if_cond, elt, orelse) = (t.name("c"), t.int(1), t.int(2));
    exprs.push(t.node(json!({ "type": "ListIfItem", "if_cond": if_cond, "exprs": [elt], "orelse": orelse })));

    let elt = t.name("i");
    let (gen_target, gen_iter, gen_if) = (t.ident("i", "Store"), t.name("xs"), t.name("i"));
    let generator = t.node(json!({ "targets": [gen_target], "iter": gen_iter, "ifs": [gen_if] }));
    exprs.push(t.node(json!({ "type": "ListComp", "elt": elt, "generators": [generator] })));

    let value = t.name("xs");
    exprs.push(t.node(json!({ "type": "Starred", "value": value })));

    let (key, value) = (t.name("k"), t.name("v"));
    let (gen_target, gen_iter) = (t.ident("k", "Store"), t.name("d"));
    let generator = t.node(json!({ "targets": [gen_target], "iter": gen_iter }));
    exprs.push(t.node(json!({
        "type": "DictComp",
        "entry": { "key": key, "value": value, "operation": "Union" },
        "generators": [generator]
    })));

    let if_cond = t.name("c");
    let (key, value) = (t.name("k"), t.int(1));
    let entry = t.node(json!({ "key": key, "value": value, "operation": "Insert" }));
    let orelse = t.node(json!({ "type": "Config", "items": [] }));
    exprs.push(t.node(json!({ "type": "ConfigIfEntry", "if_cond": if_cond, "items": [entry], "orelse": orelse })));

    let (name, arg, config) = (t.ident("P", "Load"), t.int(1), t.node(json!({ "type": "Config" })));
    exprs.push(t.node(json!({ "type": "Schema", "name": name, "args": [arg], "config": config })));

    let (key, value) = (t.name("k"), t.int(1));
    let entry = t.node(json!({ "key": key, "value": value, "operation": "Override" }));
    exprs.push(t.node(json!({ "type": "Config", "items": [entry] })));

    let (test, if_cond, msg) = (t.name("ok"), t.name("c"), t.str_lit("failed"));
    exprs.push(t.node(json!({ "type": "Check", "test": test, "if_cond": if_cond, "msg": msg })));

    let (p, q) = (t.ident("p", "Load"), t.ident("q", "Load"));
    let (default, annotation) = (t.int(1), t.basic("Str"));
    let args = t.node(json!({ "args": [p, q], "defaults": [null, default], "ty_list": [annotation, null] }));
    let body_value = t.int(1);
    let body = t.assign("r", body_value);
    let ret = t.basic("Int");
    exprs.push(t.node(json!({ "type": "Lambda", "args": args, "body": [body], "return_ty": ret })));

    let (value, index) = (t.name("xs"), t.int(0));
    exprs.push(t.node(json!({ "type": "Subscript", "value": value, "index": index })));

    let (left, right) = (t.name("a"), t.int(1));
    exprs.push(t.node(json!({ "type": "Compare", "left": left, "ops": ["Eq"], "comparators": [right] })));

    let formatted_value = t.name("a");
    let formatted = t.node(json!({ "type": "FormattedValue", "value": formatted_value, "format_spec": "#json" }));
    exprs.push(t.node(json!({ "type": "JoinedString", "values": [formatted], "raw_value": "\"${a: #json}\"" })));

    let formatted_value = t.name("b");
    exprs.push(t.node(json!({ "type": "FormattedValue", "value": formatted_value })));

    exprs.push(t.node(json!({ "type": "NumberLit", "value": { "type": "Float", "value": 1.5 } })));
    exprs.push(t.str_lit("s"));
    exprs.push(t.node(json!({ "type": "NameConstantLit", "value": "True" })));
    exprs.push(t.node(json!({ "type": "Missing" })));

    let mut stmts = Vec::new();

    let (type_name, type_value) = (t.ident("T", "Store"), t.string("int | str"));
    let (int_ty, str_ty) = (t.basic("Int"), t.basic("Str"));
    let union = t.node(json!({ "type": "Union", "value": { "type_elements": [int_ty, str_ty] } }));
    stmts.push(t.node(json!({ "type": "TypeAlias", "type_name": type_name, "type_value": type_value, "ty": union })));

    stmts.push(t.node(json!({ "type": "Expr", "exprs": exprs })));

    let (target, name, config) = (t.ident("u", "Store"), t.ident("P", "Load"), t.node(json!({ "type": "Config" })));
    let value = t.node(json!({ "name": name, "config": config }));
    stmts.push(t.node(json!({ "type": "Unification", "target": target, "value": value })));

    let (target, value) = (t.ident("x", "Store"), t.int(1));
    let ty = t.node(json!({ "type": "Any" }));
    stmts.push(t.node(json!({ "type": "Assign", "targets": [target], "value": value, "ty": ty })));

    let (target, value) = (t.ident("f", "Store"), t.name("g"));
    let (param, flag, ret) = (t.named_type("P"), t.basic("Bool"), t.basic("Float"));
    let ty = t.node(json!({ "type": "Function", "value": { "params_ty": [param, flag], "ret_ty": ret } }));
    stmts.push(t.node(json!({ "type": "Assign", "targets": [target], "value": value, "ty": ty })));

    let (target, value) = (t.ident("e", "Store"), t.str_lit("dev"));
    let ty = t.node(json!({ "type": "Literal", "value": { "type": "Str", "value": "dev" } }));
    stmts.push(t.node(json!({ "type": "Assign", "targets": [target], "value": value, "ty": ty })));

    let (target, value) = (t.ident("on", "Store"), t.node(json!({ "type": "NameConstantLit", "value": "True" })));
    let ty = t.node(json!({ "type": "Literal", "value": { "type": "Bool", "value": true } }));
    stmts.push(t.node(json!({ "type": "Assign", "targets": [target], "value": value, "ty": ty })));

    let (target, value) = (t.ident("x", "Store"), t.int(1));
    stmts.push(t.node(json!({ "type": "AugAssign", "target": target, "value": value, "op": "Add" })));

    let (test, if_cond, msg) = (t.name("ok"), t.name("c"), t.str_lit("bad"));
    stmts.push(t.node(json!({ "type": "Assert", "test": test, "if_cond": if_cond, "msg": msg })));

    let cond = t.name("c");
    let then_value = t.int(1);
    let then = t.assign("y", then_value);
    stmts.push(t.node(json!({ "type": "If", "body": [then], "cond": cond })));

    let (path, asname) = (t.string("a.b"), t.string("c"));
    stmts.push(t.node(json!({
        "type": "Import", "path": path, "rawpath": "a.b", "name": "b",
        "asname": asname, "pkg_name": "__main__"
    })));

    let (attr_name, attr_value, decorator) = (t.string("attr"), t.int(1), t.name("deprecated"));
    let element = t.basic("Int");
    let attr_ty = t.node(json!({ "type": "List", "value": { "inner_type": element } }));
    let attr = t.node(json!({
        "type": "SchemaAttr", "doc": "ignored", "name": attr_name, "op": "Assign",
        "value": attr_value, "decorators": [decorator], "ty": attr_ty
    }));
    let (doc, name, parent, mixin) = (t.string("doc"), t.string("P"), t.ident("Base", "Load"), t.ident("M", "Load"));
    let arg = t.ident("n", "Load");
    let args = t.node(json!({ "args": [arg] }));
    let (decorator, check) = (t.name("frozen"), t.name("valid"));
    let (key_name, key_ty) = (t.string("k"), t.basic("Str"));
    let (dict_key, dict_value) = (t.basic("Str"), t.basic("Int"));
    let value_ty = t.node(json!({ "type": "Dict", "value": { "key_type": dict_key, "value_type": dict_value } }));
    let index_signature = t.node(json!({
        "key_name": key_name, "key_ty": key_ty, "value_ty": value_ty, "any_other": true
    }));
    stmts.push(t.node(json!({
        "type": "Schema", "doc": doc, "name": name, "parent_name": parent,
        "args": args, "mixins": [mixin], "body": [attr], "decorators": [decorator],
        "checks": [check], "index_signature": index_signature
    })));

    let (name, doc, parent, host, check) = (
        t.string("R"),
        t.string("rule doc"),
        t.ident("Q", "Load"),
        t.ident("P", "Load"),
        t.name("ok"),
    );
    stmts.push(t.node(json!({
        "type": "Rule", "name": name, "doc": doc, "parent_rules": [parent],
        "for_host_name": host, "checks": [check]
    })));

    stmts
}

fn kinds(facts: &kclfacts::extractor::ModuleFacts, table: Table) -> BTreeSet<i64> {
    facts.facts.rows(table).filter_map(|f| f.int("kind")).collect()
}

fn extract_corpus() -> (usize, kclfacts::extractor::ModuleFacts) {
    let mut t = Tree::new("main.k");
    let body = corpus(&mut t);
    let facts = extract_main("x\n", body);
    (t.count(), facts)
}

#[test]
fn every_variant_has_a_kind() {
    let (_, facts) = extract_corpus();
    assert_eq!(kinds(&facts, Table::Stmts), (0..=10).collect::<BTreeSet<i64>>());
    assert_eq!(kinds(&facts, Table::Exprs), (0..=25).collect::<BTreeSet<i64>>());
    assert_eq!(kinds(&facts, Table::Types), (0..=10).collect::<BTreeSet<i64>>());
    assert_eq!(kinds(&facts, Table::Literals), BTreeSet::from([0, 1, 2, 3, 4]));
}

#[test]
fn bool_literal_type_renders_lowercase_value() {
    let (_, facts) = extract_corpus();
    let values: Vec<_> = facts
        .facts
        .rows(Table::Literals)
        .filter(|l| l.int("kind") == Some(0))
        .map(|l| l.str("value").map(str::to_string))
        .collect();
    assert_eq!(values, vec![Some("true".to_string())]);
}

#[test]
fn every_relation_family_is_populated() {
    let (_, facts) = extract_corpus();
    for table in [
        Table::Identifiers,
        Table::Strings,
        Table::UnaryOps,
        Table::BinaryOps,
        Table::CmpOps,
        Table::AugOps,
        Table::QuantOps,
        Table::ConfigEntryOps,
        Table::ExprContexts,
        Table::ConfigEntries,
        Table::Keywords,
        Table::CompClauses,
        Table::Arguments,
        Table::SchemaConfigs,
        Table::IndexSignatures,
        Table::IdentifierLists,
        Table::ExprLists,
        Table::StmtLists,
        Table::KeywordLists,
        Table::TypeLists,
        Table::ConfigEntryLists,
        Table::CompClauseLists,
    ] {
        assert!(facts.facts.count(table) > 0, "{} is empty", table);
    }
}

#[test]
fn every_located_node_gets_a_stable_label() {
    let (nodes, facts) = extract_corpus();
    let keyed = facts
        .definitions
        .iter()
        .filter(|def| def.key().is_some())
        .count();
    // root, package, file and module are keyed too
    assert_eq!(keyed, nodes + 4);
}

#[test]
fn labels_are_unique() {
    let (_, facts) = extract_corpus();
    let keys: Vec<&str> = facts
        .definitions
        .iter()
        .filter_map(LabelDef::key)
        .map(|k| k.as_str())
        .collect();
    let distinct: HashSet<&str> = keys.iter().copied().collect();
    assert_eq!(keys.len(), distinct.len());

    // each entity is introduced by exactly one tuple
    let mut introduced: HashMap<Label, usize> = HashMap::new();
    for fact in facts.facts.facts() {
        if fact.table.columns()[0] == "id" && fact.table != Table::Locations {
            if let Some(FactValue::Label(label)) = fact.values.first() {
                *introduced.entry(*label).or_default() += 1;
            }
        }
    }
    assert!(introduced.values().all(|n| *n == 1));
}

#[test]
fn references_are_closed() {
    let (_, facts) = extract_corpus();
    let defined = facts.definitions.len();
    let mut ids: HashSet<Label> = HashSet::new();
    for fact in facts.facts.facts() {
        for label in fact.labels() {
            assert!(label.index() < defined, "{} used but never allocated", label);
        }
        if fact.table.columns()[0] == "id" && fact.table != Table::Locations {
            ids.extend(fact.label("id"));
        }
    }
    for fact in facts.facts.facts() {
        for column in ["parent", "module", "file", "root", "package"] {
            if let Some(label) = fact.label(column) {
                assert!(ids.contains(&label), "{} {} {} dangles", fact.table, column, label);
            }
        }
        if fact.table == Table::Locations {
            let label = fact.label("id").unwrap();
            assert!(ids.contains(&label), "location of unknown {}", label);
        }
    }
}

#[test]
fn schema_attr_doc_is_not_emitted() {
    let (_, facts) = extract_corpus();
    assert!(facts
        .facts
        .rows(Table::Strings)
        .all(|row| row.str("value") != Some("ignored")));
}

#[test]
fn positional_defaults_keep_parameter_index() {
    let (_, facts) = extract_corpus();
    let args = facts.facts.rows(Table::Arguments).next().unwrap();
    let args_label = args.label("id");
    let lists: HashMap<Table, Label> = facts
        .facts
        .facts()
        .iter()
        .filter(|f| f.label("parent") == args_label)
        .filter(|f| matches!(f.table, Table::ExprLists | Table::TypeLists))
        .map(|f| (f.table, f.label("id").unwrap()))
        .collect();

    let default = facts
        .facts
        .rows(Table::Exprs)
        .find(|e| Some(e.label("parent").unwrap()) == lists.get(&Table::ExprLists).copied())
        .unwrap();
    assert_eq!(default.int("index"), Some(1));

    let annotation = facts
        .facts
        .rows(Table::Types)
        .find(|ty| Some(ty.label("parent").unwrap()) == lists.get(&Table::TypeLists).copied())
        .unwrap();
    assert_eq!(annotation.int("index"), Some(0));
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn statements_keep_source_order() {
    let mut t = Tree::new("main.k");
    let mut body = Vec::new();
    for (line, name) in [(1, "a"), (2, "b"), (3, "c")] {
        t.at(line, 4, line, 5);
        let value = t.int(line as i64);
        t.at(line, 0, line, 5);
        body.push(t.assign(name, value));
    }
    let facts = extract_main("a = 1\nb = 2\nc = 3\n", body);
    let stmts: Vec<(i64, String)> = facts
        .facts
        .rows(Table::Stmts)
        .map(|s| (s.int("index").unwrap(), s.str("text").unwrap().to_string()))
        .collect();
    assert_eq!(
        stmts,
        vec![
            (0, "a = 1".to_string()),
            (1, "b = 2".to_string()),
            (2, "c = 3".to_string()),
        ]
    );
}

#[test]
fn absent_else_branch_emits_nothing() {
    let mut t = Tree::new("main.k");
    t.at(1, 3, 1, 4);
    let cond = t.name("c");
    t.at(2, 8, 2, 9);
    let value = t.int(1);
    t.at(2, 4, 2, 9);
    let then = t.assign("x", value);
    t.at(1, 0, 2, 9);
    let stmt = t.node(json!({ "type": "If", "body": [then], "cond": cond }));

    let facts = extract_main("if c:\n    x = 1\n", vec![stmt]);
    let lists: Vec<_> = facts.facts.rows(Table::StmtLists).collect();
    // the module body and the if body
    assert_eq!(lists.len(), 2);
    assert!(lists.iter().all(|l| l.int("index") == Some(0)));
}

#[test]
fn comments_and_line_metrics() {
    let mut t = Tree::new("main.k");
    t.at(2, 4, 2, 5);
    let value = t.int(1);
    t.at(2, 0, 2, 5);
    let stmt = t.assign("x", value);
    let comment = json!({
        "id": "c1", "filename": "main.k",
        "line": 1, "column": 0, "end_line": 1, "end_column": 9,
        "node": { "text": "# comment" }
    });
    let mut m = module("main.k", "main", vec![stmt]);
    m["comments"] = json!([comment]);
    let bundle = bundle_json(vec![m], empty_symbols());
    let mut outcomes = run(&bundle, &[("main.k", "# comment\nx = 1\n")], &ExtractorConfig::default());
    let facts = outcomes.remove(0).result.unwrap();

    let module_label = facts.facts.rows(Table::Modules).next().unwrap().label("id");
    let comment = facts.facts.rows(Table::Comments).next().unwrap();
    assert_eq!(comment.label("module"), module_label);
    assert_eq!(comment.str("text"), Some("# comment"));
    assert_eq!(comment.str("line_text"), Some("# comment"));

    let numlines = facts.facts.rows(Table::Numlines).next().unwrap();
    assert_eq!(numlines.int("lines"), Some(2));
    assert_eq!(numlines.int("code"), Some(1));
    assert_eq!(numlines.int("comments"), Some(1));
}

#[test]
fn optional_relations_can_be_switched_off() {
    let mut t = Tree::new("main.k");
    let value = t.at(1, 4, 1, 5).int(1);
    let stmt = t.at(1, 0, 1, 5).assign("x", value);
    let config = ExtractorConfig::default().with_lines(false).with_comments(false);
    let facts = extract_main_with("x = 1\n", vec![stmt], &config);
    assert_eq!(facts.facts.count(Table::Lines), 0);
    assert_eq!(facts.facts.count(Table::Numlines), 0);
    assert_eq!(facts.facts.count(Table::Stmts), 1);
}

// ============================================================================
// Determinism and failure isolation
// ============================================================================

#[test]
fn extraction_is_deterministic() {
    let render = || {
        let mut t = Tree::new("main.k");
        let body = corpus(&mut t);
        let facts = extract_main("x\n", body);
        (
            to_trap_string(&[], &facts.definitions, &facts.facts),
            to_json("main.k", &facts.definitions, &facts.facts).to_string(),
        )
    };
    assert_eq!(render(), render());
}

#[test]
fn span_outside_source_aborts_only_its_module() {
    let mut good = Tree::new("a.k");
    let value = good.at(1, 4, 1, 5).int(1);
    let good_stmt = good.at(1, 0, 1, 5).assign("x", value);

    let mut bad = Tree::new("b.k");
    let value = bad.at(1, 4, 1, 5).int(1);
    // column 40 is past the end of line 1
    let bad_stmt = bad.at(1, 0, 1, 40).assign("y", value);

    let both = bundle_json(
        vec![
            module("a.k", "a", vec![good_stmt.clone()]),
            module("b.k", "b", vec![bad_stmt]),
        ],
        empty_symbols(),
    );
    let alone = bundle_json(vec![module("a.k", "a", vec![good_stmt])], empty_symbols());
    let sources = [("a.k", "x = 1\n"), ("b.k", "y = 1\n")];
    let config = ExtractorConfig::default();

    let outcomes = run(&both, &sources, &config);
    assert_eq!(outcomes.len(), 2);
    match &outcomes[1].result {
        Err(ExtractError::SpanOutOfBounds { file, lines, .. }) => {
            assert_eq!(file, "b.k");
            assert_eq!(*lines, 1);
        }
        other => panic!("expected span error, got {:?}", other),
    }

    let with_sibling = outcomes[0].result.as_ref().unwrap();
    let solo = run(&alone, &sources, &config).remove(0).result.unwrap();
    assert_eq!(
        to_trap_string(&[], &with_sibling.definitions, &with_sibling.facts),
        to_trap_string(&[], &solo.definitions, &solo.facts)
    );
}

#[test]
fn unknown_node_variant_aborts_only_its_module() {
    let mut a = Tree::new("a.k");
    let value = a.at(1, 4, 1, 5).int(1);
    let assign = a.at(1, 0, 1, 5).assign("x", value);

    let mut b = Tree::new("b.k");
    let unknown = b.node(json!({ "type": "Goto", "label": "x" }));

    let bundle = bundle_json(
        vec![module("a.k", "a", vec![assign]), module("b.k", "b", vec![unknown])],
        empty_symbols(),
    );
    let outcomes = run(
        &bundle,
        &[("a.k", "x = 1\n"), ("b.k", "goto x\n")],
        &ExtractorConfig::default(),
    );
    assert_eq!(outcomes.len(), 2);

    let err = outcomes[1].result.as_ref().unwrap_err();
    assert_eq!(err.kind(), "unsupported_variant");
    assert!(err.to_string().contains("Goto"));

    let a = outcomes[0].result.as_ref().unwrap();
    assert_eq!(a.facts.count(Table::Stmts), 1);
    assert_eq!(a.facts.count(Table::Exprs), 1);
}
