//! Type annotation emission.

use kclfacts_ast::{IntLiteralType, LiteralType, Node, Type};
use kclfacts_core::context::Context;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::Table;

use super::kinds::{literal_type_kind, type_kind};
use super::Session;

impl<'a> Session<'a> {
    /// Emit a type annotation. The `name` column holds the annotation as
    /// written in KCL.
    pub(super) fn visit_type(&mut self, node: &Node<Type>, ctx: Context) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::Types,
            vec![
                label.into(),
                type_kind(&node.node).into(),
                ctx.current().into(),
                ctx.child_index().into(),
                node.node.to_string().into(),
            ],
        );

        let c = ctx.enter(label);
        match &node.node {
            Type::Any | Type::Basic(_) => {}
            Type::Named(ident) => {
                let ident_label = self.fresh();
                self.emit_identifier(ident_label, ident, &node.id, c.with_new_idx(0));
                self.finish_node(ident_label, &span);
            }
            Type::List(list) => {
                self.visit_opt(&list.inner_type, c.with_new_idx(0), Self::visit_type)?;
            }
            Type::Dict(dict) => {
                self.visit_opt(&dict.key_type, c.with_new_idx(0), Self::visit_type)?;
                self.visit_opt(&dict.value_type, c.with_new_idx(1), Self::visit_type)?;
            }
            Type::Union(union) => self.visit_list(
                &union.type_elements,
                Table::TypeLists,
                c.with_new_idx(0),
                Self::visit_type,
            )?,
            Type::Function(func) => {
                if let Some(params) = &func.params_ty {
                    self.visit_list(params, Table::TypeLists, c.with_new_idx(0), Self::visit_type)?;
                }
                self.visit_opt(&func.ret_ty, c.with_new_idx(1), Self::visit_type)?;
            }
            Type::Literal(lit) => {
                if let LiteralType::Int(IntLiteralType {
                    suffix: Some(suffix),
                    ..
                }) = lit
                {
                    self.emit_number_suffix(suffix.symbol(), label);
                }
                self.emit_literal(literal_type_kind(lit), label, lit.value_text());
            }
        }

        self.finish_node(label, &span);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ExtractorConfig;
    use crate::extractor::{ModuleFacts, ModuleSite, Session};
    use kclfacts_ast::ParseBundle;
    use kclfacts_core::facts::Table;
    use serde_json::{json, Value};

    fn node(id: &str, col: u32, end: u32, body: Value) -> Value {
        json!({
            "id": id, "filename": "main.k",
            "line": 1, "column": col, "end_line": 1, "end_column": end,
            "node": body
        })
    }

    /// Extract `x: <ty> = 1` with `ty` as the annotation.
    fn extract_annotation(source: &str, ty: Value) -> ModuleFacts {
        let len = source.chars().count() as u32;
        let target = node("x", 0, 1, json!({ "names": ["x"], "ctx": "Store" }));
        let value = node(
            "v",
            len - 1,
            len,
            json!({ "type": "NumberLit", "value": { "type": "Int", "value": 1 } }),
        );
        let stmt = node(
            "s",
            0,
            len,
            json!({ "type": "Assign", "targets": [target], "value": value, "ty": ty }),
        );
        let text = json!({
            "program": { "root": "/src", "pkgs": { "__main__": [{ "filename": "main.k", "body": [stmt] }] } }
        })
        .to_string();
        let bundle = ParseBundle::from_json_str(&text, "test").unwrap();
        let module = &bundle.program.pkgs["__main__"][0];
        let config = ExtractorConfig::default().with_lines(false);
        let site = ModuleSite {
            root: "/src",
            package: "__main__",
            index: 0,
        };
        Session::new(&config, "main.k", source, None)
            .extract_module(site, module)
            .unwrap()
    }

    #[test]
    fn dict_type_children_take_key_and_value_slots() {
        let key = node("k", 4, 7, json!({ "type": "Basic", "value": "Str" }));
        let value = node("v2", 8, 11, json!({ "type": "Basic", "value": "Int" }));
        let dict = node(
            "t",
            3,
            12,
            json!({ "type": "Dict", "value": { "key_type": key, "value_type": value } }),
        );
        let facts = extract_annotation("x: {str:int} = 1", dict);
        let types: Vec<_> = facts.facts.rows(Table::Types).collect();
        assert_eq!(types.len(), 3);
        assert_eq!(types[0].str("name"), Some("{str:int}"));
        assert_eq!(types[0].int("kind"), Some(7));
        assert_eq!(types[1].str("name"), Some("str"));
        assert_eq!(types[1].int("index"), Some(0));
        assert_eq!(types[2].str("name"), Some("int"));
        assert_eq!(types[2].int("index"), Some(1));
        assert_eq!(types[1].label("parent"), types[0].label("id"));
    }

    #[test]
    fn named_type_gets_an_identifier() {
        let named = node(
            "t",
            3,
            9,
            json!({ "type": "Named", "value": { "names": ["Person"] } }),
        );
        let facts = extract_annotation("x: Person = 1", named);
        let ty = facts.facts.rows(Table::Types).next().unwrap();
        let ident = facts
            .facts
            .rows(Table::Identifiers)
            .find(|row| row.str("name") == Some("Person"))
            .unwrap();
        assert_eq!(ident.label("parent"), ty.label("id"));
    }

    #[test]
    fn int_literal_type_keeps_its_suffix() {
        let lit = node(
            "t",
            3,
            7,
            json!({ "type": "Literal", "value": { "type": "Int", "value": { "value": 64, "suffix": "Ki" } } }),
        );
        let facts = extract_annotation("x: 64Ki = 1", lit);
        assert_eq!(facts.facts.count(Table::NumberSuffixes), 1);
        let literals: Vec<_> = facts.facts.rows(Table::Literals).collect();
        // the assigned value comes before the annotation
        assert_eq!(literals[0].str("value"), Some("1"));
        assert_eq!(literals[1].str("value"), Some("64"));
        assert_eq!(literals[1].int("kind"), Some(1));
    }
}
