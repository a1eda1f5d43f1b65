//! Expression emission, including literals and operators.

use kclfacts_ast::{CmpOp, Compare, Expr, Node, NumberLit, QuantExpr, Subscript};
use kclfacts_core::context::Context;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::{Table, Value};
use kclfacts_core::label::Label;

use super::kinds::{
    bin_op_kind, cmp_op_kind, expr_kind, number_kind, quant_op_kind, unary_op_kind,
    LITERAL_NAME_CONSTANT, LITERAL_STR,
};
use super::Session;

impl<'a> Session<'a> {
    /// Emit an expression and its subtree.
    pub(super) fn visit_expr(&mut self, node: &Node<Expr>, ctx: Context) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        let text = self.snippet(&span);
        self.add(
            Table::Exprs,
            vec![
                label.into(),
                expr_kind(&node.node).into(),
                ctx.current().into(),
                ctx.child_index().into(),
                text.into(),
            ],
        );

        let c = ctx.enter(label);
        match &node.node {
            Expr::Identifier(ident) => {
                // The identifier has no node of its own; it shares the
                // expression's id and span.
                let ident_label = self.fresh();
                self.emit_identifier(ident_label, ident, &node.id, c.with_new_idx(0));
                self.finish_node(ident_label, &span);
            }
            Expr::Unary(e) => {
                self.visit_expr(&e.operand, c.with_new_idx(0))?;
                self.emit_op(Table::UnaryOps, unary_op_kind(e.op), label);
            }
            Expr::Binary(e) => {
                self.visit_expr(&e.left, c.with_new_idx(0))?;
                self.visit_expr(&e.right, c.with_new_idx(1))?;
                self.emit_op(Table::BinaryOps, bin_op_kind(e.op), label);
            }
            Expr::If(e) => {
                self.visit_expr(&e.body, c.with_new_idx(0))?;
                self.visit_expr(&e.cond, c.with_new_idx(1))?;
                self.visit_expr(&e.orelse, c.with_new_idx(2))?;
            }
            Expr::Selector(e) => {
                self.visit_identifier(&e.attr, c.with_new_idx(0))?;
                self.visit_expr(&e.value, c.with_new_idx(0))?;
                self.emit_expr_context(e.ctx, label);
            }
            Expr::Call(e) => {
                self.visit_list(&e.args, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
                self.visit_expr(&e.func, c.with_new_idx(0))?;
                self.visit_list(
                    &e.keywords,
                    Table::KeywordLists,
                    c.with_new_idx(0),
                    Self::visit_keyword,
                )?;
            }
            Expr::Paren(e) => self.visit_expr(&e.expr, c.with_new_idx(0))?,
            Expr::Quant(e) => self.visit_quant(e, label, c)?,
            Expr::List(e) => {
                self.visit_list(&e.elts, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
                self.emit_expr_context(e.ctx, label);
            }
            Expr::ListIfItem(e) => {
                self.visit_list(&e.exprs, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
                self.visit_expr(&e.if_cond, c.with_new_idx(0))?;
                self.visit_opt(&e.orelse, c.with_new_idx(1), Self::visit_expr)?;
            }
            Expr::ListComp(e) => {
                self.visit_expr(&e.elt, c.with_new_idx(0))?;
                self.visit_list(
                    &e.generators,
                    Table::CompClauseLists,
                    c.with_new_idx(0),
                    Self::visit_comp_clause,
                )?;
            }
            Expr::Starred(e) => {
                self.visit_expr(&e.value, c.with_new_idx(0))?;
                self.emit_expr_context(e.ctx, label);
            }
            Expr::DictComp(e) => {
                // The entry is unlocated, so it gets a fresh label.
                let entry = self.fresh();
                self.emit_config_entry(entry, &e.entry, c.with_new_idx(0))?;
                self.visit_list(
                    &e.generators,
                    Table::CompClauseLists,
                    c.with_new_idx(0),
                    Self::visit_comp_clause,
                )?;
            }
            Expr::ConfigIfEntry(e) => {
                self.visit_list(
                    &e.items,
                    Table::ConfigEntryLists,
                    c.with_new_idx(0),
                    Self::visit_config_entry,
                )?;
                self.visit_expr(&e.if_cond, c.with_new_idx(0))?;
                self.visit_opt(&e.orelse, c.with_new_idx(1), Self::visit_expr)?;
            }
            Expr::Schema(e) => self.visit_schema_config_slots(e, c)?,
            Expr::Config(e) => self.visit_list(
                &e.items,
                Table::ConfigEntryLists,
                c.with_new_idx(0),
                Self::visit_config_entry,
            )?,
            Expr::Check(e) => {
                self.visit_opt(&e.if_cond, c.with_new_idx(0), Self::visit_expr)?;
                self.visit_expr(&e.test, c.with_new_idx(1))?;
                self.visit_opt(&e.msg, c.with_new_idx(2), Self::visit_expr)?;
            }
            Expr::Lambda(e) => {
                self.visit_opt(&e.args, c.with_new_idx(0), Self::visit_arguments)?;
                self.visit_list(&e.body, Table::StmtLists, c.with_new_idx(0), Self::visit_stmt)?;
                self.visit_opt(&e.return_ty, c.with_new_idx(0), Self::visit_type)?;
            }
            Expr::Subscript(e) => self.visit_subscript(e, label, c)?,
            Expr::Compare(e) => self.visit_compare(e, label, c)?,
            Expr::JoinedString(e) => {
                self.emit_string(&e.raw_value, c.with_new_idx(0));
                self.visit_list(&e.values, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
            }
            Expr::FormattedValue(e) => {
                if let Some(spec) = &e.format_spec {
                    self.emit_string(spec, c.with_new_idx(0));
                }
                self.visit_expr(&e.value, c.with_new_idx(0))?;
            }
            Expr::NumberLit(e) => self.emit_number(e, label),
            Expr::StringLit(e) => self.emit_literal(LITERAL_STR, label, e.value.as_str()),
            Expr::NameConstantLit(e) => {
                self.emit_literal(LITERAL_NAME_CONSTANT, label, e.value.symbol())
            }
            Expr::Missing(_) => {}
        }

        self.finish_node(label, &span);
        Ok(())
    }

    fn visit_quant(&mut self, e: &QuantExpr, label: Label, c: Context) -> Result<(), ExtractError> {
        self.visit_expr(&e.target, c.with_new_idx(0))?;
        self.visit_expr(&e.test, c.with_new_idx(1))?;
        self.visit_opt(&e.if_cond, c.with_new_idx(2), Self::visit_expr)?;
        self.visit_list(
            &e.variables,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;
        self.emit_op(Table::QuantOps, quant_op_kind(e.op), label);
        self.emit_expr_context(e.ctx, label);
        Ok(())
    }

    fn visit_subscript(&mut self, e: &Subscript, label: Label, c: Context) -> Result<(), ExtractError> {
        self.emit_expr_context(e.ctx, label);
        self.visit_expr(&e.value, c.with_new_idx(0))?;
        self.visit_opt(&e.index, c.with_new_idx(1), Self::visit_expr)?;
        self.visit_opt(&e.lower, c.with_new_idx(2), Self::visit_expr)?;
        self.visit_opt(&e.upper, c.with_new_idx(3), Self::visit_expr)?;
        self.visit_opt(&e.step, c.with_new_idx(4), Self::visit_expr)
    }

    /// Comparators, then the left operand, then one operator per
    /// comparator numbered by position.
    fn visit_compare(&mut self, e: &Compare, label: Label, c: Context) -> Result<(), ExtractError> {
        self.visit_list(
            &e.comparators,
            Table::ExprLists,
            c.with_new_idx(0),
            Self::visit_expr,
        )?;
        self.visit_expr(&e.left, c.with_new_idx(0))?;
        for (i, op) in e.ops.iter().enumerate() {
            self.emit_cmp_op(*op, label, i);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Leaves
    // ------------------------------------------------------------------------

    /// Emit an `(id, kind, parent)` operator fact.
    fn emit_op(&mut self, table: Table, kind: u32, parent: Label) {
        let label = self.fresh();
        self.add(table, vec![label.into(), kind.into(), parent.into()]);
    }

    fn emit_cmp_op(&mut self, op: CmpOp, parent: Label, index: usize) {
        let label = self.fresh();
        self.add(
            Table::CmpOps,
            vec![
                label.into(),
                cmp_op_kind(op).into(),
                parent.into(),
                index.into(),
            ],
        );
    }

    fn emit_number(&mut self, lit: &NumberLit, parent: Label) {
        if let Some(suffix) = lit.binary_suffix {
            self.emit_number_suffix(suffix.symbol(), parent);
        }
        self.emit_literal(number_kind(&lit.value), parent, lit.value.text());
    }

    pub(super) fn emit_number_suffix(&mut self, suffix: &str, parent: Label) {
        let label = self.fresh();
        self.add(
            Table::NumberSuffixes,
            vec![label.into(), suffix.into(), parent.into()],
        );
    }

    pub(super) fn emit_literal(&mut self, kind: u32, parent: Label, value: impl Into<Value>) {
        let label = self.fresh();
        self.add(
            Table::Literals,
            vec![label.into(), kind.into(), parent.into(), value.into()],
        );
    }
}
