//! Statement emission.

use kclfacts_ast::{
    AssertStmt, AssignStmt, AugAssignStmt, IfStmt, ImportStmt, Node, RuleStmt, SchemaAttr,
    SchemaStmt, Stmt, TypeAliasStmt,
};
use kclfacts_core::context::Context;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::Table;

use super::kinds::stmt_kind;
use super::Session;

impl<'a> Session<'a> {
    /// Emit a statement and its subtree.
    ///
    /// `ctx.current()` is the slot owner (a statement list) and
    /// `ctx.child_index()` the statement's position in it.
    pub(super) fn visit_stmt(&mut self, node: &Node<Stmt>, ctx: Context) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        let text = self.snippet(&span);
        self.add(
            Table::Stmts,
            vec![
                label.into(),
                stmt_kind(&node.node).into(),
                ctx.current().into(),
                ctx.child_index().into(),
                text.into(),
            ],
        );

        let c = ctx.enter(label).with_statement(label);
        match &node.node {
            Stmt::TypeAlias(s) => self.visit_type_alias(s, c)?,
            Stmt::Expr(s) => {
                self.visit_list(&s.exprs, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?
            }
            Stmt::Unification(s) => {
                self.visit_identifier(&s.target, c.with_new_idx(0))?;
                self.visit_schema_config(&s.value, c.with_new_idx(0))?;
            }
            Stmt::Assign(s) => self.visit_assign(s, c)?,
            Stmt::AugAssign(s) => self.visit_aug_assign(s, c)?,
            Stmt::Assert(s) => self.visit_assert(s, c)?,
            Stmt::If(s) => self.visit_if(s, c)?,
            Stmt::Import(s) => self.visit_import(s, c)?,
            Stmt::SchemaAttr(s) => self.visit_schema_attr(s, c)?,
            Stmt::Schema(s) => self.visit_schema(s, c)?,
            Stmt::Rule(s) => self.visit_rule(s, c)?,
        }

        self.finish_node(label, &span);
        Ok(())
    }

    fn visit_type_alias(&mut self, s: &TypeAliasStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_identifier(&s.type_name, c.with_new_idx(0))?;
        self.visit_string_node(&s.type_value, c.with_new_idx(0))?;
        self.visit_type(&s.ty, c.with_new_idx(0))
    }

    fn visit_assign(&mut self, s: &AssignStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_list(
            &s.targets,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;
        self.visit_expr(&s.value, c.with_new_idx(0))?;
        self.visit_opt(&s.ty, c.with_new_idx(0), Self::visit_type)
    }

    fn visit_aug_assign(&mut self, s: &AugAssignStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_identifier(&s.target, c.with_new_idx(0))?;
        self.visit_expr(&s.value, c.with_new_idx(0))?;
        self.emit_aug_op(s.op, c);
        Ok(())
    }

    fn visit_assert(&mut self, s: &AssertStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_opt(&s.if_cond, c.with_new_idx(0), Self::visit_expr)?;
        self.visit_opt(&s.msg, c.with_new_idx(1), Self::visit_expr)?;
        self.visit_expr(&s.test, c.with_new_idx(2))
    }

    /// Body, then else branch, then condition.
    fn visit_if(&mut self, s: &IfStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_list(&s.body, Table::StmtLists, c.with_new_idx(0), Self::visit_stmt)?;
        self.visit_list(&s.orelse, Table::StmtLists, c.with_new_idx(1), Self::visit_stmt)?;
        self.visit_expr(&s.cond, c.with_new_idx(0))
    }

    fn visit_import(&mut self, s: &ImportStmt, c: Context) -> Result<(), ExtractError> {
        self.emit_string(&s.name, c.with_new_idx(0));
        self.emit_string(&s.pkg_name, c.with_new_idx(1));
        self.emit_string(&s.rawpath, c.with_new_idx(2));
        self.visit_string_node(&s.path, c.with_new_idx(3))?;
        self.visit_opt(&s.asname, c.with_new_idx(4), Self::visit_string_node)
    }

    /// The attribute's doc string is not emitted.
    fn visit_schema_attr(&mut self, s: &SchemaAttr, c: Context) -> Result<(), ExtractError> {
        self.visit_string_node(&s.name, c.with_new_idx(1))?;
        if let Some(op) = s.op {
            self.emit_aug_op(op, c);
        }
        self.visit_opt(&s.value, c.with_new_idx(0), Self::visit_expr)?;
        self.visit_list(
            &s.decorators,
            Table::ExprLists,
            c.with_new_idx(0),
            Self::visit_expr,
        )?;
        self.visit_type(&s.ty, c.with_new_idx(0))
    }

    fn visit_schema(&mut self, s: &SchemaStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_opt(&s.doc, c.with_new_idx(0), Self::visit_string_node)?;
        self.visit_string_node(&s.name, c.with_new_idx(1))?;

        self.visit_opt(&s.parent_name, c.with_new_idx(0), Self::visit_identifier)?;
        self.visit_opt(&s.for_host_name, c.with_new_idx(1), Self::visit_identifier)?;
        self.visit_list(
            &s.mixins,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;

        self.visit_opt(&s.args, c.with_new_idx(0), Self::visit_arguments)?;
        self.visit_list(&s.body, Table::StmtLists, c.with_new_idx(0), Self::visit_stmt)?;

        self.visit_list(
            &s.decorators,
            Table::ExprLists,
            c.with_new_idx(0),
            Self::visit_expr,
        )?;
        self.visit_list(&s.checks, Table::ExprLists, c.with_new_idx(1), Self::visit_expr)?;

        self.visit_opt(
            &s.index_signature,
            c.with_new_idx(0),
            Self::visit_index_signature,
        )
    }

    fn visit_rule(&mut self, s: &RuleStmt, c: Context) -> Result<(), ExtractError> {
        self.visit_string_node(&s.name, c.with_new_idx(0))?;
        self.visit_opt(&s.doc, c.with_new_idx(1), Self::visit_string_node)?;

        self.visit_list(
            &s.parent_rules,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;
        self.visit_opt(&s.for_host_name, c.with_new_idx(0), Self::visit_identifier)?;

        self.visit_list(
            &s.decorators,
            Table::ExprLists,
            c.with_new_idx(0),
            Self::visit_expr,
        )?;
        self.visit_list(&s.checks, Table::ExprLists, c.with_new_idx(1), Self::visit_expr)?;

        self.visit_opt(&s.args, c.with_new_idx(0), Self::visit_arguments)
    }
}
