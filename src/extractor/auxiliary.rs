//! Identifiers, strings and the auxiliary constructs that hang off
//! statements and expressions.

use kclfacts_ast::{
    Arguments, AugOp, CompClause, ConfigEntry, ExprContext, Identifier, Keyword, Node, NodeId,
    SchemaConfig, SchemaIndexSignature,
};
use kclfacts_core::context::Context;
use kclfacts_core::error::ExtractError;
use kclfacts_core::facts::Table;
use kclfacts_core::label::Label;

use super::kinds::{aug_op_kind, config_entry_op_kind, expr_context_kind};
use super::Session;

impl<'a> Session<'a> {
    // ------------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------------

    /// Emit a located identifier.
    pub(super) fn visit_identifier(
        &mut self,
        node: &Node<Identifier>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.emit_identifier(label, &node.node, &node.id, ctx);
        self.finish_node(label, &span);
        Ok(())
    }

    /// Emit the identifier fact `label` and its pkgpath and context, then
    /// link it to the schema the node `id` resolves to.
    pub(super) fn emit_identifier(
        &mut self,
        label: Label,
        ident: &Identifier,
        id: &NodeId,
        ctx: Context,
    ) {
        self.add(
            Table::Identifiers,
            vec![
                label.into(),
                ctx.current().into(),
                ctx.child_index().into(),
                ident.name().into(),
            ],
        );
        let c = ctx.enter(label);
        if let Some(pkgpath) = ident.pkgpath() {
            self.emit_string(pkgpath, c.with_new_idx(0));
        }
        self.emit_expr_context(ident.ctx, label);
        self.link_schema(id, label, ctx);
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    /// Emit a plain string child. It has no node of its own, so its label is
    /// fresh and it has no location.
    pub(super) fn emit_string(&mut self, value: &str, ctx: Context) {
        let label = self.fresh();
        self.add(
            Table::Strings,
            vec![
                label.into(),
                ctx.current().into(),
                ctx.child_index().into(),
                value.into(),
            ],
        );
    }

    /// Emit a located string node.
    pub(super) fn visit_string_node(
        &mut self,
        node: &Node<String>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::Strings,
            vec![
                label.into(),
                ctx.current().into(),
                ctx.child_index().into(),
                node.node.as_str().into(),
            ],
        );
        self.finish_node(label, &span);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Operators
    // ------------------------------------------------------------------------

    pub(super) fn emit_aug_op(&mut self, op: AugOp, ctx: Context) {
        let label = self.fresh();
        self.add(
            Table::AugOps,
            vec![
                label.into(),
                aug_op_kind(op).into(),
                ctx.current().into(),
                op.symbol().into(),
            ],
        );
    }

    pub(super) fn emit_expr_context(&mut self, expr_ctx: ExprContext, parent: Label) {
        let label = self.fresh();
        self.add(
            Table::ExprContexts,
            vec![
                label.into(),
                expr_context_kind(expr_ctx).into(),
                parent.into(),
            ],
        );
    }

    // ------------------------------------------------------------------------
    // Config entries, keywords and comprehension clauses
    // ------------------------------------------------------------------------

    pub(super) fn visit_config_entry(
        &mut self,
        node: &Node<ConfigEntry>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.emit_config_entry(label, &node.node, ctx)?;
        self.finish_node(label, &span);
        Ok(())
    }

    /// Emit the config entry fact `label` and its key, value and operation.
    pub(super) fn emit_config_entry(
        &mut self,
        label: Label,
        entry: &ConfigEntry,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        self.add(
            Table::ConfigEntries,
            vec![label.into(), ctx.current().into(), ctx.child_index().into()],
        );
        let c = ctx.enter(label);
        self.visit_opt(&entry.key, c.with_new_idx(0), Self::visit_expr)?;
        self.visit_expr(&entry.value, c.with_new_idx(1))?;

        let op = self.fresh();
        self.add(
            Table::ConfigEntryOps,
            vec![
                op.into(),
                config_entry_op_kind(entry.operation).into(),
                entry.operation.symbol().into(),
                label.into(),
            ],
        );
        Ok(())
    }

    pub(super) fn visit_keyword(
        &mut self,
        node: &Node<Keyword>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::Keywords,
            vec![label.into(), ctx.current().into(), ctx.child_index().into()],
        );
        let c = ctx.enter(label);
        self.visit_identifier(&node.node.arg, c.with_new_idx(0))?;
        self.visit_opt(&node.node.value, c.with_new_idx(0), Self::visit_expr)?;
        self.finish_node(label, &span);
        Ok(())
    }

    pub(super) fn visit_comp_clause(
        &mut self,
        node: &Node<CompClause>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::CompClauses,
            vec![label.into(), ctx.current().into(), ctx.child_index().into()],
        );
        let c = ctx.enter(label);
        let clause = &node.node;
        self.visit_list(
            &clause.targets,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;
        self.visit_list(&clause.ifs, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
        self.visit_expr(&clause.iter, c.with_new_idx(0))?;
        self.finish_node(label, &span);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Arguments, schema configs and index signatures
    // ------------------------------------------------------------------------

    /// Emit a parameter list. Defaults and annotations stay aligned with the
    /// parameter they belong to.
    pub(super) fn visit_arguments(
        &mut self,
        node: &Node<Arguments>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::Arguments,
            vec![label.into(), ctx.current().into(), ctx.child_index().into()],
        );
        let c = ctx.enter(label);
        let args = &node.node;
        self.visit_list(
            &args.args,
            Table::IdentifierLists,
            c.with_new_idx(0),
            Self::visit_identifier,
        )?;
        self.visit_positional(
            &args.defaults,
            Table::ExprLists,
            c.with_new_idx(0),
            Self::visit_expr,
        )?;
        self.visit_positional(
            &args.ty_list,
            Table::TypeLists,
            c.with_new_idx(0),
            Self::visit_type,
        )?;
        self.finish_node(label, &span);
        Ok(())
    }

    pub(super) fn visit_schema_config(
        &mut self,
        node: &Node<SchemaConfig>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        self.add(
            Table::SchemaConfigs,
            vec![label.into(), ctx.current().into(), ctx.child_index().into()],
        );
        self.visit_schema_config_slots(&node.node, ctx.enter(label))?;
        self.finish_node(label, &span);
        Ok(())
    }

    /// Children of a schema instantiation, shared by the `Unification`
    /// statement and the schema expression.
    pub(super) fn visit_schema_config_slots(
        &mut self,
        config: &SchemaConfig,
        c: Context,
    ) -> Result<(), ExtractError> {
        self.visit_identifier(&config.name, c.with_new_idx(0))?;
        self.visit_list(&config.args, Table::ExprLists, c.with_new_idx(0), Self::visit_expr)?;
        self.visit_list(
            &config.kwargs,
            Table::KeywordLists,
            c.with_new_idx(0),
            Self::visit_keyword,
        )?;
        self.visit_expr(&config.config, c.with_new_idx(0))
    }

    pub(super) fn visit_index_signature(
        &mut self,
        node: &Node<SchemaIndexSignature>,
        ctx: Context,
    ) -> Result<(), ExtractError> {
        let (label, span) = self.label_node(node)?;
        let sig = &node.node;
        self.add(
            Table::IndexSignatures,
            vec![
                label.into(),
                ctx.current().into(),
                ctx.child_index().into(),
                sig.any_other.into(),
            ],
        );
        let c = ctx.enter(label);
        self.visit_opt(&sig.key_name, c.with_new_idx(0), Self::visit_string_node)?;
        self.visit_type(&sig.key_ty, c.with_new_idx(0))?;
        self.visit_type(&sig.value_ty, c.with_new_idx(1))?;
        self.visit_opt(&sig.value, c.with_new_idx(0), Self::visit_expr)?;
        self.finish_node(label, &span);
        Ok(())
    }
}
