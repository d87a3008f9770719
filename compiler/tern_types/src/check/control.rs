//! Branching, blocks, and binding statements.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{MatchArm, Name, NodeId, PatternId, Span};

use super::{CheckResult, Checker};
use crate::{Declaration, RespState, Type, TypeState};

impl Checker<'_> {
    pub(super) fn check_if(
        &mut self,
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let (mut resp, cond_ty) = self.check_node(cond, state)?;
        self.expect_assignable(&cond_ty, &Type::boolean(), self.node_span(cond))?;
        let (then_resp, then_ty) = self.check_node(then_branch, state)?;
        let (else_resp, else_ty) = self.check_node(else_branch, state)?;
        resp.merge_scoped(then_resp);
        resp.merge_scoped(else_resp);
        let ty = self.reconcile(&then_ty, &else_ty, span, "`if` branches")?;
        Ok((resp, ty))
    }

    pub(super) fn check_match(
        &mut self,
        scrutinee: NodeId,
        arms: &[MatchArm],
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        if arms.is_empty() {
            return Err(Diagnostic::error(ErrorCode::E2015)
                .with_message("`match` needs at least one arm")
                .with_label(span, "no arms"));
        }
        let (mut resp, scrutinee_ty) = self.check_node(scrutinee, state)?;
        let mut result: Option<Type> = None;
        for arm in arms {
            let mut arm_scope = state.child_scope();
            let (pattern_resp, _) =
                self.check_pattern(arm.pattern, Some(&scrutinee_ty), true, false, &arm_scope)?;
            self.check_redeclaration(&pattern_resp.declarations, &arm_scope)?;
            for decl in &pattern_resp.declarations {
                arm_scope.declare(decl.name, decl.ty.clone());
            }
            resp.merge_scoped(pattern_resp);

            let (body_resp, body_ty) = self.check_node(arm.body, &arm_scope)?;
            resp.merge_scoped(body_resp);
            result = Some(match result {
                None => body_ty,
                Some(prev) => self.reconcile(&prev, &body_ty, arm.span, "`match` arms")?,
            });
        }
        Ok((resp, result.unwrap_or_else(Type::never)))
    }

    pub(super) fn check_block(&mut self, stmts: &[NodeId], state: &TypeState) -> CheckResult {
        let mut scope = state.child_scope();
        let mut resp = RespState::new();
        let mut ty = Type::unit();
        let mut diverges = false;
        for &stmt in stmts {
            let (stmt_resp, stmt_ty) = self.check_statement(stmt, &mut scope)?;
            diverges |= stmt_ty.is_never();
            resp.merge_scoped(stmt_resp);
            ty = stmt_ty;
        }
        if diverges {
            ty = Type::never();
        }
        Ok((resp, ty))
    }

    pub(super) fn check_let(
        &mut self,
        pattern: PatternId,
        value: NodeId,
        export: bool,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        if export && !state.is_module_scope() {
            return Err(Diagnostic::error(ErrorCode::E2016)
                .with_message("`export` is only allowed at module level")
                .with_label(span, "nested export"));
        }
        let (mut resp, value_ty) = self.check_node(value, state)?;
        resp.declarations.clear();
        let (pattern_resp, _) = self.check_pattern(pattern, Some(&value_ty), false, export, state)?;
        self.check_redeclaration(&pattern_resp.declarations, state)?;
        if export {
            self.exports.extend(
                pattern_resp
                    .declarations
                    .iter()
                    .map(|d| (d.name, d.ty.clone())),
            );
        }
        resp.merge(pattern_resp);
        Ok((resp, Type::unit()))
    }

    pub(super) fn check_return(
        &mut self,
        value: NodeId,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        if !state.is_in_function_body() {
            return Err(Diagnostic::error(ErrorCode::E2016)
                .with_message("`return` outside of a function body")
                .with_label(span, "not inside a function"));
        }
        let (mut resp, ty) = self.check_node(value, state)?;
        resp.declarations.clear();
        resp.add_return(ty, span);
        Ok((resp, Type::never()))
    }

    pub(super) fn check_import(
        &mut self,
        pattern: PatternId,
        path: Name,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        if !state.is_module_scope() {
            return Err(Diagnostic::error(ErrorCode::E2016)
                .with_message("`import` is only allowed at module level")
                .with_label(span, "nested import"));
        }
        tracing::debug!(path = self.name(path), "import");
        let module_ty = self.imports.resolve(path, span)?;
        let (resp, _) = self.check_pattern(pattern, Some(&module_ty), false, false, state)?;
        self.check_redeclaration(&resp.declarations, state)?;
        Ok((resp, Type::unit()))
    }

    /// Names may be declared once per scope, and once per pattern.
    pub(super) fn check_redeclaration(
        &self,
        declarations: &[Declaration],
        state: &TypeState,
    ) -> Result<(), Diagnostic> {
        for (i, decl) in declarations.iter().enumerate() {
            let repeated = declarations[..i].iter().any(|d| d.name == decl.name);
            if repeated || state.is_declared_locally(decl.name) {
                return Err(Diagnostic::error(ErrorCode::E2006)
                    .with_message(format!(
                        "`{}` is already declared in this scope",
                        self.name(decl.name)
                    ))
                    .with_label(decl.span, "declared again here"));
            }
        }
        Ok(())
    }
}
