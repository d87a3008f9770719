//! Function definitions and closure capture.

use std::rc::Rc;

use tern_diagnostic::Diagnostic;
use tern_ir::{FunctionDef, GenericParam, Name};

use super::Checker;
use crate::{FunctionType, ParamType, RespState, Type, TypeState};

impl Checker<'_> {
    /// Declare `generics` into `scope` as fresh parameter types.
    ///
    /// Constraints resolve in order, so a later generic may be bounded by an
    /// earlier one.
    pub(super) fn declare_generics(
        &mut self,
        generics: &[GenericParam],
        scope: &mut TypeState,
    ) -> Result<Vec<Rc<ParamType>>, Diagnostic> {
        let mut params = Vec::with_capacity(generics.len());
        for generic in generics {
            let constraint = match generic.constraint {
                Some(ty) => self.resolve_type(ty, scope)?,
                None => Type::unknown(),
            };
            let param = Rc::new(ParamType {
                id: self.ids.fresh(),
                name: generic.name,
                constraint,
            });
            let declared = param.clone();
            scope.define_type(generic.name, Rc::new(move || Type::Param(declared.clone())));
            params.push(param);
        }
        Ok(params)
    }

    /// Check a function definition.
    ///
    /// Returns the upward result for the enclosing level, the function type,
    /// and the names the function value must capture.
    pub(super) fn check_function(
        &mut self,
        def: &FunctionDef,
        state: &TypeState,
    ) -> Result<(RespState, Type, Vec<Name>), Diagnostic> {
        let enclosing_depth = state.function_depth();
        let mut body_state = state.function_body(def.purity);
        let generics = self.declare_generics(&def.generics, &mut body_state)?;

        let mut inner = RespState::new();
        let mut params = Vec::with_capacity(def.params.len());
        for &param in &def.params {
            let (param_resp, ty) = self.check_pattern(param, None, false, false, &body_state)?;
            self.check_redeclaration(&param_resp.declarations, &body_state)?;
            for decl in &param_resp.declarations {
                body_state.declare(decl.name, decl.ty.clone());
            }
            inner.merge_scoped(param_resp);
            params.push(ty);
        }

        let declared_ret = match def.return_type {
            Some(ty) => Some(self.resolve_type(ty, &body_state)?),
            None => None,
        };

        let (body_resp, body_ty) = self.check_node(def.body, &body_state)?;
        inner.merge_scoped(body_resp);

        let body_span = self.node_span(def.body);
        let ret = if let Some(declared) = declared_ret {
            if !body_ty.is_never() {
                self.expect_assignable(&body_ty, &declared, body_span)?;
            }
            for (ty, span) in &inner.return_types {
                self.expect_assignable(ty, &declared, *span)?;
            }
            declared
        } else {
            let mut ret = body_ty;
            for (ty, span) in &inner.return_types {
                ret = self.reconcile(&ret, ty, *span, "returned values")?;
            }
            ret
        };

        // Bindings owned outside the function are captured; those owned
        // further out than the enclosing level stay free there too.
        let mut captures = Vec::new();
        let mut resp = RespState::new();
        for var in &inner.outer_scope_vars {
            if var.depth <= enclosing_depth && !captures.contains(&var.name) {
                captures.push(var.name);
            }
            if var.depth < enclosing_depth {
                resp.capture(var.name, var.depth);
            }
        }
        tracing::trace!(
            captures = captures.len(),
            purity = %def.purity,
            "function checked"
        );

        let ty = Type::function(FunctionType {
            generics,
            params,
            ret,
            purity: def.purity,
        });
        Ok((resp, ty, captures))
    }
}

