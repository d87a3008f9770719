//! Call sites: purity, permission, arity, and generic unification.

use std::rc::Rc;

use smallvec::SmallVec;
use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{CallExpr, Span};

use super::{CheckResult, Checker};
use crate::{
    align_types, is_assignable, substitute, FunctionType, ParamType, Substitution, Type,
    TypeState, Variance,
};

impl Checker<'_> {
    pub(super) fn check_call(
        &mut self,
        call: &CallExpr,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let (mut resp, callee_ty) = self.check_node(call.callee, state)?;
        let callee_span = self.node_span(call.callee);
        let Some(function) = callee_ty.as_function().cloned() else {
            return Err(Diagnostic::error(ErrorCode::E2014)
                .with_message(format!("`{}` is not callable", self.show(&callee_ty)))
                .with_label(callee_span, "not a function"));
        };

        if function.purity < state.min_purity() {
            return Err(Diagnostic::error(ErrorCode::E2007)
                .with_message(format!(
                    "cannot call a `{}` function from a `{}` context",
                    function.purity,
                    state.min_purity()
                ))
                .with_label(callee_span, format!("callee is `{}`", function.purity)));
        }
        if call.permission != function.purity {
            return Err(Diagnostic::error(ErrorCode::E2008)
                .with_message(format!(
                    "a `{}` function must be called with {}",
                    function.purity,
                    function.purity.call_form()
                ))
                .with_label(span, format!("called with {}", call.permission.call_form())));
        }
        if call.args.len() != function.params.len() {
            return Err(Diagnostic::error(ErrorCode::E2004)
                .with_message(format!(
                    "expected {} argument(s), found {}",
                    function.params.len(),
                    call.args.len()
                ))
                .with_label(span, "wrong number of arguments"));
        }

        let mut args: SmallVec<[(Type, Span); 4]> = SmallVec::with_capacity(call.args.len());
        for &arg in &call.args {
            let (arg_resp, ty) = self.check_node(arg, state)?;
            resp.merge_scoped(arg_resp);
            args.push((ty, self.node_span(arg)));
        }

        let mut bindings = self.unify_call(&function, call, &args, span, state)?;
        for (param, (ty, arg_span)) in function.params.iter().zip(&args) {
            let expected = substitute(param, &mut bindings);
            self.expect_assignable(ty, &expected, *arg_span)?;
        }
        let ret = substitute(&function.ret, &mut bindings);
        Ok((resp, ret))
    }

    /// Bind every generic of `function` for this call.
    fn unify_call(
        &mut self,
        function: &FunctionType,
        call: &CallExpr,
        args: &[(Type, Span)],
        span: Span,
        state: &TypeState,
    ) -> Result<Substitution, Diagnostic> {
        let mut bindings = Substitution::new();
        if function.generics.is_empty() && call.type_args.is_empty() {
            return Ok(bindings);
        }
        if call.type_args.len() > function.generics.len() {
            return Err(Diagnostic::error(ErrorCode::E2011)
                .with_message(format!(
                    "expected at most {} type argument(s), found {}",
                    function.generics.len(),
                    call.type_args.len()
                ))
                .with_label(span, "too many type arguments"));
        }

        // Where each generic got its binding, for constraint errors.
        let mut bound_at: SmallVec<[Span; 4]> =
            SmallVec::from_elem(span, function.generics.len());
        for ((generic, &type_arg), at) in function
            .generics
            .iter()
            .zip(&call.type_args)
            .zip(bound_at.iter_mut())
        {
            bindings.insert(generic.id, self.resolve_type(type_arg, state)?);
            *at = self.ast.type_expr(type_arg).span;
        }

        for (param, (arg_ty, arg_span)) in function.params.iter().zip(args) {
            align_types(param, arg_ty, &mut |generic: &Rc<ParamType>, actual: &Type, variance| {
                // Explicit type arguments are fixed; inference only fills the rest.
                let index = match function.generics.iter().position(|g| g.id == generic.id) {
                    Some(index) if index >= call.type_args.len() => index,
                    _ => return Ok(()),
                };
                let merged = match bindings.get(generic.id) {
                    None => {
                        bound_at[index] = *arg_span;
                        actual.clone()
                    }
                    Some(prev) => self.merge_binding(generic, prev, actual, variance, *arg_span)?,
                };
                tracing::trace!(
                    generic = self.name(generic.name),
                    bound = %merged.display(self.interner),
                    "generic bound"
                );
                bindings.insert(generic.id, merged);
                Ok::<(), Diagnostic>(())
            })?;
        }

        // Constraints may name other generics of this call, so they are
        // checked once every binding is known.
        for (generic, &at) in function.generics.iter().zip(&bound_at) {
            if let Some(ty) = bindings.get(generic.id).cloned() {
                self.check_constraint(generic, &ty, &mut bindings, at)?;
            }
        }

        if let Some(unbound) = function
            .generics
            .iter()
            .find(|g| bindings.get(g.id).is_none())
        {
            return Err(Diagnostic::error(ErrorCode::E2005)
                .with_message(format!(
                    "cannot infer generic `{}`; provide explicit type arguments",
                    self.name(unbound.name)
                ))
                .with_label(span, "type arguments needed"));
        }
        Ok(bindings)
    }

    /// `ty` must satisfy `generic`'s constraint, with bindings made so far
    /// substituted into it.
    fn check_constraint(
        &self,
        generic: &ParamType,
        ty: &Type,
        bindings: &mut Substitution,
        span: Span,
    ) -> Result<(), Diagnostic> {
        let constraint = substitute(&generic.constraint, bindings);
        if is_assignable(ty, &constraint) {
            return Ok(());
        }
        Err(Diagnostic::error(ErrorCode::E2009)
            .with_message(format!(
                "`{}` does not satisfy the constraint `{}` of `{}`",
                self.show(ty),
                self.show(&constraint),
                self.name(generic.name)
            ))
            .with_label(span, "constraint not satisfied"))
    }

    /// Reconcile a second inference for an already bound generic: keep the
    /// wider type in covariant position, the narrower one otherwise.
    fn merge_binding(
        &self,
        generic: &ParamType,
        prev: &Type,
        actual: &Type,
        variance: Variance,
        span: Span,
    ) -> Result<Type, Diagnostic> {
        let prev_fits = is_assignable(prev, actual);
        let actual_fits = is_assignable(actual, prev);
        if !prev_fits && !actual_fits {
            return Err(Diagnostic::error(ErrorCode::E2010)
                .with_message(format!(
                    "conflicting types inferred for `{}`: `{}` and `{}`",
                    self.name(generic.name),
                    self.show(prev),
                    self.show(actual)
                ))
                .with_label(span, "inferred differently here"));
        }
        let keep_prev = match variance {
            Variance::Covariant => actual_fits,
            Variance::Contravariant => prev_fits,
        };
        Ok(if keep_prev { prev.clone() } else { actual.clone() })
    }
}
