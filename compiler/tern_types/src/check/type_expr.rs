//! Resolving type expressions.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{TypeExprId, TypeExprKind};

use super::Checker;
use crate::{FunctionType, Type, TypeState};

impl Checker<'_> {
    /// Resolve a type expression in `state`'s defined-type scopes.
    pub(super) fn resolve_type(
        &mut self,
        id: TypeExprId,
        state: &TypeState,
    ) -> Result<Type, Diagnostic> {
        let expr = self.ast.type_expr(id);
        match &expr.kind {
            TypeExprKind::Named(name) => state.lookup_type(*name).ok_or_else(|| {
                Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!("unknown type `{}`", self.name(*name)))
                    .with_label(expr.span, "not found in this scope")
            }),
            TypeExprKind::Record(fields) => {
                let mut resolved = Vec::with_capacity(fields.len());
                for field in fields {
                    resolved.push((field.name, self.resolve_type(field.ty, state)?));
                }
                Ok(Type::record(resolved))
            }
            TypeExprKind::Function {
                purity,
                generics,
                params,
                ret,
            } => {
                let mut scope = state.child_scope();
                let generics = self.declare_generics(generics, &mut scope)?;
                let mut resolved = Vec::with_capacity(params.len());
                for &param in params {
                    resolved.push(self.resolve_type(param, &scope)?);
                }
                Ok(Type::function(FunctionType {
                    generics,
                    params: resolved,
                    ret: self.resolve_type(*ret, &scope)?,
                    purity: *purity,
                }))
            }
        }
    }
}
