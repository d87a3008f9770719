//! Assignment-target patterns.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{FieldPattern, Name, NodeId, PatternId, PatternKind, Span, TypeExprId};

use super::{CheckResult, Checker};
use crate::{is_assignable, RecordType, RespState, Type, TypeState};

impl Checker<'_> {
    /// Check a pattern against the type flowing into it.
    ///
    /// `incoming` is `None` where nothing flows in (function parameters);
    /// every binding then needs an annotation. `allow_widening` (match arms)
    /// lets a pattern ask for more than the incoming type guarantees; the
    /// runtime check decides. Returns the declarations the pattern makes and
    /// the type it accepts.
    pub(super) fn check_pattern(
        &mut self,
        id: PatternId,
        incoming: Option<&Type>,
        allow_widening: bool,
        is_export: bool,
        state: &TypeState,
    ) -> CheckResult {
        let pattern = self.ast.pattern(id);
        let span = pattern.span;
        match &pattern.kind {
            PatternKind::Bind { name, annotation } => {
                self.check_bind(id, *name, *annotation, incoming, allow_widening, span, state)
            }
            PatternKind::Record(fields) => {
                self.check_record_pattern(fields, incoming, allow_widening, is_export, span, state)
            }
            PatternKind::Constrained { pattern, condition } => {
                if is_export {
                    return Err(Diagnostic::error(ErrorCode::E2018)
                        .with_message("exported bindings cannot use `where` constraints")
                        .with_label(span, "refutable pattern"));
                }
                self.check_constrained(*pattern, *condition, incoming, allow_widening, state)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_bind(
        &mut self,
        id: PatternId,
        name: Name,
        annotation: Option<TypeExprId>,
        incoming: Option<&Type>,
        allow_widening: bool,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let annotated = match annotation {
            Some(ty) => Some(self.resolve_type(ty, state)?),
            None => None,
        };
        let ty = match (incoming, annotated) {
            (None, None) => {
                return Err(Diagnostic::error(ErrorCode::E2005)
                    .with_message(format!(
                        "cannot infer the type of `{}`; add a type annotation",
                        self.name(name)
                    ))
                    .with_label(span, "missing annotation"));
            }
            (Some(incoming), None) => incoming.clone(),
            (incoming, Some(annotated)) => {
                if let Some(incoming) = incoming {
                    let fits = is_assignable(incoming, &annotated)
                        || (allow_widening && is_assignable(&annotated, incoming));
                    if !fits {
                        return Err(self.mismatch(&annotated, incoming, span));
                    }
                }
                self.table.record_annotation(id, annotated.clone());
                annotated
            }
        };
        let mut resp = RespState::new();
        resp.declare(name, ty.clone(), span);
        Ok((resp, ty))
    }

    fn check_record_pattern(
        &mut self,
        fields: &[FieldPattern],
        incoming: Option<&Type>,
        allow_widening: bool,
        is_export: bool,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let record: Option<&RecordType> = match incoming {
            None => None,
            Some(ty) => match ty.as_record().map(|r| &**r) {
                Some(record) => Some(record),
                // Matching on `Unknown` may still find a record at runtime.
                None if allow_widening && ty.is_unknown() => None,
                None => {
                    return Err(Diagnostic::error(ErrorCode::E2013)
                        .with_message(format!(
                            "cannot destructure `{}`: expected a record",
                            self.show(ty)
                        ))
                        .with_label(span, "record pattern"));
                }
            },
        };

        let mut resp = RespState::new();
        let mut accepted = Vec::with_capacity(fields.len());
        for field in fields {
            let field_ty = record.and_then(|r| r.field(field.name));
            if field_ty.is_none() && record.is_some() && !allow_widening {
                let incoming = incoming.map(|ty| self.show(ty)).unwrap_or_default();
                return Err(Diagnostic::error(ErrorCode::E2012)
                    .with_message(format!(
                        "missing field `{}` in `{incoming}`",
                        self.name(field.name)
                    ))
                    .with_label(span, format!("`{}` is not present", self.name(field.name))));
            }
            let (field_resp, ty) =
                self.check_pattern(field.pattern, field_ty, allow_widening, is_export, state)?;
            resp.merge(field_resp);
            accepted.push((field.name, ty));
        }

        let ty = match incoming {
            Some(ty) if record.is_some() => ty.clone(),
            _ => Type::record(accepted),
        };
        Ok((resp, ty))
    }

    fn check_constrained(
        &mut self,
        inner: PatternId,
        condition: NodeId,
        incoming: Option<&Type>,
        allow_widening: bool,
        state: &TypeState,
    ) -> CheckResult {
        let (mut resp, ty) = self.check_pattern(inner, incoming, allow_widening, false, state)?;
        let mut scope = state.child_scope();
        for decl in &resp.declarations {
            scope.declare(decl.name, decl.ty.clone());
        }
        let (cond_resp, cond_ty) = self.check_node(condition, &scope)?;
        if let Some(&(_, span)) = cond_resp.return_types.first() {
            return Err(Diagnostic::error(ErrorCode::E2016)
                .with_message("`return` is not allowed in a `where` condition")
                .with_label(span, "returns from inside a pattern"));
        }
        self.expect_assignable(&cond_ty, &Type::boolean(), self.node_span(condition))?;
        resp.merge_scoped(cond_resp);
        Ok((resp, ty))
    }
}
