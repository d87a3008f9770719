//! Leaf expressions, operators, records, `print`, and `as`.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{BinaryOp, FieldInit, Name, NodeId, Span, TypeExprId, UnaryOp};

use super::{CheckResult, Checker};
use crate::{is_assignable, RespState, Type, TypeState};

impl Checker<'_> {
    pub(super) fn check_ident(&mut self, name: Name, span: Span, state: &TypeState) -> CheckResult {
        let Some(entry) = state.lookup_var(name) else {
            return Err(Diagnostic::error(ErrorCode::E2003)
                .with_message(format!("unknown identifier `{}`", self.name(name)))
                .with_label(span, "not found in this scope"));
        };
        let mut resp = RespState::new();
        if let Some(depth) = entry.depth {
            if depth < state.function_depth() {
                resp.capture(name, depth);
            }
        }
        Ok((resp, entry.ty))
    }

    pub(super) fn check_binary(
        &mut self,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
        state: &TypeState,
    ) -> CheckResult {
        let (mut resp, lhs_ty) = self.check_node(lhs, state)?;
        let (rhs_resp, rhs_ty) = self.check_node(rhs, state)?;
        resp.merge(rhs_resp);

        let operand = match op {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => Some(Type::int()),
            BinaryOp::Concat => Some(Type::string()),
            BinaryOp::And | BinaryOp::Or => Some(Type::boolean()),
            BinaryOp::Eq | BinaryOp::NotEq => None,
        };
        if let Some(expected) = &operand {
            self.expect_assignable(&lhs_ty, expected, self.node_span(lhs))?;
            self.expect_assignable(&rhs_ty, expected, self.node_span(rhs))?;
        } else if !is_assignable(&lhs_ty, &rhs_ty) && !is_assignable(&rhs_ty, &lhs_ty) {
            return Err(Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "cannot compare `{}` with `{}`",
                    self.show(&lhs_ty),
                    self.show(&rhs_ty)
                ))
                .with_label(self.node_span(rhs), format!("operand of `{op}`")));
        }

        let ty = match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => Type::int(),
            BinaryOp::Concat => Type::string(),
            _ => Type::boolean(),
        };
        Ok((resp, ty))
    }

    pub(super) fn check_unary(
        &mut self,
        op: UnaryOp,
        operand: NodeId,
        state: &TypeState,
    ) -> CheckResult {
        let (resp, ty) = self.check_node(operand, state)?;
        let expected = match op {
            UnaryOp::Neg => Type::int(),
            UnaryOp::Not => Type::boolean(),
        };
        self.expect_assignable(&ty, &expected, self.node_span(operand))?;
        Ok((resp, expected))
    }

    pub(super) fn check_record(&mut self, fields: &[FieldInit], state: &TypeState) -> CheckResult {
        let mut resp = RespState::new();
        let mut types = Vec::with_capacity(fields.len());
        for field in fields {
            let (field_resp, ty) = self.check_node(field.value, state)?;
            resp.merge_scoped(field_resp);
            types.push((field.name, ty));
        }
        Ok((resp, Type::record(types)))
    }

    pub(super) fn check_field(
        &mut self,
        record: NodeId,
        field: Name,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let (resp, ty) = self.check_node(record, state)?;
        let Some(fields) = ty.as_record() else {
            return Err(Diagnostic::error(ErrorCode::E2013)
                .with_message(format!(
                    "cannot access field `{}` on `{}`",
                    self.name(field),
                    self.show(&ty)
                ))
                .with_label(self.node_span(record), "expected a record"));
        };
        match fields.field(field) {
            Some(field_ty) => Ok((resp, field_ty.clone())),
            None => Err(Diagnostic::error(ErrorCode::E2012)
                .with_message(format!(
                    "no field `{}` on `{}`",
                    self.name(field),
                    self.show(&ty)
                ))
                .with_label(span, "unknown field")),
        }
    }

    pub(super) fn check_print(&mut self, value: NodeId, state: &TypeState) -> CheckResult {
        let (resp, ty) = self.check_node(value, state)?;
        self.debug.on_debug_type(&self.show(&ty));
        Ok((resp, Type::unit()))
    }

    pub(super) fn check_assert(
        &mut self,
        expr: NodeId,
        target: TypeExprId,
        span: Span,
        state: &TypeState,
    ) -> CheckResult {
        let (resp, ty) = self.check_node(expr, state)?;
        let target_ty = self.resolve_type(target, state)?;
        if target_ty.contains_params() {
            return Err(Diagnostic::error(ErrorCode::E2017)
                .with_message(format!(
                    "cannot assert `{}`: assertions involving generic parameters are not supported",
                    self.show(&target_ty)
                ))
                .with_label(span, "generic assertion"));
        }
        if !is_assignable(&ty, &target_ty) && !is_assignable(&target_ty, &ty) {
            return Err(Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "`{}` can never be `{}`",
                    self.show(&ty),
                    self.show(&target_ty)
                ))
                .with_label(span, "unrelated types"));
        }
        Ok((resp, target_ty))
    }
}
