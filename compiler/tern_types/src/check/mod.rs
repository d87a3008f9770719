//! The type-check pass.
//!
//! Walks a module once, threading [`TypeState`] down and returning
//! [`RespState`] up, and records every node's inferred context in a
//! [`TypeTable`]. Checking stops at the first semantic error.

mod call;
mod control;
mod expr;
mod function;
mod pattern;
mod type_expr;

use std::rc::Rc;

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{Ast, DebugHandler, Name, NodeId, NodeKind, Span, StringInterner};

use crate::{
    GenericIdGen, NodeDetail, NodeInfo, RespState, Type, TypeState, TypeTable,
};

/// Result of checking one node.
pub(crate) type CheckResult = Result<(RespState, Type), Diagnostic>;

/// Supplies the export record type of imported modules.
///
/// The driver implements this on its module cache: resolving a path may
/// check another module first.
pub trait ImportResolver {
    fn resolve(&mut self, path: Name, span: Span) -> Result<Type, Diagnostic>;
}

/// Output of a successful check.
#[derive(Debug)]
pub struct CheckedModule {
    pub table: TypeTable,
    /// Record of the module's exported bindings, in export order.
    pub exports: Type,
}

/// Type-check a module.
///
/// `std_lib_shape` names the globals available everywhere; they are never
/// captured by closures. `ids` must be shared by every module of one
/// compilation.
#[tracing::instrument(level = "debug", skip_all, fields(statements = ast.module().len()))]
pub fn check_module(
    ast: &Ast,
    interner: &StringInterner,
    ids: &GenericIdGen,
    std_lib_shape: &[(Name, Type)],
    debug: &DebugHandler,
    imports: &mut dyn ImportResolver,
) -> Result<CheckedModule, Diagnostic> {
    let mut checker = Checker {
        ast,
        interner,
        ids,
        debug,
        imports,
        table: TypeTable::new(),
        exports: Vec::new(),
    };
    let mut scope = TypeState::for_module(interner, std_lib_shape);
    for &stmt in ast.module() {
        checker.check_statement(stmt, &mut scope)?;
    }
    tracing::debug!(
        nodes = checker.table.len(),
        exports = checker.exports.len(),
        "module checked"
    );
    Ok(CheckedModule {
        table: checker.table,
        exports: Type::record(checker.exports),
    })
}

pub(crate) struct Checker<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    ids: &'a GenericIdGen,
    debug: &'a DebugHandler,
    imports: &'a mut dyn ImportResolver,
    table: TypeTable,
    exports: Vec<(Name, Type)>,
}

impl Checker<'_> {
    /// Check a node and record its type.
    fn check_node(&mut self, id: NodeId, state: &TypeState) -> CheckResult {
        tern_stack::ensure_sufficient_stack(|| {
            let (resp, ty, detail) = self.check_node_kind(id, state)?;
            self.table.record(
                id,
                NodeInfo {
                    ty: ty.clone(),
                    detail,
                },
            );
            Ok((resp, ty))
        })
    }

    fn check_node_kind(
        &mut self,
        id: NodeId,
        state: &TypeState,
    ) -> Result<(RespState, Type, NodeDetail), Diagnostic> {
        let node = self.ast.node(id);
        let span = node.span;
        let (resp, ty) = match &node.kind {
            NodeKind::Int(_) => (RespState::new(), Type::int()),
            NodeKind::Str(_) => (RespState::new(), Type::string()),
            NodeKind::Bool(_) => (RespState::new(), Type::boolean()),
            NodeKind::Unit => (RespState::new(), Type::unit()),
            NodeKind::Ident(name) => self.check_ident(*name, span, state)?,
            NodeKind::Binary { op, lhs, rhs } => self.check_binary(*op, *lhs, *rhs, state)?,
            NodeKind::Unary { op, operand } => self.check_unary(*op, *operand, state)?,
            NodeKind::Record(fields) => self.check_record(fields, state)?,
            NodeKind::Field { record, field } => {
                self.check_field(*record, *field, span, state)?
            }
            NodeKind::Function(def) => {
                let (resp, ty, captures) = self.check_function(def, state)?;
                return Ok((resp, ty, NodeDetail::Function { captures }));
            }
            NodeKind::Call(call) => self.check_call(call, span, state)?,
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.check_if(*cond, *then_branch, *else_branch, span, state)?,
            NodeKind::Match { scrutinee, arms } => {
                self.check_match(*scrutinee, arms, span, state)?
            }
            NodeKind::Block(stmts) => self.check_block(stmts, state)?,
            NodeKind::Let {
                pattern,
                value,
                export,
            } => self.check_let(*pattern, *value, *export, span, state)?,
            NodeKind::TypeAlias { ty, .. } => {
                // Outside statement position an alias has no continuation.
                self.resolve_type(*ty, state)?;
                (RespState::new(), Type::unit())
            }
            NodeKind::Return(value) => self.check_return(*value, span, state)?,
            NodeKind::Print(value) => self.check_print(*value, state)?,
            NodeKind::Assert { expr, ty } => self.check_assert(*expr, *ty, span, state)?,
            NodeKind::Import { pattern, path } => {
                self.check_import(*pattern, *path, span, state)?
            }
        };
        Ok((resp, ty, NodeDetail::None))
    }

    /// Check a statement and apply what it declares to `scope`.
    fn check_statement(&mut self, id: NodeId, scope: &mut TypeState) -> CheckResult {
        if let NodeKind::TypeAlias { name, ty } = self.ast.node(id).kind {
            let aliased = self.resolve_type(ty, scope)?.with_display_name(name);
            tracing::trace!(alias = self.interner.lookup(name), "type alias");
            scope.define_type(name, Rc::new(move || aliased.clone()));
            self.table.record(
                id,
                NodeInfo {
                    ty: Type::unit(),
                    detail: NodeDetail::None,
                },
            );
            return Ok((RespState::new(), Type::unit()));
        }
        let (resp, ty) = self.check_node(id, scope)?;
        for decl in &resp.declarations {
            scope.declare(decl.name, decl.ty.clone());
        }
        Ok((resp, ty))
    }

    // Diagnostics helpers

    fn show(&self, ty: &Type) -> String {
        ty.display(self.interner).to_string()
    }

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn mismatch(&self, expected: &Type, found: &Type, span: Span) -> Diagnostic {
        Diagnostic::error(ErrorCode::E2001)
            .with_message(format!(
                "type mismatch: expected `{}`, found `{}`",
                self.show(expected),
                self.show(found)
            ))
            .with_label(span, format!("this has type `{}`", self.show(found)))
    }

    /// Require `found` to be assignable to `expected`.
    fn expect_assignable(
        &self,
        found: &Type,
        expected: &Type,
        span: Span,
    ) -> Result<(), Diagnostic> {
        if crate::is_assignable(found, expected) {
            Ok(())
        } else {
            Err(self.mismatch(expected, found, span))
        }
    }

    /// `widest`, or an error naming both types.
    fn reconcile(&self, a: &Type, b: &Type, span: Span, what: &str) -> Result<Type, Diagnostic> {
        crate::widest(a, b).ok_or_else(|| {
            Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "{what} have incompatible types `{}` and `{}`",
                    self.show(a),
                    self.show(b)
                ))
                .with_label(span, "types cannot be reconciled")
        })
    }

    fn node_span(&self, id: NodeId) -> Span {
        self.ast.node(id).span
    }
}
