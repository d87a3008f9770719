//! Tree-walking interpreter.
//!
//! Evaluates one checked [`Program`] at a time. Function calls swap in the
//! callee's program and a fresh [`Environment`] built from the closure's
//! captures, so a closure imported from another module runs against its own
//! AST and side table.

/// Evaluate a node to a value, propagating `return` to the caller.
macro_rules! eval_value {
    ($interp:expr, $node:expr) => {
        match $interp.eval($node)? {
            $crate::interpreter::Flow::Completed(value) => value,
            flow @ $crate::interpreter::Flow::Returned(_) => return Ok(flow),
        }
    };
}

mod call;
mod control;
mod pattern;
mod scope_guard;

use std::rc::Rc;

use tern_diagnostic::internal_error;
use tern_ir::{BinaryOp, DebugHandler, FieldInit, Name, NodeId, NodeKind, StringInterner};
use tern_stack::ensure_sufficient_stack;
use tern_types::is_assignable;

use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{
    type_assertion_failed, Environment, EvalError, EvalResult, Globals, Program, Value,
};

pub use scope_guard::ScopedInterpreter;

/// Maximum nesting of Tern function calls.
#[cfg(not(target_arch = "wasm32"))]
pub const MAX_CALL_DEPTH: usize = 10_000;
#[cfg(target_arch = "wasm32")]
pub const MAX_CALL_DEPTH: usize = 200;

/// Outcome of evaluating a node.
///
/// `return` is not an error: it travels up as `Returned` until the nearest
/// call boundary turns it back into a plain value.
#[derive(Clone, Debug)]
pub enum Flow {
    Completed(Value),
    Returned(Value),
}

/// Supplies the export records of imported modules at runtime.
///
/// Implemented by the driver's module cache; a module executes at most once
/// per run.
pub trait ModuleLoader {
    fn load(&mut self, path: Name) -> EvalResult;
}

/// Interpreter over one module run.
pub struct Interpreter<'a> {
    /// Program whose nodes are being evaluated.
    program: Rc<Program>,
    pub(crate) env: Environment,
    interner: &'a StringInterner,
    debug: &'a DebugHandler,
    loader: &'a mut dyn ModuleLoader,
    call_depth: usize,
    /// `let export` bindings, in order.
    exports: Vec<(Name, Value)>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        program: Rc<Program>,
        globals: Rc<Globals>,
        interner: &'a StringInterner,
        debug: &'a DebugHandler,
        loader: &'a mut dyn ModuleLoader,
    ) -> Self {
        Interpreter {
            program,
            env: Environment::new(globals),
            interner,
            debug,
            loader,
            call_depth: 0,
            exports: Vec::new(),
        }
    }

    /// Execute every module-level statement; returns the export record.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(statements = self.program.ast.module().len())
    )]
    pub fn run_module(mut self) -> EvalResult {
        let program = Rc::clone(&self.program);
        for &stmt in program.ast.module() {
            match self.eval(stmt)? {
                Flow::Completed(_) => {}
                Flow::Returned(_) => internal_error("`return` escaped to module level"),
            }
        }
        let exports = std::mem::take(&mut self.exports);
        tracing::debug!(exports = exports.len(), "module executed");
        Ok(Value::record_typed(exports, program.exports.clone()))
    }

    /// Evaluate a node of the current program.
    pub fn eval(&mut self, id: NodeId) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| self.eval_inner(id))
            .map_err(|err| err.or_span(self.program.ast.node(id).span))
    }

    fn eval_inner(&mut self, id: NodeId) -> Result<Flow, EvalError> {
        let program = Rc::clone(&self.program);
        let node = program.ast.node(id);
        let value = match &node.kind {
            NodeKind::Int(n) => Value::int(*n),
            NodeKind::Str(s) => Value::string(self.interner.lookup(*s)),
            NodeKind::Bool(b) => Value::boolean(*b),
            NodeKind::Unit | NodeKind::TypeAlias { .. } => Value::unit(),
            NodeKind::Ident(name) => self.lookup(*name),
            NodeKind::Binary { op, lhs, rhs } => return self.eval_binary(*op, *lhs, *rhs),
            NodeKind::Unary { op, operand } => {
                let operand = eval_value!(self, *operand);
                evaluate_unary(&operand, *op)?
            }
            NodeKind::Record(fields) => return self.eval_record(fields),
            NodeKind::Field { record, field } => {
                let record = eval_value!(self, *record);
                match record.field(*field) {
                    Some(value) => value.clone(),
                    None => internal_error(format_args!(
                        "record has no field `{}` at runtime",
                        self.interner.lookup(*field)
                    )),
                }
            }
            NodeKind::Function(_) => self.make_closure(id),
            NodeKind::Call(call) => return self.eval_call(call),
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => return self.eval_if(*cond, *then_branch, *else_branch),
            NodeKind::Match { scrutinee, arms } => return self.eval_match(*scrutinee, arms),
            NodeKind::Block(statements) => return self.eval_block(statements),
            NodeKind::Let {
                pattern,
                value,
                export,
            } => return self.eval_let(*pattern, *value, *export),
            NodeKind::Return(value) => {
                let value = eval_value!(self, *value);
                return Ok(Flow::Returned(value));
            }
            NodeKind::Print(value) => {
                let value = eval_value!(self, *value);
                let rendered = value.display(self.interner).to_string();
                self.debug.on_debug_value(&rendered);
                Value::unit()
            }
            NodeKind::Assert { expr, .. } => {
                let value = eval_value!(self, *expr);
                self.check_assertion(value, id)?
            }
            NodeKind::Import { pattern, path } => return self.eval_import(*pattern, *path),
        };
        Ok(Flow::Completed(value))
    }

    fn lookup(&self, name: Name) -> Value {
        match self.env.lookup(name) {
            Some(value) => value.clone(),
            None => internal_error(format_args!(
                "`{}` is unbound at runtime",
                self.interner.lookup(name)
            )),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> Result<Flow, EvalError> {
        let left = eval_value!(self, lhs);
        let value = match (op, left.as_bool()) {
            (BinaryOp::And, Some(false)) | (BinaryOp::Or, Some(true)) => left,
            (BinaryOp::And | BinaryOp::Or, _) => eval_value!(self, rhs),
            _ => {
                let right = eval_value!(self, rhs);
                evaluate_binary(&left, &right, op)?
            }
        };
        Ok(Flow::Completed(value))
    }

    fn eval_record(&mut self, fields: &[FieldInit]) -> Result<Flow, EvalError> {
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            values.push((field.name, eval_value!(self, field.value)));
        }
        Ok(Flow::Completed(Value::record(values)))
    }

    /// `expr as T`: the value passes through unchanged when its type fits.
    fn check_assertion(&self, value: Value, id: NodeId) -> EvalResult {
        let target = self.program.table.type_of(id);
        if is_assignable(&value.ty, target) {
            return Ok(value);
        }
        Err(type_assertion_failed(
            target.display(self.interner).to_string(),
            value.ty.display(self.interner).to_string(),
        ))
    }
}
