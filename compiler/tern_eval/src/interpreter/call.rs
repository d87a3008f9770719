//! Closure creation and function calls.

use std::rc::Rc;

use smallvec::SmallVec;
use tern_diagnostic::internal_error;
use tern_ir::{CallExpr, NodeId, NodeKind};
use tern_types::NodeDetail;

use super::{Flow, Interpreter, MAX_CALL_DEPTH};
use crate::{
    stack_overflow, Closure, Environment, EvalError, EvalResult, FunctionValue, Value, ValueData,
};

impl Interpreter<'_> {
    /// Evaluate a function definition: snapshot exactly the bindings the
    /// checker listed as captures.
    pub(super) fn make_closure(&self, id: NodeId) -> Value {
        let info = self.program.table.get(id);
        let NodeDetail::Function { captures } = &info.detail else {
            internal_error("function definition has no capture list")
        };
        let captures = captures.iter().map(|&name| (name, self.lookup(name))).collect();
        Value::closure(
            Closure {
                program: Rc::clone(&self.program),
                node: id,
                captures,
            },
            info.ty.clone(),
        )
    }

    pub(super) fn eval_call(&mut self, call: &CallExpr) -> Result<Flow, EvalError> {
        let callee = eval_value!(self, call.callee);
        let mut args: SmallVec<[Value; 4]> = SmallVec::with_capacity(call.args.len());
        for &arg in &call.args {
            args.push(eval_value!(self, arg));
        }
        let ValueData::Function(function) = &callee.data else {
            internal_error("called a value that is not a function")
        };
        self.call_function(function, &args).map(Flow::Completed)
    }

    /// Invoke a function value with evaluated arguments.
    pub fn call_function(&mut self, function: &FunctionValue, args: &[Value]) -> EvalResult {
        match function {
            FunctionValue::Native { func, .. } => (**func)(args),
            FunctionValue::Closure(closure) => self.call_closure(closure, args),
        }
    }

    fn call_closure(&mut self, closure: &Closure, args: &[Value]) -> EvalResult {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(stack_overflow(MAX_CALL_DEPTH));
        }
        let NodeKind::Function(def) = &closure.program.ast.node(closure.node).kind else {
            internal_error("closure does not point at a function definition")
        };
        if def.params.len() != args.len() {
            internal_error(format_args!(
                "function expects {} argument(s), called with {}",
                def.params.len(),
                args.len()
            ));
        }

        let mut env = Environment::new(Rc::clone(self.env.globals()));
        env.define_all(closure.captures.iter().cloned());
        let mut frame = self.enter_call(Rc::clone(&closure.program), env);
        for (&param, arg) in def.params.iter().zip(args) {
            let Some(bindings) = frame.bind_pattern(param, arg, false)? else {
                internal_error("parameter pattern refuted its argument")
            };
            frame.env.define_all(bindings);
        }
        tracing::trace!(depth = frame.call_depth, args = args.len(), "call");
        match frame.eval(def.body)? {
            Flow::Completed(value) | Flow::Returned(value) => Ok(value),
        }
    }
}
