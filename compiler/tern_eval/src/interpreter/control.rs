//! Branching, blocks, and binding statements.

use tern_diagnostic::internal_error;
use tern_ir::{MatchArm, Name, NodeId, PatternId};

use super::{Flow, Interpreter};
use crate::{no_matching_arm, EvalError, Value};

impl Interpreter<'_> {
    pub(super) fn eval_if(
        &mut self,
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    ) -> Result<Flow, EvalError> {
        let cond = eval_value!(self, cond);
        match cond.as_bool() {
            Some(true) => self.eval(then_branch),
            Some(false) => self.eval(else_branch),
            None => internal_error("`if` condition is not a boolean"),
        }
    }

    /// Arms are tried in source order; the first that accepts the scrutinee
    /// runs with its bindings in scope.
    pub(super) fn eval_match(
        &mut self,
        scrutinee: NodeId,
        arms: &[MatchArm],
    ) -> Result<Flow, EvalError> {
        let value = eval_value!(self, scrutinee);
        for arm in arms {
            let mut scoped = self.scoped();
            if let Some(bindings) = scoped.bind_pattern(arm.pattern, &value, true)? {
                scoped.env.define_all(bindings);
                return scoped.eval(arm.body);
            }
        }
        Err(no_matching_arm())
    }

    pub(super) fn eval_block(&mut self, statements: &[NodeId]) -> Result<Flow, EvalError> {
        let mut scoped = self.scoped();
        let mut last = Value::unit();
        for &stmt in statements {
            last = eval_value!(scoped, stmt);
        }
        Ok(Flow::Completed(last))
    }

    /// Bindings land in the current scope and stay visible to the rest of
    /// the enclosing block.
    pub(super) fn eval_let(
        &mut self,
        pattern: PatternId,
        value: NodeId,
        export: bool,
    ) -> Result<Flow, EvalError> {
        let value = eval_value!(self, value);
        let bindings = self.bind_irrefutable(pattern, &value)?;
        if export {
            self.exports.extend(bindings.iter().cloned());
        }
        self.env.define_all(bindings);
        Ok(Flow::Completed(Value::unit()))
    }

    pub(super) fn eval_import(
        &mut self,
        pattern: PatternId,
        path: Name,
    ) -> Result<Flow, EvalError> {
        tracing::debug!(path = self.interner.lookup(path), "import");
        let exports = self.loader.load(path)?;
        let bindings = self.bind_irrefutable(pattern, &exports)?;
        self.env.define_all(bindings);
        Ok(Flow::Completed(Value::unit()))
    }

    fn bind_irrefutable(
        &mut self,
        pattern: PatternId,
        value: &Value,
    ) -> Result<Vec<(Name, Value)>, EvalError> {
        match self.bind_pattern(pattern, value, false)? {
            Some(bindings) => Ok(bindings),
            None => internal_error("irrefutable pattern rejected its value"),
        }
    }
}
