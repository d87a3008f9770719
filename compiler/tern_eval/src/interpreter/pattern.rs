//! Runtime pattern binding.
//!
//! With `allow_failure` (match arms) a pattern that does not fit yields
//! `None`. Without it the checker has already proven the shape, so only a
//! false `where` condition can fail, and it does so as a runtime error.

use std::rc::Rc;

use tern_diagnostic::internal_error;
use tern_ir::{Name, PatternId, PatternKind};
use tern_types::is_assignable;

use super::{Flow, Interpreter};
use crate::{pattern_constraint_failed, EvalError, Value};

type Bindings = Vec<(Name, Value)>;

impl Interpreter<'_> {
    /// Bind `value` against a pattern of the current program.
    pub(crate) fn bind_pattern(
        &mut self,
        id: PatternId,
        value: &Value,
        allow_failure: bool,
    ) -> Result<Option<Bindings>, EvalError> {
        let mut bindings = Vec::new();
        let matched = self.bind_into(id, value, allow_failure, &mut bindings)?;
        Ok(matched.then_some(bindings))
    }

    fn bind_into(
        &mut self,
        id: PatternId,
        value: &Value,
        allow_failure: bool,
        out: &mut Bindings,
    ) -> Result<bool, EvalError> {
        let program = Rc::clone(&self.program);
        let pattern = program.ast.pattern(id);
        match &pattern.kind {
            PatternKind::Bind { name, .. } => {
                if allow_failure {
                    if let Some(annotation) = program.table.annotation(id) {
                        if !is_assignable(&value.ty, annotation) {
                            return Ok(false);
                        }
                    }
                }
                out.push((*name, value.clone()));
                Ok(true)
            }
            PatternKind::Record(fields) => {
                if !value.is_record() {
                    return refuted(allow_failure, "record pattern met a non-record value");
                }
                for field in fields {
                    let Some(field_value) = value.field(field.name) else {
                        return refuted(allow_failure, "record pattern met a missing field");
                    };
                    if !self.bind_into(field.pattern, field_value, allow_failure, out)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            PatternKind::Constrained { pattern: inner, condition } => {
                let start = out.len();
                if !self.bind_into(*inner, value, allow_failure, out)? {
                    return Ok(false);
                }
                let holds = {
                    let mut scoped = self.scoped();
                    scoped.env.define_all(out[start..].iter().cloned());
                    match scoped.eval(*condition)? {
                        Flow::Completed(cond) => cond.as_bool(),
                        Flow::Returned(_) => internal_error("`return` inside a `where` condition"),
                    }
                };
                match holds {
                    Some(true) => Ok(true),
                    Some(false) if allow_failure => Ok(false),
                    Some(false) => Err(pattern_constraint_failed().with_span(pattern.span)),
                    None => internal_error("`where` condition is not a boolean"),
                }
            }
        }
    }
}

fn refuted(allow_failure: bool, reason: &str) -> Result<bool, EvalError> {
    if allow_failure {
        Ok(false)
    } else {
        internal_error(reason)
    }
}
