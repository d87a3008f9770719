//! RAII guards for interpreter state.
//!
//! [`ScopedInterpreter`] pops an environment scope on drop; [`CallFrame`]
//! restores the caller's environment and program when a call finishes.
//! Both hold `&mut Interpreter` and deref to it, so evaluation continues
//! through the guard; early returns via `?` still clean up.

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use super::Interpreter;
use crate::{Environment, Program};

/// Guard that pops the environment scope it opened.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Guard for one function activation.
pub(crate) struct CallFrame<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    caller: Option<(Environment, Rc<Program>)>,
}

impl Drop for CallFrame<'_, '_> {
    fn drop(&mut self) {
        if let Some((env, program)) = self.caller.take() {
            self.interpreter.env = env;
            self.interpreter.program = program;
            self.interpreter.call_depth -= 1;
        }
    }
}

impl<'interp> Deref for CallFrame<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallFrame<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Open a scope that closes when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Switch to `program` and `env` for a call; the caller's state comes
    /// back when the frame drops.
    pub(crate) fn enter_call(
        &mut self,
        program: Rc<Program>,
        env: Environment,
    ) -> CallFrame<'_, 'a> {
        let caller_env = std::mem::replace(&mut self.env, env);
        let caller_program = std::mem::replace(&mut self.program, program);
        self.call_depth += 1;
        CallFrame {
            interpreter: self,
            caller: Some((caller_env, caller_program)),
        }
    }
}
