//! Tern evaluator.
//!
//! Executes a module that has already been type-checked. The evaluator reads
//! the AST together with the checker's [`TypeTable`](tern_types::TypeTable):
//! function definitions find their capture lists there, `as` assertions their
//! target types, and annotated patterns their resolved annotations.
//!
//! - [`Value`]: runtime value paired with its static type
//! - [`Environment`]: identifier bindings, innermost first, over shared globals
//! - [`Interpreter`]: the evaluation walk; `return` travels as a [`Flow`]
//!   value up to the nearest call boundary
//! - [`EvalError`]: runtime failures, some carrying a [`FailureCode`]

mod environment;
mod errors;
mod interpreter;
mod operators;
mod value;

pub use environment::{Environment, Globals};
pub use errors::{
    division_by_zero, integer_overflow, no_matching_arm, pattern_constraint_failed,
    stack_overflow, type_assertion_failed, EvalError, EvalErrorKind, EvalResult, FailureCode,
};
pub use interpreter::{Flow, Interpreter, ModuleLoader, ScopedInterpreter, MAX_CALL_DEPTH};
pub use value::{Closure, FunctionValue, NativeFn, Program, Value, ValueData, ValueDisplay};
