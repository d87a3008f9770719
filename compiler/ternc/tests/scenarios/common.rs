//! Shared helpers for scenario tests.

use tern_diagnostic::Diagnostic;
use tern_eval::{EvalError, Value};
use tern_ir::{
    buffer_handler, Ast, AstBuilder, NodeId, Purity, SharedDebugHandler, SharedInterner,
    TypeExprId,
};
use tern_types::Type;
use ternc::{exec, type_check, Error, ExecOptions, TypeCheckOptions};

/// One compilation: an interner shared by every AST plus a capturing
/// output handler.
pub struct Session {
    pub interner: SharedInterner,
    pub output: SharedDebugHandler,
}

impl Session {
    pub fn new() -> Self {
        Session {
            interner: SharedInterner::new(),
            output: buffer_handler(),
        }
    }

    pub fn build(&self, build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeId>) -> Ast {
        let mut builder = AstBuilder::new(&self.interner);
        let statements = build(&mut builder);
        builder.finish(statements)
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions::new(self.interner.clone()).with_behaviors(self.output.clone())
    }

    pub fn check_options(&self) -> TypeCheckOptions {
        TypeCheckOptions::new(self.interner.clone()).with_behaviors(self.output.clone())
    }

    pub fn run(
        &self,
        build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeId>,
    ) -> Result<Value, Error> {
        exec(self.build(build), &self.exec_options())
    }

    pub fn check(
        &self,
        build: impl FnOnce(&mut AstBuilder<'_>) -> Vec<NodeId>,
    ) -> Result<Type, Error> {
        type_check(&self.build(build), &self.check_options())
    }

    /// Values printed while running.
    pub fn printed(&self) -> Vec<String> {
        self.output.captured_values()
    }

    /// Static types reported by `print` nodes while checking.
    pub fn printed_types(&self) -> Vec<String> {
        self.output.captured_types()
    }
}

pub fn int_type(b: &mut AstBuilder<'_>) -> TypeExprId {
    b.named_type("Int")
}

/// `pure (x Int, y Int) => x + y`
pub fn adder(b: &mut AstBuilder<'_>) -> NodeId {
    let int_x = int_type(b);
    let x = b.bind_typed("x", int_x);
    let int_y = int_type(b);
    let y = b.bind_typed("y", int_y);
    let lhs = b.ident("x");
    let rhs = b.ident("y");
    let body = b.add(lhs, rhs);
    b.lambda(vec![x, y], body)
}

/// `pure <T>(a T, b T) => a`
pub fn pick(b: &mut AstBuilder<'_>) -> NodeId {
    let t = b.generic("T", None);
    let ta = b.named_type("T");
    let a = b.bind_typed("a", ta);
    let tb = b.named_type("T");
    let second = b.bind_typed("b", tb);
    let body = b.ident("a");
    b.function(Purity::Pure, vec![t], vec![a, second], None, body)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub fn semantic(err: Error) -> Diagnostic {
    match err {
        Error::Semantic(diag) => diag,
        Error::Runtime(err) => panic!("expected a semantic error, got {err}"),
    }
}

pub fn runtime(err: Error) -> EvalError {
    match err {
        Error::Runtime(err) => err,
        Error::Semantic(diag) => panic!("expected a runtime error, got {diag}"),
    }
}
