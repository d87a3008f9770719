//! Programs that type-check and run.

use pretty_assertions::assert_eq;
use tern_eval::{EvalErrorKind, FailureCode, Value};
use tern_ir::{BinaryOp, Purity};
use tern_types::{FunctionType, Type};
use ternc::exec;

use crate::common::{adder, int_type, pick, runtime, semantic, strings, Session};

#[test]
fn print_sum() {
    let session = Session::new();
    session
        .run(|b| {
            let two = b.int(2);
            let three = b.int(3);
            let sum = b.add(two, three);
            vec![b.print(sum)]
        })
        .unwrap();
    assert_eq!(session.printed(), strings(&["5"]));
    assert_eq!(session.printed_types(), strings(&["Int"]));
}

#[test]
fn declared_function_call() {
    let session = Session::new();
    session
        .run(|b| {
            let f = adder(b);
            let decl = b.let_name("fn", f);
            let callee = b.ident("fn");
            let two = b.int(2);
            let three = b.int(3);
            let call = b.call(callee, Purity::Pure, vec![two, three]);
            vec![decl, b.print(call)]
        })
        .unwrap();
    assert_eq!(session.printed(), strings(&["5"]));
}

#[test]
fn closure_sees_binding_before_it_not_after() {
    let session = Session::new();
    session
        .run(|b| {
            let one = b.int(1);
            let x = b.let_name("x", one);
            let body = b.ident("x");
            let f = b.lambda(Vec::new(), body);
            let f = b.let_name("f", f);
            let three = b.int(3);
            let y = b.let_name("y", three);
            let callee = b.ident("f");
            let call = b.call(callee, Purity::Pure, Vec::new());
            vec![x, f, y, b.print(call)]
        })
        .unwrap();
    assert_eq!(session.printed(), strings(&["1"]));
}

#[test]
fn closure_cannot_name_later_sibling() {
    let session = Session::new();
    let err = session
        .run(|b| {
            let body = b.ident("y");
            let f = b.lambda(Vec::new(), body);
            let f = b.let_name("f", f);
            let three = b.int(3);
            let y = b.let_name("y", three);
            vec![f, y]
        })
        .unwrap_err();
    assert_eq!(semantic(err).code, tern_diagnostic::ErrorCode::E2003);
}

/// `match { x: 2 } { ... }` with the empty record pattern first or last.
fn match_x(session: &Session, empty_first: bool) {
    session
        .run(|b| {
            let two = b.int(2);
            let scrutinee = b.record(&[("x", two)]).unwrap();
            let empty = b.record_pattern(&[]).unwrap();
            let three = b.int(3);
            let int_x = int_type(b);
            let bind = b.bind_typed("X", int_x);
            let with_x = b.record_pattern(&[("x", bind)]).unwrap();
            let x = b.ident("X");
            let arms = if empty_first {
                [(empty, three), (with_x, x)]
            } else {
                [(with_x, x), (empty, three)]
            };
            let m = b.match_expr(scrutinee, &arms);
            vec![b.print(m)]
        })
        .unwrap();
}

#[test]
fn match_uses_first_accepting_arm() {
    let session = Session::new();
    match_x(&session, true);
    assert_eq!(session.printed(), strings(&["3"]));

    let session = Session::new();
    match_x(&session, false);
    assert_eq!(session.printed(), strings(&["2"]));
}

#[test]
fn generic_inference_is_deterministic() {
    for _ in 0..3 {
        let session = Session::new();
        session
            .run(|b| {
                let f = pick(b);
                let decl = b.let_name("pick", f);
                let callee = b.ident("pick");
                let one = b.int(1);
                let two = b.int(2);
                let call = b.call(callee, Purity::Pure, vec![one, two]);
                vec![decl, b.print(call)]
            })
            .unwrap();
        assert_eq!(session.printed_types(), strings(&["Int"]));
        assert_eq!(session.printed(), strings(&["1"]));
    }
}

#[test]
fn explicit_type_arguments_bind_generics() {
    let session = Session::new();
    session
        .run(|b| {
            let f = pick(b);
            let decl = b.let_name("pick", f);
            let callee = b.ident("pick");
            let unknown = b.named_type("Unknown");
            let one = b.int(1);
            let s = b.str("s");
            let call = b.call_with_types(callee, Purity::Pure, vec![unknown], vec![one, s]);
            vec![decl, b.print(call)]
        })
        .unwrap();
    assert_eq!(session.printed_types(), strings(&["Unknown"]));
    assert_eq!(session.printed(), strings(&["1"]));
}

#[test]
fn where_constraint_failure_is_observable() {
    let session = Session::new();
    let err = session
        .run(|b| {
            let x = b.bind("x");
            let lhs = b.ident("x");
            let zero = b.int(0);
            let cond = b.binary(BinaryOp::Gt, lhs, zero);
            let positive = b.constrained(x, cond);
            let value = b.int(-5);
            vec![b.let_(positive, value)]
        })
        .unwrap_err();
    let err = runtime(err);
    assert_eq!(err.failure_code(), Some(FailureCode::PatternConstraintFailed));
    assert!(!err.is_fatal());
}

#[test]
fn failed_assertion_is_observable() {
    let session = Session::new();
    let err = session
        .run(|b| {
            let unknown = b.named_type("Unknown");
            let u = b.bind_typed("u", unknown);
            let value = b.int(1);
            let decl = b.let_(u, value);
            let expr = b.ident("u");
            let target = b.named_type("Boolean");
            let asserted = b.assert_as(expr, target);
            vec![decl, b.print(asserted)]
        })
        .unwrap_err();
    assert_eq!(
        runtime(err).failure_code(),
        Some(FailureCode::TypeAssertionFailed)
    );
    assert!(session.printed().is_empty());
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let session = Session::new();
    let err = session
        .run(|b| {
            let s = b.str("before");
            let first = b.print(s);
            let one = b.int(1);
            let zero = b.int(0);
            let div = b.binary(BinaryOp::Div, one, zero);
            vec![first, b.print(div)]
        })
        .unwrap_err();
    assert_eq!(runtime(err).kind, EvalErrorKind::DivisionByZero);
    assert_eq!(session.printed(), strings(&["before"]));
}

#[test]
fn semantic_errors_prevent_execution() {
    let session = Session::new();
    let err = session
        .run(|b| {
            let s = b.str("never printed");
            let first = b.print(s);
            let one = b.int(1);
            let s = b.str("a");
            let bad = b.add(one, s);
            vec![first, b.print(bad)]
        })
        .unwrap_err();
    assert_eq!(semantic(err).code, tern_diagnostic::ErrorCode::E2001);
    assert!(session.printed().is_empty());
}

#[test]
fn exports_form_the_result() {
    let session = Session::new();
    let exports = session
        .run(|b| {
            let answer = b.bind("answer");
            let value = b.int(42);
            let export = b.export(answer, value);
            let greeting = b.bind("greeting");
            let value = b.str("hi");
            let second = b.export(greeting, value);
            vec![export, second]
        })
        .unwrap();
    let answer = session.interner.intern("answer");
    let greeting = session.interner.intern("greeting");
    assert_eq!(exports.field(answer), Some(&Value::int(42)));
    assert_eq!(exports.field(greeting), Some(&Value::string("hi")));
    assert_eq!(
        exports.ty.display(&session.interner).to_string(),
        "{ answer Int, greeting String }"
    );
}

#[test]
fn std_lib_functions_are_globals() {
    let session = Session::new();
    let ty = Type::function(FunctionType {
        generics: Vec::new(),
        params: vec![Type::string()],
        ret: Type::int(),
        purity: Purity::Gets,
    });
    let length = Value::native(session.interner.intern("length"), ty, |args| {
        let s = args[0].as_str().unwrap_or_default();
        Ok(Value::int(i64::try_from(s.len()).unwrap_or(i64::MAX)))
    });
    let options = session.exec_options().with_global("length", length);
    let ast = session.build(|b| {
        let callee = b.ident("length");
        let s = b.str("tern");
        let call = b.call(callee, Purity::Gets, vec![s]);
        vec![b.print(call)]
    });
    exec(ast, &options).unwrap();
    assert_eq!(session.printed(), strings(&["4"]));
}
