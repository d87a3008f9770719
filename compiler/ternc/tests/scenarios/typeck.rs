//! Programs the checker rejects, and what `type_check` reports for the rest.

use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_ir::{FieldInit, NodeKind, Purity, Span};
use ternc::Error;

use crate::common::{adder, pick, semantic, strings, Session};

#[test]
fn type_check_returns_the_export_type() {
    let session = Session::new();
    let exports = session
        .check(|b| {
            let f = adder(b);
            let add = b.bind("add");
            let export = b.export(add, f);
            let s = b.str("typed, not run");
            vec![export, b.print(s)]
        })
        .unwrap();
    assert_eq!(
        exports.display(&session.interner).to_string(),
        "{ add pure (Int, Int) => Int }"
    );
    assert_eq!(session.printed_types(), strings(&["String"]));
    assert!(session.printed().is_empty());
}

#[test]
fn pure_function_called_with_run() {
    let session = Session::new();
    let err = session
        .check(|b| {
            let f = adder(b);
            let decl = b.let_name("add", f);
            let callee = b.ident("add");
            let one = b.int(1);
            let two = b.int(2);
            vec![decl, b.call(callee, Purity::None, vec![one, two])]
        })
        .unwrap_err();
    let diag = semantic(err);
    assert_eq!(diag.code, ErrorCode::E2008);
    assert!(diag.message.contains("no permission keyword"), "{}", diag.message);
}

#[test]
fn gets_function_cannot_call_none_function() {
    let session = Session::new();
    let err = session
        .check(|b| {
            let unit = b.unit();
            let effect = b.function(Purity::None, Vec::new(), Vec::new(), None, unit);
            let decl = b.let_name("effect", effect);
            let callee = b.ident("effect");
            let call = b.call(callee, Purity::None, Vec::new());
            let reader = b.function(Purity::Gets, Vec::new(), Vec::new(), None, call);
            vec![decl, b.let_name("reader", reader)]
        })
        .unwrap_err();
    let diag = semantic(err);
    assert_eq!(diag.code, ErrorCode::E2007);
    assert_eq!(diag.message, "cannot call a `none` function from a `gets` context");
}

#[test]
fn missing_field_in_destructuring() {
    let session = Session::new();
    let err = session
        .check(|b| {
            let a = b.bind("a");
            let pattern = b.record_pattern(&[("x", a)]).unwrap();
            let empty = b.record(&[]).unwrap();
            vec![b.let_(pattern, empty)]
        })
        .unwrap_err();
    let diag = semantic(err);
    assert_eq!(diag.code, ErrorCode::E2012);
    assert!(diag.message.contains("`x`"), "{}", diag.message);
}

#[test]
fn conflicting_generic_inference() {
    let session = Session::new();
    let err = session
        .check(|b| {
            let f = pick(b);
            let decl = b.let_name("pick", f);
            let callee = b.ident("pick");
            let one = b.int(1);
            let s = b.str("a");
            vec![decl, b.call(callee, Purity::Pure, vec![one, s])]
        })
        .unwrap_err();
    let diag = semantic(err);
    assert_eq!(diag.code, ErrorCode::E2010);
    assert!(diag.message.contains("Int"), "{}", diag.message);
    assert!(diag.message.contains("String"), "{}", diag.message);
}

#[test]
fn import_inside_a_function_is_rejected() {
    let session = Session::new();
    let module = session.build(|b| {
        let one = b.int(1);
        let x = b.bind("x");
        vec![b.export(x, one)]
    });
    let options = session.check_options().with_module("m", module);
    let ast = session.build(|b| {
        let m = b.bind("m");
        let import = b.import(m, "m");
        let unit = b.unit();
        let body = b.block(vec![import, unit]);
        let f = b.lambda(Vec::new(), body);
        vec![b.let_name("f", f)]
    });
    let err = ternc::type_check(&ast, &options).unwrap_err();
    assert_eq!(semantic(err).code, ErrorCode::E2016);
}

#[test]
fn nothing_prints_when_checking_fails() {
    let session = Session::new();
    let err = session
        .check(|b| {
            let s = b.str("typed");
            let first = b.print(s);
            let missing = b.ident("missing");
            vec![first, missing]
        })
        .unwrap_err();
    assert_eq!(semantic(err).code, ErrorCode::E2003);
    assert!(session.printed().is_empty());
}

#[test]
fn duplicate_record_key_is_a_semantic_error() {
    let session = Session::new();
    let mut ast = session.build(|_| Vec::new());
    let x = session.interner.intern("x");
    let one = ast.alloc_node(NodeKind::Int(1), Span::new(0, 1)).unwrap();
    let s = ast.alloc_node(NodeKind::Str(x), Span::new(2, 3)).unwrap();
    let fields = vec![
        FieldInit {
            name: x,
            value: one,
            span: Span::new(4, 5),
        },
        FieldInit {
            name: x,
            value: s,
            span: Span::new(6, 7),
        },
    ];
    let err = ast
        .alloc_node(NodeKind::Record(fields), Span::new(4, 8))
        .unwrap_err();
    let diag = semantic(Error::construction(err, &session.interner));
    assert_eq!(diag.code, ErrorCode::E2006);
    assert_eq!(diag.message, "duplicate record key `x`");
    assert_eq!(diag.primary_span(), Some(Span::new(6, 7)));
}
