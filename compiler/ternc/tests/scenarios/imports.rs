//! Module definitions, the module cache, and circular imports.

use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_ir::{Ast, Purity};
use ternc::exec;

use crate::common::{adder, semantic, strings, Session};

/// `export let x = 1` preceded by `print("loading")`.
fn noisy_module(session: &Session) -> Ast {
    session.build(|b| {
        let s = b.str("loading");
        let first = b.print(s);
        let one = b.int(1);
        let x = b.bind("x");
        vec![first, b.export(x, one)]
    })
}

/// `import <name> from "<path>"`, binding the whole export record.
fn import_whole(session: &Session, path: &'static str) -> Ast {
    session.build(|b| {
        let m = b.bind("m");
        vec![b.import(m, path)]
    })
}

#[test]
fn imported_function_is_callable() {
    let session = Session::new();
    let math = session.build(|b| {
        let f = adder(b);
        let add = b.bind("add");
        vec![b.export(add, f)]
    });
    let options = session.exec_options().with_module("math", math);
    let ast = session.build(|b| {
        let add = b.bind("add");
        let pattern = b.record_pattern(&[("add", add)]).unwrap();
        let import = b.import(pattern, "math");
        let callee = b.ident("add");
        let two = b.int(2);
        let three = b.int(3);
        let call = b.call(callee, Purity::Pure, vec![two, three]);
        vec![import, b.print(call)]
    });
    exec(ast, &options).unwrap();
    assert_eq!(session.printed(), strings(&["5"]));
}

#[test]
fn module_runs_once() {
    let session = Session::new();
    let noisy = noisy_module(&session);
    let options = session.exec_options().with_module("noisy", noisy);
    let ast = session.build(|b| {
        let first = b.bind("first");
        let a = b.import(first, "noisy");
        let second = b.bind("second");
        let c = b.import(second, "noisy");
        let lhs = b.ident("first");
        let x = b.field(lhs, "x");
        let rhs = b.ident("second");
        let y = b.field(rhs, "x");
        let sum = b.add(x, y);
        vec![a, c, b.print(sum)]
    });
    exec(ast, &options).unwrap();
    assert_eq!(session.printed(), strings(&["loading", "2"]));
}

#[test]
fn imported_closure_keeps_module_private_bindings() {
    let session = Session::new();
    let counter = session.build(|b| {
        let seven = b.int(7);
        let secret = b.let_name("secret", seven);
        let body = b.ident("secret");
        let f = b.lambda(Vec::new(), body);
        let get = b.bind("get");
        vec![secret, b.export(get, f)]
    });
    let options = session.exec_options().with_module("counter", counter);
    let ast = session.build(|b| {
        let get = b.bind("get");
        let pattern = b.record_pattern(&[("get", get)]).unwrap();
        let import = b.import(pattern, "counter");
        let callee = b.ident("get");
        let call = b.call(callee, Purity::Pure, Vec::new());
        vec![import, b.print(call)]
    });
    exec(ast, &options).unwrap();
    assert_eq!(session.printed(), strings(&["7"]));
}

#[test]
fn private_bindings_are_not_exported() {
    let session = Session::new();
    let module = session.build(|b| {
        let seven = b.int(7);
        let secret = b.let_name("secret", seven);
        let one = b.int(1);
        let public = b.bind("public");
        vec![secret, b.export(public, one)]
    });
    let options = session.check_options().with_module("m", module);
    let ast = session.build(|b| {
        let secret = b.bind("secret");
        let pattern = b.record_pattern(&[("secret", secret)]).unwrap();
        vec![b.import(pattern, "m")]
    });
    let err = ternc::type_check(&ast, &options).unwrap_err();
    assert_eq!(semantic(err).code, ErrorCode::E2012);
}

#[test]
fn circular_import_is_reported() {
    let session = Session::new();
    let a = import_whole(&session, "b");
    let b_module = import_whole(&session, "a");
    let options = session
        .exec_options()
        .with_module("a", a)
        .with_module("b", b_module);
    let ast = import_whole(&session, "a");
    let diag = semantic(exec(ast, &options).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2020);
    assert_eq!(diag.message, "circular import: a -> b -> a");
    assert!(session.printed().is_empty());
}

#[test]
fn missing_module_is_reported() {
    let session = Session::new();
    let ast = import_whole(&session, "nowhere");
    let diag = semantic(exec(ast, &session.exec_options()).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2019);
    assert_eq!(diag.message, "module `nowhere` not found");
}

#[test]
fn errors_inside_a_module_name_it() {
    let session = Session::new();
    let broken = session.build(|b| vec![b.ident("missing")]);
    let options = session.check_options().with_module("broken", broken);
    let ast = import_whole(&session, "broken");
    let diag = semantic(ternc::type_check(&ast, &options).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2003);
    assert!(diag
        .notes
        .iter()
        .any(|note| note == "while checking module `broken`"));
}
