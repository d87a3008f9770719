use std::rc::Rc;

use pretty_assertions::assert_eq;
use tern_ir::{Purity, StringInterner};

use super::*;

#[test]
fn builtins_resolve() {
    let interner = StringInterner::new();
    let state = TypeState::for_module(&interner, &[]);
    assert_eq!(state.lookup_type(interner.intern("Int")), Some(Type::int()));
    assert_eq!(
        state.lookup_type(interner.intern("Boolean")),
        Some(Type::boolean())
    );
    assert!(state.lookup_type(interner.intern("Float")).is_none());
}

#[test]
fn std_lib_bindings_have_no_depth() {
    let interner = StringInterner::new();
    let len = interner.intern("len");
    let state = TypeState::for_module(&interner, &[(len, Type::int())]);
    let entry = state.lookup_var(len);
    assert!(matches!(entry, Some(VarEntry { depth: None, .. })));
}

#[test]
fn child_scope_does_not_leak_into_parent() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let parent = TypeState::for_module(&interner, &[]);
    let mut child = parent.child_scope();
    child.declare(x, Type::int());
    assert!(child.lookup_var(x).is_some());
    assert!(parent.lookup_var(x).is_none());
    assert!(!child.is_module_scope());
}

#[test]
fn declare_copies_on_write() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut module = TypeState::for_module(&interner, &[]);
    let snapshot = module.clone();
    module.declare(x, Type::string());
    assert!(module.is_declared_locally(x));
    assert!(!snapshot.is_declared_locally(x));
}

#[test]
fn function_body_increments_depth_and_sets_purity() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut module = TypeState::for_module(&interner, &[]);
    module.declare(x, Type::int());

    let body = module.function_body(Purity::Gets);
    assert_eq!(body.function_depth(), 1);
    assert_eq!(body.min_purity(), Purity::Gets);
    assert!(body.is_in_function_body());
    assert_eq!(body.lookup_var(x).map(|e| e.depth), Some(Some(0)));

    let nested = body.child_scope().function_body(Purity::Pure);
    assert_eq!(nested.function_depth(), 2);
}

#[test]
fn type_factories_run_per_lookup() {
    let interner = StringInterner::new();
    let alias = interner.intern("Count");
    let mut state = TypeState::for_module(&interner, &[]);
    let calls = Rc::new(std::cell::Cell::new(0));
    let counter = calls.clone();
    state.define_type(
        alias,
        Rc::new(move || {
            counter.set(counter.get() + 1);
            Type::int()
        }),
    );
    state.lookup_type(alias);
    state.lookup_type(alias);
    assert_eq!(calls.get(), 2);
}
