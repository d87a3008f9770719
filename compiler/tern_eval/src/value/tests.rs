use pretty_assertions::assert_eq;
use tern_ir::{Purity, StringInterner};
use tern_types::FunctionType;

use super::*;

#[test]
fn scalars_render_plainly() {
    let interner = StringInterner::new();
    assert_eq!(Value::int(5).display(&interner).to_string(), "5");
    assert_eq!(Value::int(-3).display(&interner).to_string(), "-3");
    assert_eq!(Value::string("hi").display(&interner).to_string(), "hi");
    assert_eq!(Value::boolean(true).display(&interner).to_string(), "true");
    assert_eq!(Value::unit().display(&interner).to_string(), "()");
}

#[test]
fn records_quote_nested_strings() {
    let interner = StringInterner::new();
    let value = Value::record(vec![
        (interner.intern("x"), Value::int(1)),
        (interner.intern("name"), Value::string("tern")),
        (
            interner.intern("inner"),
            Value::record(vec![(interner.intern("ok"), Value::boolean(false))]),
        ),
    ]);
    assert_eq!(
        value.display(&interner).to_string(),
        r#"{ x: 1, name: "tern", inner: { ok: false } }"#
    );
    assert_eq!(Value::record(Vec::new()).display(&interner).to_string(), "{}");
}

#[test]
fn record_type_follows_fields() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let value = Value::record(vec![(x, Value::int(1))]);
    assert_eq!(value.ty, Type::record(vec![(x, Type::int())]));
    assert_eq!(value.field(x), Some(&Value::int(1)));
    assert_eq!(value.field(interner.intern("y")), None);
}

#[test]
fn record_equality_ignores_field_order() {
    let interner = StringInterner::new();
    let (x, y) = (interner.intern("x"), interner.intern("y"));
    let a = Value::record(vec![(x, Value::int(1)), (y, Value::int(2))]);
    let b = Value::record(vec![(y, Value::int(2)), (x, Value::int(1))]);
    let c = Value::record(vec![(x, Value::int(1))]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(Value::int(1), Value::string("1"));
}

#[test]
fn functions_compare_by_identity() {
    let interner = StringInterner::new();
    let ty = Type::function(FunctionType {
        generics: Vec::new(),
        params: vec![Type::int()],
        ret: Type::int(),
        purity: Purity::Pure,
    });
    let inc = Value::native(interner.intern("inc"), ty.clone(), |args| {
        Ok(Value::int(args[0].as_int().unwrap_or_default() + 1))
    });
    let other = Value::native(interner.intern("inc"), ty, |args| Ok(args[0].clone()));
    assert_eq!(inc, inc.clone());
    assert_ne!(inc, other);
    assert_eq!(inc.display(&interner).to_string(), "<pure (Int) => Int>");
}
