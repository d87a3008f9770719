#![allow(clippy::unwrap_used)]

use super::*;
use crate::{AstBuilder, StringInterner};

#[test]
fn test_alloc_returns_sequential_ids() {
    let mut ast = Ast::new();
    let a = ast.alloc_node(NodeKind::Int(1), Span::new(0, 1)).unwrap();
    let b = ast.alloc_node(NodeKind::Int(2), Span::new(2, 3)).unwrap();
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(ast.node(b).kind, NodeKind::Int(2));
    assert_eq!(ast.node_count(), 2);
}

#[test]
fn test_duplicate_record_key_rejected() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let one = b.int(1);
    let two = b.int(2);
    let result = b.record(&[("x", one), ("x", two)]);
    let Err(ConstructionError::DuplicateRecordKey { name, first, second }) = result else {
        panic!("expected duplicate key error, got {result:?}");
    };
    assert_eq!(interner.lookup(name), "x");
    assert!(first.start < second.start);
}

#[test]
fn test_alloc_node_rejects_duplicate_record_key() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut ast = Ast::new();
    let one = ast.alloc_node(NodeKind::Int(1), Span::new(0, 1)).unwrap();
    let two = ast.alloc_node(NodeKind::Int(2), Span::new(2, 3)).unwrap();
    let fields = vec![
        FieldInit {
            name: x,
            value: one,
            span: Span::new(4, 5),
        },
        FieldInit {
            name: x,
            value: two,
            span: Span::new(6, 7),
        },
    ];
    let result = ast.alloc_node(NodeKind::Record(fields), Span::new(4, 8));
    assert_eq!(
        result,
        Err(ConstructionError::DuplicateRecordKey {
            name: x,
            first: Span::new(4, 5),
            second: Span::new(6, 7),
        })
    );
    assert_eq!(ast.node_count(), 2);
}

#[test]
fn test_alloc_pattern_rejects_duplicate_field() {
    let interner = StringInterner::new();
    let (x, a, c) = (interner.intern("x"), interner.intern("a"), interner.intern("c"));
    let mut ast = Ast::new();
    let bind = |name| PatternKind::Bind {
        name,
        annotation: None,
    };
    let first = ast.alloc_pattern(bind(a), Span::new(0, 1)).unwrap();
    let second = ast.alloc_pattern(bind(c), Span::new(2, 3)).unwrap();
    let fields = vec![
        FieldPattern {
            name: x,
            pattern: first,
        },
        FieldPattern {
            name: x,
            pattern: second,
        },
    ];
    let result = ast.alloc_pattern(PatternKind::Record(fields), Span::new(0, 4));
    assert!(matches!(
        result,
        Err(ConstructionError::DuplicatePatternField { name, .. }) if name == x
    ));
    assert_eq!(ast.pattern_count(), 2);
}

#[test]
fn test_alloc_type_rejects_duplicate_field() {
    let interner = StringInterner::new();
    let (x, int, string) = (
        interner.intern("x"),
        interner.intern("Int"),
        interner.intern("String"),
    );
    let mut ast = Ast::new();
    let int = ast.alloc_type(TypeExprKind::Named(int), Span::new(0, 1)).unwrap();
    let string = ast.alloc_type(TypeExprKind::Named(string), Span::new(2, 3)).unwrap();
    let fields = vec![
        FieldType { name: x, ty: int },
        FieldType { name: x, ty: string },
    ];
    let result = ast.alloc_type(TypeExprKind::Record(fields), Span::new(0, 4));
    assert!(matches!(
        result,
        Err(ConstructionError::DuplicateTypeField { .. })
    ));
}

#[test]
fn test_duplicate_pattern_field_rejected() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let a = b.bind("a");
    let c = b.bind("c");
    let result = b.record_pattern(&[("x", a), ("x", c)]);
    assert!(matches!(
        result,
        Err(ConstructionError::DuplicatePatternField { .. })
    ));
}

#[test]
fn test_duplicate_type_field_rejected() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let int = b.named_type("Int");
    let string = b.named_type("String");
    let result = b.record_type(&[("x", int), ("x", string)]);
    assert!(matches!(
        result,
        Err(ConstructionError::DuplicateTypeField { .. })
    ));
}

#[test]
fn test_distinct_keys_accepted() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let one = b.int(1);
    let two = b.int(2);
    assert!(b.record(&[("x", one), ("y", two)]).is_ok());
}

#[test]
fn test_builder_spans_are_distinct() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let one = b.int(1);
    let two = b.int(2);
    assert_ne!(b.span_of(one), b.span_of(two));
}

#[test]
fn test_finish_sets_module_statements() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new(&interner);
    let value = b.int(5);
    let stmt = b.print(value);
    let ast = b.finish(vec![stmt]);
    assert_eq!(ast.module(), &[stmt]);
}
