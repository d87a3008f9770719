#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::EvalErrorKind;

#[test]
fn test_int_arithmetic() {
    let (a, b) = (Value::int(7), Value::int(2));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Add).ok(), Some(Value::int(9)));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Sub).ok(), Some(Value::int(5)));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Mul).ok(), Some(Value::int(14)));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Div).ok(), Some(Value::int(3)));
}

#[test]
fn test_int_comparison() {
    let (a, b) = (Value::int(1), Value::int(2));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::Lt).ok(), Some(Value::boolean(true)));
    assert_eq!(evaluate_binary(&a, &b, BinaryOp::GtEq).ok(), Some(Value::boolean(false)));
    assert_eq!(evaluate_binary(&a, &a, BinaryOp::LtEq).ok(), Some(Value::boolean(true)));
    assert_eq!(evaluate_binary(&b, &a, BinaryOp::Gt).ok(), Some(Value::boolean(true)));
}

#[test]
fn test_division_by_zero() {
    let err = evaluate_binary(&Value::int(1), &Value::int(0), BinaryOp::Div).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
}

#[test]
fn test_overflow_is_an_error() {
    let err = evaluate_binary(&Value::int(i64::MAX), &Value::int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "addition" });

    let err = evaluate_binary(&Value::int(i64::MIN), &Value::int(-1), BinaryOp::Div).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "division" });

    let err = evaluate_unary(&Value::int(i64::MIN), UnaryOp::Neg).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { operation: "negation" });
}

#[test]
fn test_concat() {
    let joined = evaluate_binary(&Value::string("ab"), &Value::string("cd"), BinaryOp::Concat);
    assert_eq!(joined.ok(), Some(Value::string("abcd")));
}

#[test]
fn test_equality_is_structural() {
    assert_eq!(
        evaluate_binary(&Value::string("a"), &Value::string("a"), BinaryOp::Eq).ok(),
        Some(Value::boolean(true))
    );
    assert_eq!(
        evaluate_binary(&Value::unit(), &Value::unit(), BinaryOp::NotEq).ok(),
        Some(Value::boolean(false))
    );
    assert_eq!(
        evaluate_binary(&Value::int(1), &Value::string("1"), BinaryOp::Eq).ok(),
        Some(Value::boolean(false))
    );
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(&Value::int(3), UnaryOp::Neg).ok(), Some(Value::int(-3)));
    assert_eq!(
        evaluate_unary(&Value::boolean(true), UnaryOp::Not).ok(),
        Some(Value::boolean(false))
    );
}

#[test]
#[should_panic(expected = "internal compiler error")]
fn test_unchecked_operands_are_internal_errors() {
    let _ = evaluate_binary(&Value::int(1), &Value::boolean(true), BinaryOp::Add);
}
