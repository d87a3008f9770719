//! Binary and unary operator implementations.
//!
//! Operand types are guaranteed by the checker; a mismatch here is an
//! internal error, not a runtime error.

use tern_diagnostic::internal_error;
use tern_ir::{BinaryOp, UnaryOp};

use crate::{division_by_zero, integer_overflow, EvalResult, Value, ValueData};

/// Checked arithmetic where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation on two evaluated operands.
///
/// `and`/`or` are accepted for completeness; the interpreter short-circuits
/// them before both sides are evaluated.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::boolean(left == right)),
        BinaryOp::NotEq => return Ok(Value::boolean(left != right)),
        _ => {}
    }
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => eval_int_binary(*a, *b, op),
        (ValueData::Bool(a), ValueData::Bool(b)) => eval_bool_binary(*a, *b, op),
        (ValueData::Str(a), ValueData::Str(b)) => eval_string_binary(a, b, op),
        _ => operand_mismatch(op),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Lt => Ok(Value::boolean(a < b)),
        BinaryOp::LtEq => Ok(Value::boolean(a <= b)),
        BinaryOp::Gt => Ok(Value::boolean(a > b)),
        BinaryOp::GtEq => Ok(Value::boolean(a >= b)),
        _ => operand_mismatch(op),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::boolean(a && b)),
        BinaryOp::Or => Ok(Value::boolean(a || b)),
        _ => operand_mismatch(op),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Concat => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(&joined))
        }
        _ => operand_mismatch(op),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, &operand.data) {
        (UnaryOp::Neg, ValueData::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (UnaryOp::Not, ValueData::Bool(b)) => Ok(Value::boolean(!b)),
        _ => internal_error(format_args!(
            "operator `{}` reached evaluation with an unchecked operand",
            op.as_symbol()
        )),
    }
}

#[cold]
fn operand_mismatch(op: BinaryOp) -> ! {
    internal_error(format_args!(
        "operator `{op}` reached evaluation with unchecked operands"
    ))
}

#[cfg(test)]
mod tests;
