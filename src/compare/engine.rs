//! Type-coercing comparison of two resolved operands

use crate::compare::operand::{Kind, Numeric, OperandValue};
use crate::error::{CheckHookError, Result};
use crate::expression::Operator;

/// Compare two operands with `op`
///
/// Coercions run before any check: an integer meeting a float is widened,
/// then opaque values become their JSON text. After that both sides must be
/// present, of the same kind, and that kind must support `op`.
pub fn compare(a: OperandValue, b: OperandValue, op: Operator) -> Result<bool> {
    let (a, b) = widen_integers(a, b);
    let a = a.into_textual();
    let b = b.into_textual();

    let (left, right) = (a.kind(), b.kind());
    if left == Kind::Missing || right == Kind::Missing {
        return Err(CheckHookError::UnsupportedKind { left, right });
    }
    if left != right {
        return Err(CheckHookError::TypeMismatch { left, right });
    }
    if op.is_ordering() && left == Kind::Boolean {
        return Err(CheckHookError::UnsupportedOperator {
            operator: op,
            kind: left,
        });
    }

    match (a, b) {
        (OperandValue::String(x), OperandValue::String(y)) => Ok(op.evaluate(x.as_str(), y.as_str())),
        (OperandValue::Number(x), OperandValue::Number(y)) => Ok(compare_numeric(x, y, op)),
        (OperandValue::Boolean(x), OperandValue::Boolean(y)) => Ok(op.evaluate(&x, &y)),
        _ => Err(CheckHookError::UnsupportedKind { left, right }),
    }
}

fn widen_integers(a: OperandValue, b: OperandValue) -> (OperandValue, OperandValue) {
    use OperandValue::Number;

    match (a, b) {
        (Number(Numeric::Integer(i)), Number(f @ Numeric::Float(_))) => {
            (Number(Numeric::Float(i as f64)), Number(f))
        }
        (Number(f @ Numeric::Float(_)), Number(Numeric::Integer(i))) => {
            (Number(f), Number(Numeric::Float(i as f64)))
        }
        other => other,
    }
}

fn compare_numeric(x: Numeric, y: Numeric, op: Operator) -> bool {
    op.evaluate(&x.as_f64(), &y.as_f64())
}
