//! Boolean expression parser
//!
//! Splits `<path> <op> <path>` into its operator and operands. Operators are
//! tried in [`Operator::PRIORITY`] order and the first one that splits the
//! text into exactly two valid paths wins.
//!
//! Splitting is purely textual. A path that itself contains an operator
//! symbol (for example a quoted key like `['a>b']`) can be split at the
//! wrong place or not at all.

use crate::error::{CheckHookError, Result};
use crate::expression::ast::{BooleanExpression, Operator};
use crate::path::{JsonPathEvaluator, PathEvaluator};
use tracing::debug;

/// Parse an expression, validating operands with the bundled JSONPath engine
pub fn parse(expression: &str) -> Result<BooleanExpression> {
    parse_with(expression, &JsonPathEvaluator::default())
}

/// Parse an expression, validating operands with `paths`
pub fn parse_with<P: PathEvaluator + ?Sized>(expression: &str, paths: &P) -> Result<BooleanExpression> {
    for operator in Operator::PRIORITY {
        if let Some((left, right)) = split_once_exactly(expression, operator.symbol()) {
            if is_operand(left, paths) && is_operand(right, paths) {
                debug!(%operator, left, right, "parsed boolean expression");
                return Ok(BooleanExpression {
                    operator,
                    left: left.to_string(),
                    right: right.to_string(),
                });
            }
            debug!(%operator, expression, "operator splits expression but operands are not valid paths");
        }
    }

    Err(CheckHookError::ExpressionSyntax {
        expression: expression.to_string(),
    })
}

/// Split at `symbol` only when it occurs exactly once; both halves trimmed
fn split_once_exactly<'a>(expression: &'a str, symbol: &str) -> Option<(&'a str, &'a str)> {
    let mut pieces = expression.split(symbol);
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(left), Some(right), None) => Some((left.trim(), right.trim())),
        _ => None,
    }
}

fn is_operand<P: PathEvaluator + ?Sized>(text: &str, paths: &P) -> bool {
    !text.is_empty() && paths.is_valid_path(text)
}
