//! Parsed form of a check hook expression

use crate::error::CheckHookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (==)
    #[serde(rename = "==")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    Ne,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
}

impl Operator {
    /// Order in which the parser tries operators. Two-character symbols come
    /// before their one-character prefixes.
    pub const PRIORITY: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Ge,
        Operator::Gt,
        Operator::Le,
        Operator::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Lt => "<",
        }
    }

    /// True for `>`, `>=`, `<`, `<=`
    pub fn is_ordering(self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }

    /// Apply the operator using `PartialOrd`, so floats keep IEEE semantics
    pub fn evaluate<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Operator::Eq => left == right,
            Operator::Ne => left != right,
            Operator::Ge => left >= right,
            Operator::Gt => left > right,
            Operator::Le => left <= right,
            Operator::Lt => left < right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CheckHookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::PRIORITY
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CheckHookError::UnknownOperator(s.to_string()))
    }
}

/// `<left> <operator> <right>`, both sides path expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanExpression {
    pub operator: Operator,
    pub left: String,
    pub right: String,
}

impl fmt::Display for BooleanExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}
