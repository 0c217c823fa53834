//! Error types for check hook evaluation

use crate::compare::Kind;
use crate::expression::Operator;
use crate::path::PathError;
use thiserror::Error;

/// Main error type for check hook evaluation
#[derive(Error, Debug)]
pub enum CheckHookError {
    #[error("unable to parse boolean expression: {expression}")]
    ExpressionSyntax { expression: String },

    #[error("failed to get value for {path}: {source}")]
    PathEvaluation {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("operands of different kinds can't be compared: {left}, {right}")]
    TypeMismatch { left: Kind, right: Kind },

    #[error("unsupported kind for comparison: {left}, {right}")]
    UnsupportedKind { left: Kind, right: Kind },

    #[error("operands not supported for operator {operator}: {kind}")]
    UnsupportedOperator { operator: Operator, kind: Kind },

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("invalid evaluator config: {0}")]
    InvalidConfig(String),

    #[error("failed to evaluate `{expression}`: {source}")]
    Evaluation {
        expression: String,
        #[source]
        source: Box<CheckHookError>,
    },
}

impl CheckHookError {
    /// Attach the expression text that was being evaluated
    pub fn in_expression(self, expression: &str) -> Self {
        CheckHookError::Evaluation {
            expression: expression.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all `Evaluation` context stripped
    pub fn root(&self) -> &CheckHookError {
        match self {
            CheckHookError::Evaluation { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(feature = "python")]
impl From<CheckHookError> for pyo3::PyErr {
    fn from(err: CheckHookError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyTypeError, PyValueError};

        match err.root() {
            CheckHookError::TypeMismatch { .. }
            | CheckHookError::UnsupportedKind { .. }
            | CheckHookError::UnsupportedOperator { .. } => PyTypeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for check hook evaluation
pub type Result<T> = std::result::Result<T, CheckHookError>;
