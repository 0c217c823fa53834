//! Path resolution for check hook operands
//!
//! The expression core only talks to paths through [`PathEvaluator`]. The
//! bundled [`JsonPathEvaluator`] understands JSONPath accessors such as
//! `$.status.phase`, `$.items[0].name`, `{.metadata['app.kubernetes.io/name']}`.

mod parser;
mod selector;

pub use parser::{parse, JsonPath, Segment};

use crate::compare::OperandValue;
use crate::config::EvaluatorConfig;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

/// Faults raised by the path engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("invalid path `{path}` at offset {offset}: {message}")]
    Syntax {
        path: String,
        offset: usize,
        message: String,
    },

    #[error("slice step cannot be zero")]
    ZeroStep,

    #[error("cannot index into {0}")]
    NotIndexable(&'static str),

    #[error("key `{0}` is not found")]
    NotFound(String),

    #[error("array index {index} out of bounds for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
}

/// Resolves path expressions against JSON documents
///
/// Implementations must be reentrant: the evaluator shares one instance
/// across calls and threads.
pub trait PathEvaluator: Send + Sync {
    /// True if `expr` parses and evaluates against an empty document without
    /// error. Missing keys are tolerated here.
    fn is_valid_path(&self, expr: &str) -> bool;

    /// Resolve `expr` to its first match, or `Missing` when nothing matched
    fn resolve(&self, document: &Value, expr: &str) -> Result<OperandValue, PathError>;
}

/// JSONPath-backed [`PathEvaluator`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator {
    config: EvaluatorConfig,
}

impl JsonPathEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Syntax-only phase of the validity check
    pub fn check_syntax(&self, expr: &str) -> Result<JsonPath, PathError> {
        parse(expr)
    }

    /// Tolerant evaluation of a parsed path against the empty document `{}`
    pub fn trial_evaluate(&self, path: &JsonPath) -> Result<(), PathError> {
        let empty = Value::Object(Map::new());
        selector::select(&empty, path.segments(), true).map(|_| ())
    }
}

impl PathEvaluator for JsonPathEvaluator {
    fn is_valid_path(&self, expr: &str) -> bool {
        match self.check_syntax(expr) {
            Ok(path) => self.trial_evaluate(&path).is_ok(),
            Err(_) => false,
        }
    }

    fn resolve(&self, document: &Value, expr: &str) -> Result<OperandValue, PathError> {
        let path = parse(expr)?;
        let matches = selector::select(document, path.segments(), self.config.allow_missing_keys)?;
        trace!(path = expr, matches = matches.len(), "resolved path");

        Ok(OperandValue::from(matches.first().copied()))
    }
}
