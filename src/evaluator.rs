//! Check hook evaluation
//!
//! Parse once, resolve both operands, compare once. Nothing is kept between
//! calls, so one [`Evaluator`] can be shared freely across threads.

use crate::compare::{compare, OperandValue};
use crate::config::EvaluatorConfig;
use crate::error::{CheckHookError, Result};
use crate::expression::parse_with;
use crate::path::{JsonPathEvaluator, PathEvaluator};
use serde_json::Value;
use tracing::debug;

/// Evaluates check hook expressions against JSON documents
#[derive(Debug, Clone)]
pub struct Evaluator<P = JsonPathEvaluator> {
    paths: P,
}

impl Evaluator<JsonPathEvaluator> {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            paths: JsonPathEvaluator::new(config),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl<P: PathEvaluator> Evaluator<P> {
    /// Use a custom path engine
    pub fn with_path_evaluator(paths: P) -> Self {
        Self { paths }
    }

    pub fn path_evaluator(&self) -> &P {
        &self.paths
    }

    /// Evaluate `expression` against `document`
    ///
    /// Parse failures carry the expression text already; path and comparison
    /// failures are wrapped with it.
    pub fn evaluate(&self, document: &Value, expression: &str) -> Result<bool> {
        let parsed = parse_with(expression, &self.paths)?;

        let left = self
            .resolve(document, &parsed.left)
            .map_err(|e| e.in_expression(expression))?;
        let right = self
            .resolve(document, &parsed.right)
            .map_err(|e| e.in_expression(expression))?;

        let result =
            compare(left, right, parsed.operator).map_err(|e| e.in_expression(expression))?;
        debug!(expression, result, "evaluated check hook");

        Ok(result)
    }

    fn resolve(&self, document: &Value, path: &str) -> Result<OperandValue> {
        self.paths
            .resolve(document, path)
            .map_err(|source| CheckHookError::PathEvaluation {
                path: path.to_string(),
                source,
            })
    }
}

/// Evaluate `expression` against `document` with default options
///
/// ```
/// use serde_json::json;
///
/// let doc = json!({"status": {"phase": "Running"}, "spec": {"expectedPhase": "Running"}});
/// let ready = check_hook_core::evaluate_check_hook(&doc, "$.status.phase == $.spec.expectedPhase").unwrap();
/// assert!(ready);
/// ```
pub fn evaluate_check_hook(document: &Value, expression: &str) -> Result<bool> {
    Evaluator::default().evaluate(document, expression)
}
