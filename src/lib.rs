//! Check Hook Core - comparison gates over JSON documents
//!
//! A check hook is a single comparison between two path-addressed values,
//! e.g. `$.status.phase == $.spec.expectedPhase`. This crate parses the
//! expression, resolves both paths against a JSON document and compares the
//! results with a small set of coercion rules. Python bindings are available
//! behind the `python` feature.

pub mod compare;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod path;

#[cfg(feature = "python")]
mod python;

pub use config::EvaluatorConfig;
pub use error::{CheckHookError, Result};
pub use evaluator::{evaluate_check_hook, Evaluator};
pub use expression::{BooleanExpression, Operator};
pub use path::{JsonPathEvaluator, PathEvaluator};
