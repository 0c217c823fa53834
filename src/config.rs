//! Evaluator configuration
//!
//! Options are plain serde structures so hosts can load them from JSON
//! alongside the rest of their settings.

use crate::error::{CheckHookError, Result};
use serde::Deserialize;

/// Options controlling how check hooks resolve their operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Resolve absent keys and out-of-range indices to `Missing` instead of failing
    pub allow_missing_keys: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            allow_missing_keys: true,
        }
    }
}

impl EvaluatorConfig {
    /// Strict resolution: absence is reported as a path evaluation error
    pub fn strict() -> Self {
        Self {
            allow_missing_keys: false,
        }
    }

    /// Decode options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CheckHookError::InvalidConfig(e.to_string()))
    }
}
