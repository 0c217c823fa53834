//! Python bindings via PyO3

use crate::config::EvaluatorConfig;
use crate::evaluator::Evaluator;
use crate::path::{JsonPathEvaluator, PathEvaluator};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use serde_json::{Map, Number, Value};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a JSON-like Python object into a document tree
fn to_json(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    // bool is a subclass of int, so it has to be checked first
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(i) = obj.extract::<i64>() {
            return Ok(Value::from(i));
        }
        let u: u64 = obj.extract()?;
        return Ok(Value::from(u));
    }
    if obj.is_instance_of::<PyFloat>() {
        let f: f64 = obj.extract()?;
        return Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| PyValueError::new_err(format!("{} is not a valid JSON number", f)));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::String(obj.extract()?));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = Map::new();
        for (key, value) in dict.iter() {
            let key: String = key
                .extract()
                .map_err(|_| PyTypeError::new_err("document keys must be strings"))?;
            map.insert(key, to_json(&value)?);
        }
        return Ok(Value::Object(map));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(|item| to_json(&item)).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return tuple.iter().map(|item| to_json(&item)).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }

    Err(PyTypeError::new_err(format!(
        "unsupported document value of type {}",
        obj.get_type().name()?
    )))
}

fn evaluator(allow_missing_keys: bool) -> Evaluator {
    Evaluator::new(EvaluatorConfig { allow_missing_keys })
}

// ============================================================================
// Python Functions
// ============================================================================

/// Evaluate a check hook against a JSON-like Python object
///
/// # Arguments
/// * `document` - dict/list/str/int/float/bool/None tree
/// * `expression` - `<path> <op> <path>`, e.g. `$.status.phase == $.spec.expectedPhase`
/// * `allow_missing_keys` - resolve absent keys to "missing" instead of raising
///
/// # Raises
/// ValueError for malformed expressions or paths, TypeError when the operands
/// cannot be compared
#[pyfunction]
#[pyo3(signature = (document, expression, allow_missing_keys=true))]
fn evaluate_check_hook(
    document: &Bound<'_, PyAny>,
    expression: &str,
    allow_missing_keys: bool,
) -> PyResult<bool> {
    let document = to_json(document)?;
    Ok(evaluator(allow_missing_keys).evaluate(&document, expression)?)
}

/// Evaluate a check hook against a JSON string
#[pyfunction]
#[pyo3(signature = (document_json, expression, allow_missing_keys=true))]
fn evaluate_check_hook_json(
    document_json: &str,
    expression: &str,
    allow_missing_keys: bool,
) -> PyResult<bool> {
    let document: Value = serde_json::from_str(document_json)
        .map_err(|e| PyValueError::new_err(format!("invalid JSON document: {}", e)))?;
    Ok(evaluator(allow_missing_keys).evaluate(&document, expression)?)
}

/// Check whether a path expression is syntactically addressable
#[pyfunction]
fn is_valid_path(expr: &str) -> bool {
    JsonPathEvaluator::default().is_valid_path(expr)
}

/// Parse an expression into `(left, operator, right)`
#[pyfunction]
fn parse_expression(expression: &str) -> PyResult<(String, String, String)> {
    let parsed = crate::expression::parse(expression)?;
    Ok((parsed.left, parsed.operator.to_string(), parsed.right))
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn check_hook_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(evaluate_check_hook, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_check_hook_json, m)?)?;
    m.add_function(wrap_pyfunction!(is_valid_path, m)?)?;
    m.add_function(wrap_pyfunction!(parse_expression, m)?)?;
    Ok(())
}
