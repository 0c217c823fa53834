//! Segment evaluation over a JSON document

use super::{PathError, Segment};
use serde_json::Value;

/// Apply `segments` to `root`, returning every matched node in document order
pub(crate) fn select<'a>(
    root: &'a Value,
    segments: &[Segment],
    allow_missing: bool,
) -> Result<Vec<&'a Value>, PathError> {
    let mut current = vec![root];

    for segment in segments {
        // Reported even when nothing is left to slice
        if let Segment::Slice { step: Some(0), .. } = segment {
            return Err(PathError::ZeroStep);
        }

        let mut next = Vec::new();
        for value in current {
            apply(segment, value, allow_missing, &mut next)?;
        }
        current = next;
    }

    Ok(current)
}

fn apply<'a>(
    segment: &Segment,
    value: &'a Value,
    allow_missing: bool,
    out: &mut Vec<&'a Value>,
) -> Result<(), PathError> {
    match segment {
        Segment::Child(name) => match value.as_object().and_then(|map| map.get(name)) {
            Some(child) => out.push(child),
            None if allow_missing => {}
            None => return Err(PathError::NotFound(name.clone())),
        },
        Segment::Wildcard => children(value, out),
        Segment::Descendant(name) => {
            let mut nodes = Vec::new();
            descendants(value, &mut nodes);
            out.extend(
                nodes
                    .into_iter()
                    .filter_map(|node| node.as_object().and_then(|map| map.get(name))),
            );
        }
        Segment::DescendantWildcard => {
            let mut nodes = Vec::new();
            descendants(value, &mut nodes);
            for node in nodes {
                children(node, out);
            }
        }
        Segment::Index(index) => match value {
            Value::Array(items) => match normalize(*index, items.len()) {
                Some(i) => out.push(&items[i]),
                None if allow_missing => {}
                None => {
                    return Err(PathError::IndexOutOfRange {
                        index: *index,
                        len: items.len(),
                    })
                }
            },
            Value::Object(_) | Value::Null if allow_missing => {}
            Value::Object(_) | Value::Null => return Err(PathError::NotFound(format!("[{}]", index))),
            scalar => return Err(PathError::NotIndexable(describe(scalar))),
        },
        Segment::Slice { start, end, step } => match value {
            Value::Array(items) => {
                let picked = slice_indices(*start, *end, step.unwrap_or(1), items.len());
                out.extend(picked.into_iter().map(|i| &items[i]));
            }
            Value::Object(_) | Value::Null if allow_missing => {}
            Value::Object(_) | Value::Null => {
                return Err(PathError::NotFound(slice_text(*start, *end, *step)))
            }
            scalar => return Err(PathError::NotIndexable(describe(scalar))),
        },
    }

    Ok(())
}

fn children<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => out.extend(map.values()),
        Value::Array(items) => out.extend(items.iter()),
        _ => {}
    }
}

/// `value` itself followed by all nested nodes, depth first
fn descendants<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        out.push(node);
        // Reversed so the first child is visited next
        match node {
            Value::Object(map) => stack.extend(map.values().rev()),
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }
}

fn normalize(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { len + index } else { index };
    if (0..len).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

fn slice_indices(start: Option<i64>, end: Option<i64>, step: i64, len: usize) -> Vec<usize> {
    let len = len as i64;
    let resolve = |i: i64| if i < 0 { len + i } else { i };
    // A stride beyond the array picks at most one element
    let stride = usize::try_from(step.unsigned_abs()).unwrap_or(usize::MAX);

    if step > 0 {
        let lower = resolve(start.unwrap_or(0)).clamp(0, len);
        let upper = resolve(end.unwrap_or(len)).clamp(0, len);
        (lower..upper).step_by(stride).map(|i| i as usize).collect()
    } else {
        let upper = resolve(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let lower = end.map(resolve).unwrap_or(-1).clamp(-1, len - 1);
        (lower + 1..=upper).rev().step_by(stride).map(|i| i as usize).collect()
    }
}

fn slice_text(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> String {
    let bound = |b: Option<i64>| b.map(|v| v.to_string()).unwrap_or_default();
    match step {
        Some(step) => format!("[{}:{}:{}]", bound(start), bound(end), step),
        None => format!("[{}:{}]", bound(start), bound(end)),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse;
    use serde_json::json;

    fn select_json(doc: &Value, expr: &str) -> Result<Vec<Value>, PathError> {
        let path = parse(expr).unwrap();
        select(doc, path.segments(), true).map(|v| v.into_iter().cloned().collect())
    }

    #[test]
    fn test_select_root_and_children() {
        let doc = json!({"status": {"phase": "Running"}});
        assert_eq!(select_json(&doc, "$").unwrap(), vec![doc.clone()]);
        assert_eq!(
            select_json(&doc, "$.status.phase").unwrap(),
            vec![json!("Running")]
        );
        assert!(select_json(&doc, "$.status.missing").unwrap().is_empty());
        // Members of scalars are simply absent
        assert!(select_json(&doc, "$.status.phase.deeper").unwrap().is_empty());
    }

    #[test]
    fn test_select_indices() {
        let doc = json!({"items": [10, 20, 30]});
        assert_eq!(select_json(&doc, "$.items[0]").unwrap(), vec![json!(10)]);
        assert_eq!(select_json(&doc, "$.items[-1]").unwrap(), vec![json!(30)]);
        assert!(select_json(&doc, "$.items[3]").unwrap().is_empty());
        assert!(select_json(&doc, "$.items[-4]").unwrap().is_empty());
    }

    #[test]
    fn test_select_slices() {
        let doc = json!([0, 1, 2, 3, 4, 5]);
        assert_eq!(
            select_json(&doc, "$[1:4]").unwrap(),
            vec![json!(1), json!(2), json!(3)]
        );
        assert_eq!(
            select_json(&doc, "$[::2]").unwrap(),
            vec![json!(0), json!(2), json!(4)]
        );
        assert_eq!(
            select_json(&doc, "$[-2:]").unwrap(),
            vec![json!(4), json!(5)]
        );
        assert_eq!(
            select_json(&doc, "$[::-2]").unwrap(),
            vec![json!(5), json!(3), json!(1)]
        );
        assert_eq!(
            select_json(&doc, "$[3:0:-1]").unwrap(),
            vec![json!(3), json!(2), json!(1)]
        );
        assert!(select_json(&doc, "$[4:2]").unwrap().is_empty());
    }

    #[test]
    fn test_select_huge_steps() {
        let doc = json!([0, 1, 2]);
        assert_eq!(
            select_json(&doc, "$[1::9223372036854775807]").unwrap(),
            vec![json!(1)]
        );
        assert_eq!(
            select_json(&doc, "$[::-9223372036854775808]").unwrap(),
            vec![json!(2)]
        );
        assert_eq!(
            select_json(&doc, "$[-9223372036854775808:9223372036854775807]").unwrap(),
            vec![json!(0), json!(1), json!(2)]
        );
    }

    #[test]
    fn test_select_zero_step() {
        let doc = json!({});
        assert_eq!(select_json(&doc, "$.a[::0]"), Err(PathError::ZeroStep));
    }

    #[test]
    fn test_select_wildcards() {
        let doc = json!({"items": [{"name": "a"}, {"name": "b"}, {"other": 1}]});
        assert_eq!(
            select_json(&doc, "$.items[*].name").unwrap(),
            vec![json!("a"), json!("b")]
        );
        assert_eq!(select_json(&doc, "$.items.*").unwrap().len(), 3);
    }

    #[test]
    fn test_select_descendants() {
        let doc = json!({
            "name": "root",
            "spec": {"template": {"name": "inner"}},
            "list": [{"name": "item"}]
        });
        assert_eq!(
            select_json(&doc, "$..name").unwrap(),
            // Object members are visited in key order
            vec![json!("root"), json!("item"), json!("inner")]
        );

        let doc = json!({"a": {"b": 1}});
        assert_eq!(
            select_json(&doc, "$..*").unwrap(),
            vec![json!({"b": 1}), json!(1)]
        );
    }

    #[test]
    fn test_select_index_into_scalar() {
        let doc = json!({"s": "text", "n": null, "o": {}});
        assert_eq!(
            select_json(&doc, "$.s[0]"),
            Err(PathError::NotIndexable("a string"))
        );
        assert_eq!(
            select_json(&doc, "$.s[0:1]"),
            Err(PathError::NotIndexable("a string"))
        );
        assert!(select_json(&doc, "$.n[0]").unwrap().is_empty());
        assert!(select_json(&doc, "$.o[0]").unwrap().is_empty());
    }

    #[test]
    fn test_select_strict_missing() {
        let doc = json!({"o": {}});
        let path = parse("$.o[0]").unwrap();
        assert_eq!(
            select(&doc, path.segments(), false),
            Err(PathError::NotFound("[0]".to_string()))
        );

        let doc = json!({"o": {}, "n": null});
        let path = parse("$.o[1:]").unwrap();
        assert_eq!(
            select(&doc, path.segments(), false),
            Err(PathError::NotFound("[1:]".to_string()))
        );
        let path = parse("$.n[::-1]").unwrap();
        assert_eq!(
            select(&doc, path.segments(), false),
            Err(PathError::NotFound("[::-1]".to_string()))
        );
        // Multi-selectors over containers may match nothing
        let path = parse("$.o.*").unwrap();
        assert_eq!(select(&doc, path.segments(), false), Ok(vec![]));
    }

    #[test]
    fn test_select_deep_descent() {
        let mut doc = json!({"x": 0});
        for depth in 1..200_000 {
            let mut map = serde_json::Map::new();
            map.insert("x".to_string(), Value::from(depth));
            map.insert("next".to_string(), doc);
            doc = Value::Object(map);
        }
        let path = parse("$..x").unwrap();
        let found = select(&doc, path.segments(), true).unwrap();
        assert_eq!(found.len(), 200_000);
        assert_eq!(found[0], &json!(199_999));
        // Dropping a tree this deep recurses
        std::mem::forget(doc);

        let mut doc = json!(0);
        for _ in 0..200_000 {
            doc = Value::Array(vec![doc]);
        }
        let path = parse("$..*").unwrap();
        assert_eq!(select(&doc, path.segments(), true).unwrap().len(), 200_000);
        std::mem::forget(doc);
    }
}
