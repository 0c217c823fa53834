//! Property tests for expression parsing

use proptest::prelude::*;

use crate::expression::{parse, BooleanExpression, Operator};

/// Dotted paths such as `$.status.phase`
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,7}", 1..=3)
        .prop_map(|names| format!("$.{}", names.join(".")))
}

/// Paths mixing members, indices and bracketed keys
fn rich_path_strategy() -> impl Strategy<Value = String> {
    (path_strategy(), prop::option::of(-5i64..=5), prop::option::of("[a-z ]{1,6}")).prop_map(
        |(base, index, key)| {
            let mut path = base;
            if let Some(index) = index {
                path.push_str(&format!("[{}]", index));
            }
            if let Some(key) = key {
                path.push_str(&format!("['{}']", key));
            }
            path
        },
    )
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(Operator::PRIORITY.to_vec())
}

fn padding_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just(" ".to_string()), Just("  ".to_string()), Just("\t".to_string())]
}

proptest! {
    /// Every operator round-trips through the parser with its operands intact
    #[test]
    fn prop_operator_recovered(
        left in rich_path_strategy(),
        right in rich_path_strategy(),
        op in operator_strategy(),
        pad_left in padding_strategy(),
        pad_right in padding_strategy(),
    ) {
        let raw = format!("{}{}{}{}{}", left, pad_left, op, pad_right, right);
        let expr = parse(&raw).unwrap();

        prop_assert_eq!(
            expr,
            BooleanExpression { operator: op, left, right },
            "raw: {:?}", raw
        );
    }

    /// Display output parses back to the same expression
    #[test]
    fn prop_display_reparses(
        left in path_strategy(),
        right in path_strategy(),
        op in operator_strategy(),
    ) {
        let expr = BooleanExpression { operator: op, left, right };
        prop_assert_eq!(parse(&expr.to_string()).unwrap(), expr);
    }

    /// A lone path never parses
    #[test]
    fn prop_single_path_rejected(path in rich_path_strategy()) {
        prop_assert!(parse(&path).is_err());
    }

    /// Parsing is deterministic
    #[test]
    fn prop_parse_idempotent(raw in "[$.a-c <>=!\\[\\]0-9]{0,16}") {
        let first = parse(&raw).ok();
        let second = parse(&raw).ok();
        prop_assert_eq!(first, second);
    }
}
