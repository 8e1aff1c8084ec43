// ABOUTME: Property-based tests for template population laws
// ABOUTME: Uses proptest to check echo, blanking, identity and case-folding behavior

use proptest::prelude::*;
use serde_json::json;

mod common;
use common::default_parser;

proptest! {
    #[test]
    fn keywordless_templates_echo(template in "[a-zA-Z0-9 .,!?\n}^:%-]*", value in "[a-z]*") {
        let populator = default_parser().parse(&template);
        prop_assert_eq!(populator.populate(&json!({})).unwrap(), template.clone());
        prop_assert_eq!(populator.populate(&json!({ "A": value })).unwrap(), template.clone());
        prop_assert_eq!(populator.populate(&json!(null)).unwrap(), template);
    }

    #[test]
    fn missing_values_blank_the_keyword(
        prefix in "[a-z0-9 .,^:]*",
        key in "[A-Z][A-Z0-9_]{0,7}",
        suffix in "[a-z0-9 .,^:}]*",
    ) {
        let template = format!("{}{{{}}}{}", prefix, key, suffix);
        let populator = default_parser().parse(&template);
        prop_assert_eq!(populator.populate(&json!({})).unwrap(), format!("{}{}", prefix, suffix));
    }

    #[test]
    fn identity_substitutes_the_value(
        prefix in "[a-z0-9 .,]*",
        key in "[A-Z][A-Z0-9_]{0,7}",
        value in "[a-zA-Z0-9 {}^:]*",
        suffix in "[a-z0-9 .,]*",
    ) {
        let template = format!("{}{{{}}}{}", prefix, key, suffix);
        let populator = default_parser().parse(&template);
        let values = json!({ key.clone(): value.clone() });
        prop_assert_eq!(
            populator.populate(&values).unwrap(),
            format!("{}{}{}", prefix, value, suffix)
        );
    }

    #[test]
    fn lookup_ignores_key_case(key in "[a-zA-Z][a-zA-Z0-9]{0,7}", value in "[a-z]{1,5}") {
        let template = format!("<{{{}}}>", key);
        let populator = default_parser().parse(&template);
        let lower = populator.populate(&json!({ key.to_lowercase(): value.clone() })).unwrap();
        let upper = populator.populate(&json!({ key.to_uppercase(): value.clone() })).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(lower, format!("<{}>", value));
    }

    #[test]
    fn integers_survive_arithmetic_round_trips(n in -100_000i64..100_000, step in 1i64..1000) {
        let template = format!("{{N^add:{}^subtract:{}}}", step, step);
        let populator = default_parser().parse(&template);
        prop_assert_eq!(populator.populate(&json!({ "N": n })).unwrap(), n.to_string());
    }
}
