// ABOUTME: Integration tests for the compile, parse and populate pipeline
// ABOUTME: Covers end-to-end rendering scenarios and the composition, escaping and case laws

use serde_json::json;
use std::collections::HashMap;

use kwdmod::{compile, DelimiterConfig, KeywordValues, TemplateError};

mod common;
use common::{default_parser, render};

#[test]
fn test_simple_substitution() {
    assert_eq!(render("Hello {NAME}!", &json!({"NAME": "World"})), "Hello World!");
}

#[test]
fn test_single_modifier() {
    assert_eq!(render("{NAME^uppercase}", &json!({"NAME": "ann"})), "ANN");
}

#[test]
fn test_numeric_comparison_branches() {
    let populator = default_parser().parse("{X^gt:5:big:small}");
    assert_eq!(populator.populate(&json!({"X": 10})).unwrap(), "big");
    assert_eq!(populator.populate(&json!({"X": 2})).unwrap(), "small");
}

#[test]
fn test_same_keyword_different_chains() {
    assert_eq!(render("{A}{A^lowercase}", &json!({"A": "Hi"})), "Hihi");
}

#[test]
fn test_unmatched_delimiter_is_echoed() {
    let populator = default_parser().parse("Hello {NAME");
    assert!(!populator.has_keywords());
    assert_eq!(populator.populate(&json!({"NAME": "x"})).unwrap(), "Hello {NAME");
    assert_eq!(populator.populate(&json!(42)).unwrap(), "Hello {NAME");
}

#[test]
fn test_empty_template() {
    let populator = default_parser().parse("");
    assert_eq!(populator.populate(&json!({})).unwrap(), "");
    assert_eq!(populator.populate(&json!({"A": "b"})).unwrap(), "");
}

#[test]
fn test_populate_with_no_values_blanks_keywords() {
    assert_eq!(
        render("a {B} c {D^uppercase} e", &json!({})),
        "a  c  e"
    );
}

#[test]
fn test_identity_stringifies_values() {
    let populator = default_parser().parse("{V}");
    assert_eq!(populator.populate(&json!({"V": "text"})).unwrap(), "text");
    assert_eq!(populator.populate(&json!({"V": 10})).unwrap(), "10");
    assert_eq!(populator.populate(&json!({"V": 2.5})).unwrap(), "2.5");
    assert_eq!(populator.populate(&json!({"V": true})).unwrap(), "true");
    assert_eq!(populator.populate(&json!({"V": null})).unwrap(), "");
}

#[test]
fn test_chain_applies_left_to_right() {
    // add then multiply: (3 + 1) * 2
    assert_eq!(render("{N^add:1^multiply:2}", &json!({"N": 3})), "8");
    // multiply then add: 3 * 2 + 1
    assert_eq!(render("{N^multiply:2^add:1}", &json!({"N": 3})), "7");
    assert_eq!(
        render("{S^trim^uppercase^underscore}", &json!({"S": "  two words "})),
        "TWO_WORDS"
    );
}

#[test]
fn test_escaped_delimiters_in_parameters() {
    assert_eq!(
        render(r"{X^pregreplace:-:a\:b\^c\%}", &json!({"X": "1-2"})),
        "1a:b^c%2"
    );
    assert_eq!(
        render(r"{X^match:a\}b:yes:no}", &json!({"X": "a}b"})),
        "yes"
    );
}

#[test]
fn test_case_folding() {
    let populator = default_parser().parse("<{Name}>");
    let lower = populator.populate(&json!({"name": "x"})).unwrap();
    let upper = populator.populate(&json!({"NAME": "x"})).unwrap();
    assert_eq!(lower, "<x>");
    assert_eq!(lower, upper);
}

#[test]
fn test_case_sensitive_lookup() {
    let parser = compile(&DelimiterConfig::default().with_case_sensitive(true)).unwrap();
    let populator = parser.parse("{Name}/{NAME}");
    assert_eq!(
        populator.populate(&json!({"Name": "a", "NAME": "b"})).unwrap(),
        "a/b"
    );
    assert_eq!(populator.populate(&json!({"name": "a"})).unwrap(), "/");
}

#[test]
fn test_unknown_modifier_is_identity() {
    assert_eq!(render("{X^bogusmodifier}", &json!({"X": "hi"})), "hi");
    assert_eq!(render("{X^add}", &json!({"X": 4})), "4");
    assert_eq!(render("{X^pregmatch:([:yes}", &json!({"X": "a"})), "a");
}

#[test]
fn test_substitutions_are_not_rescanned() {
    assert_eq!(
        render("{A} {B}", &json!({"A": "{B}", "B": "b"})),
        "{B} b"
    );
}

#[test]
fn test_unrecognized_keys_are_ignored() {
    assert_eq!(render("{A}", &json!({"A": 1, "EXTRA": 2})), "1");
}

#[test]
fn test_populate_requires_mapping() {
    let populator = default_parser().parse("{A}");
    let err = populator.populate(&json!(["A"])).unwrap_err();
    assert!(matches!(err, TemplateError::InvalidArgument(_)));
}

#[test]
fn test_populate_map_and_values() {
    let populator = default_parser().parse("{A}-{B^increment}");

    let mut map = HashMap::new();
    map.insert("a".to_string(), json!("x"));
    map.insert("B".to_string(), json!("9"));
    assert_eq!(populator.populate_map(&map), "x-10");

    let values = KeywordValues::new().with("A", "y").with("B", 1);
    assert_eq!(populator.populate_values(&values), "y-2");
}

#[test]
fn test_populator_is_reusable() {
    let populator = default_parser().parse("#{N}");
    for n in 0..5 {
        assert_eq!(populator.populate(&json!({ "N": n })).unwrap(), format!("#{}", n));
    }
}

#[test]
fn test_custom_delimiters() {
    let parser = compile(&DelimiterConfig::new("[", "|", ";")).unwrap();
    let populator = parser.parse("[A|add;2] {A} [B|empty;none]");
    assert_eq!(
        populator.populate(&json!({"A": 1, "B": ""})).unwrap(),
        "3 {A} none"
    );

    let parser = compile(&DelimiterConfig::new("%", "^", ":")).unwrap();
    assert_eq!(
        parser.parse("%A^lowercase%").populate(&json!({"A": "Q"})).unwrap(),
        "q"
    );
}

#[test]
fn test_invalid_configurations_name_the_parameter() {
    let cases = [
        (DelimiterConfig::new("a", "^", ":"), "kwd_delim"),
        (DelimiterConfig::new("{", "-", ":"), "mod_delim"),
        (DelimiterConfig::new("{", "^", " "), "param_delim"),
        (DelimiterConfig::new("{", "^^", ":"), "mod_delim"),
        (DelimiterConfig::new("{", "^", "^"), "param_delim"),
        (DelimiterConfig::new("{", "}", ":"), "mod_delim"),
    ];

    for (config, parameter) in cases {
        let err = compile(&config).unwrap_err();
        assert_eq!(err.parameter(), Some(parameter), "config {:?}", config);
    }
}

#[test]
fn test_parsers_share_nothing() {
    let first = default_parser();
    let second = compile(&DelimiterConfig::new("<", "^", ":")).unwrap();
    let a = first.parse("{A}<A>");
    let b = second.parse("{A}<A>");
    assert_eq!(a.populate(&json!({"A": 1})).unwrap(), "1<A>");
    assert_eq!(b.populate(&json!({"A": 1})).unwrap(), "{A}1");
}

#[test]
fn test_start_delimiter_is_part_of_the_name() {
    let parser = default_parser();
    let names: Vec<String> = parser
        .scan("{a{b}")
        .into_iter()
        .map(|occurrence| occurrence.keyword_name)
        .collect();
    assert_eq!(names, vec!["A{B".to_string()]);

    let values = json!({"A{B": "w", "B": "v"});
    assert_eq!(render("{a{b}", &values), "w");
}

#[test]
fn test_doubled_start_delimiter() {
    assert_eq!(render("{{NAME}}", &json!({"NAME": "v"})), "}");
    assert_eq!(render("{{NAME}}", &json!({"{NAME": "v"})), "v}");
}

#[test]
fn test_parser_and_populator_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<kwdmod::Parser>();
    assert_send_sync::<kwdmod::Populator>();
    assert_send_sync::<kwdmod::Compiler>();

    let populator = std::sync::Arc::new(default_parser().parse("{N^add:1}"));
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let populator = std::sync::Arc::clone(&populator);
            std::thread::spawn(move || populator.populate(&json!({ "N": n })).unwrap())
        })
        .collect();
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["1", "2", "3", "4"]);
}
