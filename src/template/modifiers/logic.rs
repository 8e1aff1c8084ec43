// ABOUTME: Branching modifiers: emptiness tests, string comparisons and numeric comparisons
// ABOUTME: Each yields a "then" value on success and an optional "else" value otherwise

use serde_json::Value;

use super::value::{as_number, is_empty, parse_number, stringify};
use super::{branch, ModifierRegistry, Transform};

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("empty", |params, _| emptiness(params, true));
    registry.register("notempty", |params, _| emptiness(params, false));

    registry.register("match", |params, _| {
        compare_text(params, |input, operand| input == operand)
    });
    registry.alias("equals", "match");
    registry.register("notmatch", |params, _| {
        compare_text(params, |input, operand| input != operand)
    });
    registry.register("contains", |params, _| {
        compare_text(params, |input, operand| input.contains(operand))
    });
    registry.register("doesntcontain", |params, _| {
        compare_text(params, |input, operand| !input.contains(operand))
    });
    registry.alias("doesntcontains", "doesntcontain");

    registry.register("gt", |params, _| compare_number(params, |a, b| a > b));
    registry.register("gte", |params, _| compare_number(params, |a, b| a >= b));
    registry.register("lt", |params, _| compare_number(params, |a, b| a < b));
    registry.register("lte", |params, _| compare_number(params, |a, b| a <= b));
}

/// `empty:then[:else]` / `notempty:then[:else]`
fn emptiness(params: &[String], want_empty: bool) -> Option<Transform> {
    let then = params.first()?.clone();
    let otherwise = params.get(1).cloned();
    Some(branch(then, otherwise, move |input: &Value| {
        Some(is_empty(input) == want_empty)
    }))
}

/// `name:operand:then[:else]` over the stringified input
fn compare_text(params: &[String], test: fn(&str, &str) -> bool) -> Option<Transform> {
    let operand = params.first().filter(|p| !p.is_empty())?.clone();
    let then = params.get(1)?.clone();
    let otherwise = params.get(2).cloned();
    Some(branch(then, otherwise, move |input: &Value| {
        Some(test(&stringify(input), &operand))
    }))
}

/// `name:operand:then[:else]`; non-numeric input passes through
fn compare_number(params: &[String], test: fn(f64, f64) -> bool) -> Option<Transform> {
    let operand = parse_number(params.first()?)?;
    let then = params.get(1)?.clone();
    let otherwise = params.get(2).cloned();
    Some(branch(then, otherwise, move |input: &Value| {
        as_number(input).map(|n| test(n, operand))
    }))
}
