// ABOUTME: Regular-expression modifiers: pregmatch, notpregmatch and pregreplace
// ABOUTME: An invalid expression resolves to identity instead of failing the template

use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::value::scalar_text;
use super::{branch, ModifierRegistry, Transform};

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("pregmatch", |params, _| matcher(params, true));
    registry.register("notpregmatch", |params, _| matcher(params, false));
    registry.register("pregreplace", |params, _| replacer(params));
}

fn compile(pattern: &str, dot_all: bool) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    let source = if dot_all {
        format!("(?s){}", pattern)
    } else {
        pattern.to_string()
    };
    match Regex::new(&source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("Invalid modifier pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// `pregmatch:regex:then[:else]`
fn matcher(params: &[String], want_match: bool) -> Option<Transform> {
    let regex = compile(params.first()?, true)?;
    let then = params.get(1)?.clone();
    let otherwise = params.get(2).cloned();
    Some(branch(then, otherwise, move |input: &Value| {
        scalar_text(input).map(|text| regex.is_match(&text) == want_match)
    }))
}

/// `pregreplace:regex[:replacement]`; replacement uses `$1` / `${name}` group references
fn replacer(params: &[String]) -> Option<Transform> {
    let regex = compile(params.first()?, false)?;
    let replacement = params.get(1).cloned().unwrap_or_default();
    Some(Arc::new(move |input: Value| match scalar_text(&input) {
        Some(text) => Value::String(regex.replace_all(&text, replacement.as_str()).into_owned()),
        None => input,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::modifiers::ModifierSpec;
    use serde_json::json;

    fn resolve(name: &str, params: &[&str]) -> Transform {
        let registry = ModifierRegistry::builtin();
        let params = params.iter().map(|p| p.to_string()).collect();
        registry.resolve(&ModifierSpec::new(name, params))
    }

    #[test]
    fn test_pregmatch() {
        let digits = resolve("pregmatch", &[r"^\d+$", "number", "text"]);
        assert_eq!(digits(json!("123")), json!("number"));
        assert_eq!(digits(json!(42)), json!("number"));
        assert_eq!(digits(json!("12a")), json!("text"));

        let not = resolve("notpregmatch", &["x", "no-x"]);
        assert_eq!(not(json!("abc")), json!("no-x"));
        assert_eq!(not(json!("xyz")), json!("xyz"));
    }

    #[test]
    fn test_pregmatch_is_dot_all() {
        let spans = resolve("pregmatch", &["a.b", "yes", "no"]);
        assert_eq!(spans(json!("a\nb")), json!("yes"));
    }

    #[test]
    fn test_pregreplace() {
        let dashes = resolve("pregreplace", &[r"\s+", "-"]);
        assert_eq!(dashes(json!("a  b\tc")), json!("a-b-c"));

        let groups = resolve("pregreplace", &[r"(\w+)@(\w+)", "$2 at ${1}"]);
        assert_eq!(groups(json!("me@home")), json!("home at me"));

        let strip = resolve("pregreplace", &["[aeiou]"]);
        assert_eq!(strip(json!("banana")), json!("bnn"));
    }

    #[test]
    fn test_invalid_regex_is_identity() {
        let broken = resolve("pregreplace", &["(unclosed", "x"]);
        assert_eq!(broken(json!("(unclosed")), json!("(unclosed"));

        let broken = resolve("pregmatch", &["[", "yes", "no"]);
        assert_eq!(broken(json!("[")), json!("["));

        let empty = resolve("pregmatch", &["", "yes", "no"]);
        assert_eq!(empty(json!("anything")), json!("anything"));
    }

    #[test]
    fn test_non_scalar_input_passes_through() {
        let replace = resolve("pregreplace", &["a", "b"]);
        assert_eq!(replace(Value::Null), Value::Null);
        assert_eq!(replace(json!(["a"])), json!(["a"]));
    }
}
