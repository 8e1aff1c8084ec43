// ABOUTME: Structural cleanup modifiers: CSS-safe identifiers, blank line limits and truncation
// ABOUTME: Numeric parameters are bounded, with fixed defaults when missing or invalid

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use super::value::parse_number;
use super::{identity, map_text, ModifierRegistry, Transform};

pub const DEFAULT_MAX_CHARS: usize = 1000;
pub const DEFAULT_MAX_LINES: usize = 2;
const LINE_LIMIT_CEILING: usize = 100;

static CSS_EDGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[^a-z0-9]+|[^_a-z0-9-]+$").expect("css edge pattern is valid")
});
static CSS_INVALID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[^_a-z0-9-]+").expect("css pattern is valid"));
static CSS_SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_-]{3,}").expect("separator pattern is valid"));
static TRAILING_LINE_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\t ]+(\r\n|\n\r|\r|\n)").expect("trailing space pattern is valid")
});
static WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\w]+").expect("word pattern is valid"));
static SENTENCES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\r\n!?.]+(?:[.?!]+|[\r\n]+|$)").expect("sentence pattern is valid")
});

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("class", |_, _| Some(map_text(css_safe)));
    registry.alias("id", "class");
    registry.alias("csssafe", "class");

    registry.register("nolines", |params, _| {
        let max_lines = positive_count(params.first())
            .unwrap_or(DEFAULT_MAX_LINES)
            .min(LINE_LIMIT_CEILING);
        limit_blank_lines(max_lines)
    });

    registry.register("maxwords", |params, registry| {
        let count = positive_count(params.first())?;
        Some(truncate_after(&WORDS, count, code_stripper(params.get(1), registry)))
    });
    registry.alias("words", "maxwords");

    registry.register("maxsentences", |params, registry| {
        let count = positive_count(params.first())?;
        Some(truncate_after(&SENTENCES, count, code_stripper(params.get(1), registry)))
    });
    registry.alias("sentences", "maxsentences");

    registry.register("maxchars", |params, registry| {
        let max_chars = positive_count(params.first()).unwrap_or(DEFAULT_MAX_CHARS);
        let strip = code_stripper(params.get(1), registry);
        Some(Arc::new(move |input: Value| match strip(input) {
            Value::String(s) if s.chars().count() > max_chars => {
                Value::String(s.chars().take(max_chars).collect())
            }
            other => other,
        }))
    });
    registry.alias("characters", "maxchars");
    registry.alias("chars", "maxchars");
}

/// Make a string usable as a CSS class or id
pub fn css_safe(input: &str) -> String {
    let trimmed = CSS_EDGES.replace_all(input, "");
    let prefixed = if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("A_{}", trimmed)
    } else {
        trimmed.into_owned()
    };
    let replaced = CSS_INVALID.replace_all(&prefixed, "_");
    CSS_SEPARATOR_RUNS.replace_all(&replaced, "_").into_owned()
}

fn limit_blank_lines(max_lines: usize) -> Option<Transform> {
    let pattern = format!(
        r"((?:\r\n|\n\r|\r|\n){{{}}})(?:\r\n|\n\r|\r|\n)+",
        max_lines
    );
    let excess = Regex::new(&pattern).ok()?;
    Some(map_text(move |input| {
        let trimmed = TRAILING_LINE_SPACE.replace_all(input, "$1");
        excess.replace_all(&trimmed, "$1").into_owned()
    }))
}

/// Parse a positive whole count, rounding fractional input
fn positive_count(param: Option<&String>) -> Option<usize> {
    let n = parse_number(param?)?.round();
    if n >= 1.0 {
        Some(n.min(usize::MAX as f64) as usize)
    } else {
        None
    }
}

/// Code stripping runs unless the flag parameter is exactly "0"
fn code_stripper(flag: Option<&String>, registry: &ModifierRegistry) -> Transform {
    match flag.map(|f| f.trim()) {
        Some("0") => identity(),
        _ => registry.resolve_named("text"),
    }
}

/// Keep everything up to the end of the `count`-th match of `unit`
fn truncate_after(unit: &'static Lazy<Regex>, count: usize, strip: Transform) -> Transform {
    Arc::new(move |input: Value| match strip(input) {
        Value::String(s) => {
            let cut = unit.find_iter(&s).nth(count - 1).map(|last| last.end());
            match cut {
                Some(end) => Value::String(s[..end].trim_end().to_string()),
                None => Value::String(s),
            }
        }
        other => other,
    })
}
