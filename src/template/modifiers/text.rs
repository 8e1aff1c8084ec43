// ABOUTME: Text case and spacing modifiers plus URL form encoding
// ABOUTME: All operate on string input only and pass other values through

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use super::{map_text, ModifierRegistry};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("lowercase", |_, _| Some(map_text(str::to_lowercase)));
    registry.register("uppercase", |_, _| Some(map_text(str::to_uppercase)));
    registry.register("titleize", |_, _| Some(map_text(titleize)));
    registry.alias("heading", "titleize");
    registry.register("capitalize", |_, _| Some(map_text(capitalize_sentences)));
    registry.alias("sentence", "capitalize");

    registry.register("space", |_, _| Some(map_text(|s| s.replace('_', " "))));
    registry.register("underscore", |_, _| Some(map_text(|s| s.replace(' ', "_"))));
    registry.register("trim", |_, _| Some(map_text(|s| s.trim().to_string())));
    registry.register("nomultispace", |_, _| {
        Some(map_text(|s| WHITESPACE_RUN.replace_all(s, " ").into_owned()))
    });
    registry.alias("singlespace", "nomultispace");

    registry.register("urlencode", |_, _| Some(map_text(url_encode)));
    registry.register("urldecode", |_, _| Some(map_text(url_decode)));
}

/// Lowercase, then uppercase the first letter of every whitespace-separated word
pub fn titleize(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            word_start = true;
            output.push(c);
        } else if word_start {
            output.extend(c.to_uppercase());
            word_start = false;
        } else {
            output.extend(c.to_lowercase());
        }
    }
    output
}

/// Lowercase, then uppercase the first letter of each sentence
pub fn capitalize_sentences(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut capitalize_next = true;
    let mut after_terminator = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if capitalize_next {
                output.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                output.extend(c.to_lowercase());
            }
            after_terminator = false;
        } else {
            if matches!(c, '.' | '?' | '!') {
                after_terminator = true;
            } else if c.is_whitespace() {
                if after_terminator {
                    capitalize_next = true;
                }
            } else {
                after_terminator = false;
            }
            output.push(c);
        }
    }
    output
}

pub fn url_encode(input: &str) -> String {
    url::form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// Decode form encoding: `+` is a space, `%XX` a byte; malformed escapes stay literal
pub fn url_decode(input: &str) -> String {
    percent_decode_str(&input.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
