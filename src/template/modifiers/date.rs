// ABOUTME: Date formatting modifier for Unix timestamp input
// ABOUTME: Format strings use chrono strftime syntax and are validated at resolve time

use chrono::format::{Item, StrftimeItems};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::value::as_number;
use super::{ModifierRegistry, Transform};

pub fn register(registry: &mut ModifierRegistry) {
    registry.register("dateformat", |params, _| date_format(params.first()?));
    registry.alias("formatdate", "dateformat");
}

fn date_format(format: &str) -> Option<Transform> {
    if format.is_empty() {
        return None;
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        debug!("Invalid date format '{}'", format);
        return None;
    }

    let format = format.to_string();
    Some(Arc::new(move |input: Value| {
        let datetime = as_number(&input)
            .filter(|secs| secs.abs() < i64::MAX as f64)
            .and_then(|secs| Utc.timestamp_opt(secs.floor() as i64, 0).single());
        match datetime {
            Some(datetime) => Value::String(datetime.format(&format).to_string()),
            None => input,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::modifiers::ModifierSpec;
    use serde_json::json;

    fn apply(params: &[&str], input: Value) -> Value {
        let registry = ModifierRegistry::builtin();
        let params = params.iter().map(|p| p.to_string()).collect();
        registry.resolve(&ModifierSpec::new("dateformat", params))(input)
    }

    #[test]
    fn test_formats_timestamps() {
        assert_eq!(apply(&["%Y-%m-%d"], json!(0)), json!("1970-01-01"));
        assert_eq!(
            apply(&["%Y-%m-%d %H:%M"], json!("1700000000")),
            json!("2023-11-14 22:13")
        );
    }

    #[test]
    fn test_non_numeric_input_passes_through() {
        assert_eq!(apply(&["%Y"], json!("yesterday")), json!("yesterday"));
    }

    #[test]
    fn test_invalid_or_missing_format_is_identity() {
        assert_eq!(apply(&[], json!(0)), json!(0));
        assert_eq!(apply(&["%Q"], json!(0)), json!(0));
    }
}
