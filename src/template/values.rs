// ABOUTME: Keyword value collection passed to a populator
// ABOUTME: Ordered name -> value mapping with JSON conversion and string-map merging

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::error::{Result, TemplateError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordValues {
    values: IndexMap<String, Value>,
}

impl KeywordValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value, which must be an object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            other => Err(TemplateError::InvalidArgument(format!(
                "keyword values must be a mapping, got {}",
                other
            ))),
        }
    }

    /// Add or update a value; the entry moves to the end so it wins over
    /// earlier keys that fold to the same name
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.values.shift_remove(&key);
        self.values.insert(key, value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Merge values; later entries win
    pub fn extend(&mut self, other: KeywordValues) {
        for (key, value) in other.values {
            self.set(key, value);
        }
    }

    /// Merge plain string variables, e.g. from `KEY=VALUE` command-line pairs
    pub fn extend_strings(&mut self, vars: HashMap<String, String>) {
        for (key, value) in vars {
            self.set(key, Value::String(value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KeywordValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
