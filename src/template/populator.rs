// ABOUTME: Compiled keyword table and the populate function bound to one template
// ABOUTME: Substitutes every keyword occurrence in a single pass without rescanning values

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

use super::error::{Result, TemplateError};
use super::modifiers::value::stringify;
use super::modifiers::TransformChain;
use super::values::KeywordValues;

/// One keyword occurrence: the exact source text and its modifier chain
#[derive(Debug, Clone)]
pub struct KeywordSlot {
    pub raw_match: String,
    pub chain: TransformChain,
}

/// Keyword name -> occurrences in source order
#[derive(Debug, Clone, Default)]
pub struct CompiledKeywordTable {
    entries: IndexMap<String, Vec<KeywordSlot>>,
}

impl CompiledKeywordTable {
    /// Record an occurrence, returning (keyword index, occurrence index)
    pub(crate) fn insert(&mut self, keyword: String, slot: KeywordSlot) -> (usize, usize) {
        let entry = self.entries.entry(keyword);
        let keyword_index = entry.index();
        let slots = entry.or_default();
        slots.push(slot);
        (keyword_index, slots.len() - 1)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn occurrences(&self, keyword: &str) -> &[KeywordSlot] {
        self.entries.get(keyword).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[KeywordSlot])> {
        self.entries
            .iter()
            .map(|(keyword, slots)| (keyword.as_str(), slots.as_slice()))
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all keywords
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn slot(&self, keyword: usize, occurrence: usize) -> Option<(&str, &KeywordSlot)> {
        self.entries
            .get_index(keyword)
            .and_then(|(name, slots)| slots.get(occurrence).map(|slot| (name.as_str(), slot)))
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Segment {
    Literal(String),
    Keyword { keyword: usize, occurrence: usize },
}

#[derive(Debug, Clone)]
enum Body {
    Empty,
    Verbatim,
    Compiled {
        segments: Vec<Segment>,
        table: CompiledKeywordTable,
    },
}

/// Populate function for one parsed template
#[derive(Debug, Clone)]
pub struct Populator {
    template: String,
    case_sensitive: bool,
    body: Body,
}

impl Populator {
    /// Always yields ""
    pub(crate) fn empty() -> Self {
        Self {
            template: String::new(),
            case_sensitive: false,
            body: Body::Empty,
        }
    }

    /// Always yields the template unchanged
    pub(crate) fn verbatim(template: &str) -> Self {
        Self {
            template: template.to_string(),
            case_sensitive: false,
            body: Body::Verbatim,
        }
    }

    pub(crate) fn compiled(
        template: &str,
        case_sensitive: bool,
        segments: Vec<Segment>,
        table: CompiledKeywordTable,
    ) -> Self {
        Self {
            template: template.to_string(),
            case_sensitive,
            body: Body::Compiled { segments, table },
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The keyword table, if the template contained any keywords
    pub fn table(&self) -> Option<&CompiledKeywordTable> {
        match &self.body {
            Body::Compiled { table, .. } => Some(table),
            _ => None,
        }
    }

    pub fn has_keywords(&self) -> bool {
        self.table().is_some()
    }

    /// Populate from a JSON value, which must be an object for templates with keywords
    pub fn populate(&self, values: &Value) -> Result<String> {
        if !self.has_keywords() {
            return Ok(self.render(std::iter::empty()));
        }
        let map = values.as_object().ok_or_else(|| {
            TemplateError::InvalidArgument(format!(
                "values must be a mapping, {} given",
                value_kind(values)
            ))
        })?;
        Ok(self.render(map.iter()))
    }

    pub fn populate_map(&self, values: &HashMap<String, Value>) -> String {
        self.render(values.iter())
    }

    pub fn populate_values(&self, values: &KeywordValues) -> String {
        self.render(values.iter())
    }

    fn render<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let (segments, table) = match &self.body {
            Body::Empty => return String::new(),
            Body::Verbatim => return self.template.clone(),
            Body::Compiled { segments, table } => (segments, table),
        };

        let lookup: HashMap<Cow<'a, str>, &'a Value> = values
            .into_iter()
            .map(|(key, value)| (self.fold(key), value))
            .collect();

        let mut output = String::with_capacity(self.template.len());
        for segment in segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Keyword {
                    keyword,
                    occurrence,
                } => {
                    if let Some((name, slot)) = table.slot(*keyword, *occurrence) {
                        if let Some(value) = lookup.get(name) {
                            output.push_str(&stringify(&slot.chain.apply((*value).clone())));
                        }
                    }
                }
            }
        }
        output
    }

    fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_uppercase())
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
