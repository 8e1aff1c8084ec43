// ABOUTME: Template parser that extracts keyword occurrences and builds modifier chains
// ABOUTME: Produces a populator bound to one template's compiled keyword table

use regex::Regex;
use std::ops::Range;
use std::sync::Arc;
use tracing::trace;

use super::delimiter::DelimiterSet;
use super::modifiers::{ModifierRegistry, ModifierSpec, TransformChain};
use super::populator::{CompiledKeywordTable, KeywordSlot, Populator, Segment};

/// One textual keyword occurrence inside a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordOccurrence {
    /// Source text including delimiters and modifiers
    pub raw_match: String,
    /// Unescaped and case-folded keyword name
    pub keyword_name: String,
    /// Modifier chain text after the first modifier delimiter, empty when absent
    pub modifier_chain_source: String,
    /// Byte range of `raw_match` in the template
    pub span: Range<usize>,
}

/// Parses templates for one delimiter configuration
#[derive(Debug, Clone)]
pub struct Parser {
    delimiters: DelimiterSet,
    pattern: Regex,
    registry: Arc<ModifierRegistry>,
}

impl Parser {
    pub(crate) fn new(
        delimiters: DelimiterSet,
        pattern: Regex,
        registry: Arc<ModifierRegistry>,
    ) -> Self {
        Self {
            delimiters,
            pattern,
            registry,
        }
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        &self.delimiters
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    /// Compile a template into a populator
    pub fn parse(&self, template: &str) -> Populator {
        if template.is_empty() {
            return Populator::empty();
        }

        let mut table = CompiledKeywordTable::default();
        let mut segments = Vec::new();
        let mut cursor = 0;

        for occurrence in self.scan(template) {
            if occurrence.span.start > cursor {
                segments.push(Segment::Literal(
                    template[cursor..occurrence.span.start].to_string(),
                ));
            }
            cursor = occurrence.span.end;

            let chain = self.build_chain(&occurrence.modifier_chain_source);
            let (keyword, occurrence) = table.insert(
                occurrence.keyword_name,
                KeywordSlot {
                    raw_match: occurrence.raw_match,
                    chain,
                },
            );
            segments.push(Segment::Keyword {
                keyword,
                occurrence,
            });
        }

        if table.is_empty() {
            trace!("Template has no keywords, populate will echo it");
            return Populator::verbatim(template);
        }

        if cursor < template.len() {
            segments.push(Segment::Literal(template[cursor..].to_string()));
        }

        trace!(
            "Parsed template with {} keywords ({} occurrences)",
            table.len(),
            table.occurrence_count()
        );
        Populator::compiled(
            template,
            self.delimiters.case_sensitive(),
            segments,
            table,
        )
    }

    /// Find every keyword occurrence, left to right, without overlap
    pub fn scan(&self, template: &str) -> Vec<KeywordOccurrence> {
        self.pattern
            .captures_iter(template)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let name = captures.get(1)?.as_str();
                let chain = captures.get(2).map(|m| m.as_str()).unwrap_or("");
                Some(KeywordOccurrence {
                    raw_match: whole.as_str().to_string(),
                    keyword_name: self
                        .delimiters
                        .fold_name(&self.delimiters.unescape(name)),
                    modifier_chain_source: chain.to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }

    /// Split a modifier chain into modifier calls with unescaped parameters
    pub fn modifier_specs(&self, chain_source: &str) -> Vec<ModifierSpec> {
        if chain_source.is_empty() {
            return Vec::new();
        }

        split_unescaped(chain_source, self.delimiters.modifier())
            .into_iter()
            .filter(|source| !source.is_empty())
            .map(|source| {
                let mut parts = split_unescaped(source, self.delimiters.param()).into_iter();
                let name = parts.next().unwrap_or_default();
                let params = parts.map(|part| self.delimiters.unescape(part)).collect();
                ModifierSpec::new(name, params)
            })
            .collect()
    }

    fn build_chain(&self, chain_source: &str) -> TransformChain {
        let mut chain = TransformChain::new();
        for spec in self.modifier_specs(chain_source) {
            let transform = self.registry.resolve(&spec);
            chain.push(spec.name, transform);
        }
        chain
    }
}

/// Split on `separator` wherever it is not preceded by a backslash escape
pub fn split_unescaped(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(&input[start..index]);
            start = index + c.len_utf8();
        }
    }
    parts.push(&input[start..]);
    parts
}
