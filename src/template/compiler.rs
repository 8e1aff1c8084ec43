// ABOUTME: Compiler stage turning a delimiter configuration into a reusable parser
// ABOUTME: Validates delimiters up front and shares one modifier registry across parsers

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use super::delimiter::{DelimiterConfig, DelimiterSet};
use super::error::{Result, TemplateError};
use super::modifiers::ModifierRegistry;
use super::parser::Parser;

static BUILTIN_REGISTRY: Lazy<Arc<ModifierRegistry>> =
    Lazy::new(|| Arc::new(ModifierRegistry::builtin()));

/// Compile a delimiter configuration using the built-in modifiers
pub fn compile(config: &DelimiterConfig) -> Result<Parser> {
    Compiler::new().compile(config)
}

#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<ModifierRegistry>,
}

impl Compiler {
    /// Create a compiler with the built-in modifier catalogue
    pub fn new() -> Self {
        Self {
            registry: Arc::clone(&BUILTIN_REGISTRY),
        }
    }

    /// Create a compiler resolving modifiers through a custom registry
    pub fn with_registry(registry: ModifierRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    /// Validate the configuration and build a parser for it
    pub fn compile(&self, config: &DelimiterConfig) -> Result<Parser> {
        let delimiters = DelimiterSet::try_from(config)?;
        let pattern = Regex::new(&delimiters.keyword_pattern()).map_err(|e| {
            TemplateError::configuration("kwd_delim", format!("cannot build keyword pattern: {}", e))
        })?;

        debug!(
            "Compiled keyword parser for {}name{}modifier{}param{} (case sensitive: {})",
            delimiters.start(),
            delimiters.modifier(),
            delimiters.param(),
            delimiters.end(),
            delimiters.case_sensitive()
        );

        Ok(Parser::new(delimiters, pattern, Arc::clone(&self.registry)))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::modifiers::map_text;
    use serde_json::json;

    #[test]
    fn test_compile_default_config() {
        let parser = compile(&DelimiterConfig::default()).unwrap();
        assert_eq!(parser.delimiters().start(), '{');
        assert_eq!(parser.delimiters().end(), '}');
    }

    #[test]
    fn test_invalid_config_returns_no_parser() {
        let result = compile(&DelimiterConfig::new("{", ":", ":"));
        assert!(matches!(
            result,
            Err(TemplateError::Configuration {
                parameter: "param_delim",
                ..
            })
        ));
    }

    #[test]
    fn test_parsers_are_independent() {
        let first = compile(&DelimiterConfig::default()).unwrap();
        let second = compile(&DelimiterConfig::default()).unwrap();

        let a = first.parse("{A}");
        let b = second.parse("[{A}]");
        assert_eq!(a.populate(&json!({"A": 1})).unwrap(), "1");
        assert_eq!(b.populate(&json!({"A": 1})).unwrap(), "[1]");
        assert_eq!(a.populate(&json!({"A": 2})).unwrap(), "2");
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = ModifierRegistry::builtin();
        registry.register("shout", |_, _| Some(map_text(|s| format!("{}!", s.to_uppercase()))));
        let compiler = Compiler::with_registry(registry);
        assert!(compiler.registry().contains("shout"));

        let parser = compiler.compile(&DelimiterConfig::default()).unwrap();
        let populator = parser.parse("{MSG^shout}");
        assert_eq!(populator.populate(&json!({"MSG": "hey"})).unwrap(), "HEY!");
    }
}
