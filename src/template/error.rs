// ABOUTME: Error types for keyword template compilation and population
// ABOUTME: Defines the two hard failures: bad delimiter configuration and non-mapping values

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid delimiter configuration for {parameter}: {reason}")]
    Configuration {
        parameter: &'static str,
        reason: String,
    },

    #[error("Invalid populate argument: {0}")]
    InvalidArgument(String),
}

impl TemplateError {
    pub(crate) fn configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Name of the offending delimiter parameter, if this is a configuration error
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::Configuration { parameter, .. } => Some(parameter),
            Self::InvalidArgument(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
