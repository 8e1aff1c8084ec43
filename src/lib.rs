// ABOUTME: Main library module for the kwdmod keyword template engine
// ABOUTME: Exports the template engine and command line layers and the public API

pub mod cli;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use template::{
    compile, Compiler, DelimiterConfig, KeywordValues, ModifierRegistry, Parser, Populator,
    TemplateError,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
