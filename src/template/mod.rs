// ABOUTME: Keyword template engine: compiler, parser, populator and modifier registry
// ABOUTME: Compile delimiters once, parse each template once, populate many times

pub mod compiler;
pub mod delimiter;
pub mod error;
pub mod modifiers;
pub mod parser;
pub mod populator;
pub mod values;

pub use compiler::{compile, Compiler};
pub use delimiter::{DelimiterConfig, DelimiterSet};
pub use error::{Result, TemplateError};
pub use modifiers::{ModifierRegistry, ModifierSpec, Transform, TransformChain};
pub use parser::{KeywordOccurrence, Parser};
pub use populator::{CompiledKeywordTable, KeywordSlot, Populator};
pub use values::KeywordValues;
