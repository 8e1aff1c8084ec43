// ABOUTME: CLI module for the kwdmod template renderer
// ABOUTME: Exports command line interface components and main application logic

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::{Args, Commands, DelimiterArgs};
pub use config::{Config, LoggingConfig};
