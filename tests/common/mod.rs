// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides parser construction and temporary template fixtures

#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use kwdmod::{compile, DelimiterConfig, Parser};

/// Parser for the default `{KEY^modifier:param}` syntax
pub fn default_parser() -> Parser {
    compile(&DelimiterConfig::default()).expect("default delimiters are valid")
}

/// Parse and populate in one step with the default delimiters
pub fn render(template: &str, values: &Value) -> String {
    default_parser()
        .parse(template)
        .populate(values)
        .expect("values are a mapping")
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub async fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents)
            .await
            .expect("Failed to write fixture");
        path
    }

    pub async fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name))
            .await
            .expect("Failed to read file")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
