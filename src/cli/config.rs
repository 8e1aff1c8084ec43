// ABOUTME: Configuration management for the kwdmod application
// ABOUTME: Loads delimiter, default value and logging settings from YAML and environment variables

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::args::DelimiterArgs;
use crate::template::DelimiterConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delimiters: DelimiterConfig,

    /// Keyword values applied before any values file or command-line variables
    #[serde(default)]
    pub values: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("kwdmod.yaml"),
            PathBuf::from("kwdmod.yml"),
            PathBuf::from(".kwdmod.yaml"),
            PathBuf::from(".kwdmod.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".kwdmod").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("kwdmod.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    /// Merge overrides from a variable lookup
    pub fn merge_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kwd_delim) = lookup("KWDMOD_KWD_DELIM") {
            self.delimiters.kwd_delim = kwd_delim;
        }
        if let Some(mod_delim) = lookup("KWDMOD_MOD_DELIM") {
            self.delimiters.mod_delim = mod_delim;
        }
        if let Some(param_delim) = lookup("KWDMOD_PARAM_DELIM") {
            self.delimiters.param_delim = param_delim;
        }
        if let Some(case_sensitive) = lookup("KWDMOD_CASE_SENSITIVE") {
            self.delimiters.case_sensitive = parse_flag("KWDMOD_CASE_SENSITIVE", &case_sensitive)?;
        }

        if let Some(level) = lookup("KWDMOD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("KWDMOD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Apply command-line delimiter overrides
    pub fn apply_delimiter_args(&mut self, args: &DelimiterArgs) {
        if let Some(kwd_delim) = &args.kwd_delim {
            self.delimiters.kwd_delim = kwd_delim.clone();
        }
        if let Some(mod_delim) = &args.mod_delim {
            self.delimiters.mod_delim = mod_delim.clone();
        }
        if let Some(param_delim) = &args.param_delim {
            self.delimiters.param_delim = param_delim.clone();
        }
        if args.case_sensitive {
            self.delimiters.case_sensitive = true;
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("Invalid boolean '{}' for {}", other, name)),
    }
}
