// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure, delimiter overrides and subcommands for kwdmod

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kwdmod")]
#[command(about = "Render keyword templates with chained value modifiers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

/// Delimiter overrides; each one wins over the configuration file and environment
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DelimiterArgs {
    #[arg(long, global = true, help = "Keyword delimiter (a bracket mirrors to its pair)")]
    pub kwd_delim: Option<String>,

    #[arg(long, global = true, help = "Modifier delimiter")]
    pub mod_delim: Option<String>,

    #[arg(long, global = true, help = "Modifier parameter delimiter")]
    pub param_delim: Option<String>,

    #[arg(long, global = true, help = "Match keyword names case sensitively")]
    pub case_sensitive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Populate a template file with keyword values
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(short = 'V', long = "var", help = "Keyword value (KEY=VALUE)")]
        vars: Vec<String>,

        #[arg(long, help = "JSON or YAML file holding a mapping of keyword values")]
        values: Option<PathBuf>,

        #[arg(short, long, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// List the keyword occurrences found in a template file
    Keywords {
        #[arg(help = "Path to the template file")]
        template: PathBuf,
    },

    /// List the registered modifier names
    Modifiers,

    /// Validate the effective delimiter configuration
    Check,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from KEY=VALUE format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'KEY=VALUE'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
