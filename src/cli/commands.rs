// ABOUTME: Command implementations for the kwdmod CLI
// ABOUTME: Handles execution of render, keywords, modifiers and check commands

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::args::Args;
use super::config::Config;
use crate::template::{compile, Compiler, KeywordValues, Parser};

/// Render a template file and write the result to a file or stdout
pub async fn render_template(
    template_path: PathBuf,
    vars: Vec<String>,
    values_path: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let rendered = render(&template_path, &vars, values_path.as_deref(), config).await?;

    if let Some(output_path) = output {
        tokio::fs::write(&output_path, &rendered)
            .await
            .with_context(|| format!("Failed to write output file '{}'", output_path.display()))?;
        info!("Rendered template written to: {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Render a template file with merged keyword values
pub async fn render(
    template_path: &Path,
    vars: &[String],
    values_path: Option<&Path>,
    config: &Config,
) -> Result<String> {
    let parser = build_parser(config)?;
    let template = read_template(template_path).await?;

    let mut values = KeywordValues::new();
    values.extend_strings(config.values.clone());
    if let Some(path) = values_path {
        values.extend(load_values_file(path).await?);
    }
    values.extend_strings(Args::parse_variables(vars)?);
    debug!("Rendering with {} keyword values", values.len());

    let populator = parser.parse(&template);
    Ok(populator.populate_values(&values))
}

/// Load keyword values from a JSON or YAML mapping
pub async fn load_values_file(path: &Path) -> Result<KeywordValues> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read values file '{}'", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value: Value = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON in values file '{}'", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid YAML in values file '{}'", path.display()))?
    };

    KeywordValues::from_json(value)
        .with_context(|| format!("Values file '{}' is not a mapping", path.display()))
}

/// Print every keyword occurrence of a template in source order
pub async fn list_keywords(template_path: PathBuf, config: &Config) -> Result<()> {
    let parser = build_parser(config)?;
    let template = read_template(&template_path).await?;

    for line in keyword_lines(&parser, &template) {
        println!("{}", line);
    }
    Ok(())
}

/// Describe each occurrence as its name followed by the modifier chain, if any
pub fn keyword_lines(parser: &Parser, template: &str) -> Vec<String> {
    parser
        .scan(template)
        .into_iter()
        .map(|occurrence| {
            let modifiers: Vec<String> = parser
                .modifier_specs(&occurrence.modifier_chain_source)
                .into_iter()
                .map(|spec| {
                    if spec.params.is_empty() {
                        spec.name
                    } else {
                        format!("{}({})", spec.name, spec.params.join(", "))
                    }
                })
                .collect();

            if modifiers.is_empty() {
                occurrence.keyword_name
            } else {
                format!("{} -> {}", occurrence.keyword_name, modifiers.join(" -> "))
            }
        })
        .collect()
}

/// Print the registered modifier names
pub fn list_modifiers() -> Result<()> {
    let compiler = Compiler::new();
    for name in compiler.registry().names() {
        println!("{}", name);
    }
    Ok(())
}

/// Validate the effective delimiter configuration
pub fn check_config(config: &Config) -> Result<()> {
    let parser = build_parser(config)?;
    let delimiters = parser.delimiters();

    println!("✓ Delimiter configuration is valid");
    println!(
        "  Keyword: {}NAME{}",
        delimiters.start(),
        delimiters.end()
    );
    println!(
        "  Modifier: {}NAME{}modifier{}param{}",
        delimiters.start(),
        delimiters.modifier(),
        delimiters.param(),
        delimiters.end()
    );
    println!("  Case sensitive: {}", delimiters.case_sensitive());
    Ok(())
}

fn build_parser(config: &Config) -> Result<Parser> {
    compile(&config.delimiters).map_err(|e| anyhow!("Invalid delimiter configuration: {}", e))
}

async fn read_template(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template '{}'", path.display()))
}
