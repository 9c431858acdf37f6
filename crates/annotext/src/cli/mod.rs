pub mod models;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use annotext_core::{ModelRegistry, RegistryConfig};
use clap::{Parser, Subcommand};

pub const CONFIG_ENV: &str = "ANNOTEXT_CONFIG";

#[derive(Parser)]
#[command(
    name = "annotext",
    about = "Named-entity extraction and inline annotation for JSON documents",
    version
)]
pub struct Cli {
    /// Model configuration file (defaults to <config dir>/annotext/models.json)
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract entities from JSON documents and write the results to stdout
    Process {
        /// Field holding the text to analyze
        #[arg(short, long)]
        field: String,
        /// Field receiving the entity mapping
        #[arg(short, long, default_value = annotext_core::ingest::DEFAULT_TARGET_FIELD)]
        target_field: String,
        /// Field receiving the annotated text
        #[arg(short, long)]
        annotated_text_field: Option<String>,
        /// Model to run (repeatable; all loaded models if omitted)
        #[arg(short, long = "model")]
        models: Vec<String>,
        /// Treat input as one JSON document per line
        #[arg(long)]
        lines: bool,
        /// Pretty-print output documents
        #[arg(long, conflicts_with = "lines")]
        pretty: bool,
        /// Input file (stdin if omitted)
        input: Option<PathBuf>,
    },
    /// List the models that load from the configuration
    Models,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("annotext").join("models.json"))
}

/// Load the model registry. An explicit configuration must exist; a missing
/// default configuration yields an empty registry.
pub fn load_registry(config: Option<&Path>) -> Result<ModelRegistry> {
    let registry_config = match config {
        Some(path) => RegistryConfig::from_file(path)
            .with_context(|| format!("failed to read model configuration {}", path.display()))?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => RegistryConfig::from_file(&path).with_context(|| {
                format!("failed to read model configuration {}", path.display())
            })?,
            None => {
                tracing::warn!("No model configuration found");
                RegistryConfig::default()
            }
        },
    };

    Ok(ModelRegistry::load(&registry_config))
}
