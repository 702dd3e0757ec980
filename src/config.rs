use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::{RelationLabel, ViewFormat};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tunegraph: TunegraphConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// TuneGraph-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TunegraphConfig {
    /// Statement text to build the graph from: a file, or a directory of
    /// `.txt`/`.md` files.
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TunegraphConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            log_level: default_log_level(),
        }
    }
}

/// Relation extraction configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionConfig {
    /// Extra verb phrases, mapped to one of the four relation labels.
    #[serde(default)]
    pub verbs: HashMap<String, String>,
}

/// Recommendation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendConfig {
    /// Run the enhanced (genre-derivation) pass unless asked otherwise
    #[serde(default)]
    pub enhance: bool,
}

/// Layer view configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub format: ViewFormat,
}

fn default_source() -> PathBuf {
    PathBuf::from("texto.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in TUNEGRAPH_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (built-in defaults if absent)
    pub fn load() -> Result<Self> {
        Self::load_with_source(None)
    }

    /// Same as [`Config::load`], with the source path replaced before validation.
    pub fn load_with_source(source: Option<PathBuf>) -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let mut config = match std::env::var("TUNEGRAPH_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    log::debug!("No config.toml found, using defaults");
                    Config::default()
                }
            }
        };

        if let Some(source) = source {
            config.tunegraph.source = source;
        }

        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.tunegraph.source.exists() {
            anyhow::bail!(
                "source path does not exist: {}. Set source in config.toml or pass --source.",
                self.tunegraph.source.display()
            );
        }

        self.tunegraph
            .log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("invalid log_level: {}", self.tunegraph.log_level))?;

        for (phrase, label) in &self.extraction.verbs {
            if !RelationLabel::parse(label).is_recognized() {
                anyhow::bail!(
                    "extraction.verbs: '{}' maps to unknown relation '{}' (expected originate, play, listen or follow)",
                    phrase,
                    label
                );
            }
        }

        Ok(())
    }

    /// Get the statement source path
    pub fn source(&self) -> &Path {
        &self.tunegraph.source
    }

    pub fn log_level(&self) -> &str {
        &self.tunegraph.log_level
    }
}
