//! Runtime configuration for the xylomyx binary.
//! Reads xylomyx.toml from the current directory or the path in XYLOMYX_CONFIG.
//! Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "xylomyx.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub scoring: ScoringOverrides,
    #[serde(default)]
    pub homology: HomologyConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Built-in preset name
    #[serde(default = "default_profile_name")]
    pub name: String,
    /// YAML or JSON profile; takes precedence over `name`
    pub file: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { name: default_profile_name(), file: None }
    }
}

fn default_profile_name() -> String { "emerald-ash-borer".to_string() }

/// Values that replace the profile's own settings when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringOverrides {
    pub min_confidence: Option<f64>,
    #[serde(default)]
    pub require_gut: bool,
    #[serde(default)]
    pub require_larval: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomologyConfig {
    #[serde(default)]
    pub enabled: bool,
    /// JSON hit table: accession → [hit]
    pub hits_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Reorder the matrix before export; unset keeps confidence order
    pub rank: Option<String>,
    #[serde(default = "default_top_n")]
    pub report_top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            formats: default_formats(),
            rank: None,
            report_top_n: default_top_n(),
        }
    }
}

fn default_output_dir() -> String   { "./results".to_string() }
fn default_formats()    -> Vec<String> { vec!["csv".to_string(), "json".to_string()] }
fn default_top_n()      -> usize    { 20 }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot the candidate store is loaded from and saved to
    pub snapshot: Option<String>,
}


impl Config {
    /// Load configuration from `path`, or from XYLOMYX_CONFIG / ./xylomyx.toml
    /// when `path` is `None`. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("XYLOMYX_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
        };

        if !path.exists() {
            tracing::warn!(
                "Config file not found: {}; using defaults. Copy xylomyx.example.toml to xylomyx.toml to customise.",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Hit table path, only when homology is enabled.
    pub fn homology_hits(&self) -> Option<&str> {
        if self.homology.enabled {
            self.homology.hits_file.as_deref()
        } else {
            None
        }
    }
}
