use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How command results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Machine-readable JSON on stdout
    Json,
}

/// Contents of `aurelion.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AurelionConfig {
    /// Backing CSV file; relative paths are resolved against the config file
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Default output format
    #[serde(default)]
    pub output: OutputFormat,
}
