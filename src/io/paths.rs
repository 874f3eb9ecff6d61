use crate::{InventoryError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const PROJECT_CONFIG_FILE: &str = "aurelion.yaml";

/// Data file locations tried, in order, when nothing else names one.
/// They cover running from the program directory, the sprint directory and
/// the repository root.
pub const DATA_FILE_CANDIDATES: [&str; 3] = [
    "../datos/tienda_aurelion.csv",
    "datos/tienda_aurelion.csv",
    "Sprint 1/datos/tienda_aurelion.csv",
];

/// Path management for Aurelion configuration files
#[derive(Debug, Clone)]
pub struct AurelionPaths {
    /// User configuration directory
    pub config_dir: PathBuf,
}

impl AurelionPaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "aurelion").ok_or_else(|| {
            InventoryError::Config("Failed to determine user configuration directory".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
        })
    }

    /// User-wide configuration file
    pub fn user_config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    /// Project configuration file inside `root`
    pub fn project_config_file(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    /// First existing data file candidate under `root`, or the first candidate
    pub fn discover_data_file(root: &Path) -> PathBuf {
        DATA_FILE_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.is_file())
            .unwrap_or_else(|| root.join(DATA_FILE_CANDIDATES[0]))
    }
}
