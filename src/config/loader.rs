use super::types::AurelionConfig;
use crate::io::AurelionPaths;
use crate::{InventoryError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the data file location
pub const DATA_FILE_ENV: &str = "AURELION_DATA_FILE";

/// A configuration together with the file it came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AurelionConfig,
    /// `None` when defaults are in use
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// `data_file` from the config, resolved against the config's directory
    pub fn data_file(&self) -> Option<PathBuf> {
        let data_file = self.config.data_file.as_ref()?;
        if data_file.is_absolute() {
            return Some(data_file.clone());
        }

        let base = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        Some(base.join(data_file))
    }
}

/// Configuration loader for `aurelion.yaml`
pub struct ConfigLoader {
    /// Directory searched for the project config and data file candidates
    root: PathBuf,
    /// User-wide config file, if the platform has a config directory
    user_config: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader rooted at `root` using the platform config directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            user_config: AurelionPaths::new().ok().map(|p| p.user_config_file()),
        }
    }

    /// Create a loader rooted at the current working directory
    pub fn new_in_current_dir() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Ok(Self::new(current_dir))
    }

    /// Override the user-wide config location
    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config = path;
        self
    }

    /// Load configuration from a specific file
    pub fn load_from_path(&self, path: &Path) -> Result<LoadedConfig> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InventoryError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: AurelionConfig = serde_yaml_ng::from_str(&contents).map_err(|e| {
            InventoryError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// Load the explicit config if given, else the project config, else the
    /// user config, else defaults. An explicit path must exist.
    pub fn load(&self, explicit: Option<&Path>) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            return self.load_from_path(path);
        }

        let project_config = AurelionPaths::project_config_file(&self.root);
        if project_config.is_file() {
            return self.load_from_path(&project_config);
        }

        if let Some(user_config) = self.user_config.as_deref() {
            if user_config.is_file() {
                return self.load_from_path(user_config);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(LoadedConfig::default())
    }

    /// Pick the data file: command-line override, then `AURELION_DATA_FILE`,
    /// then the config, then discovery under the root.
    pub fn resolve_data_file(&self, cli_override: Option<&Path>, loaded: &LoadedConfig) -> PathBuf {
        let env_override = std::env::var_os(DATA_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_data_file_with(cli_override, env_override, loaded)
    }

    fn resolve_data_file_with(
        &self,
        cli_override: Option<&Path>,
        env_override: Option<PathBuf>,
        loaded: &LoadedConfig,
    ) -> PathBuf {
        let resolved = cli_override
            .map(Path::to_path_buf)
            .or(env_override)
            .or_else(|| loaded.data_file())
            .unwrap_or_else(|| AurelionPaths::discover_data_file(&self.root));

        debug!(path = %resolved.display(), "Resolved data file");
        resolved
    }
}
