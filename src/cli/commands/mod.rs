pub mod add;
pub mod list;
pub mod overview;
pub mod stats;
pub mod stock;
pub mod table;

use crate::catalog::store::CatalogStore;
use crate::config::types::OutputFormat;
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Catalog CSV file
    pub data_file: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(data_file: PathBuf, format: OutputFormat) -> Self {
        Self { data_file, format }
    }

    /// A fresh store over the data file
    pub fn store(&self) -> CatalogStore {
        CatalogStore::new(&self.data_file)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
