pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, LoadedConfig, DATA_FILE_ENV};
pub use types::{AurelionConfig, OutputFormat};
