use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::types::ProductId;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    #[error("Product not found: id {0}")]
    ProductNotFound(ProductId),

    #[error("Product not found: no product named '{0}'")]
    ProductNameNotFound(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Type error in row {row}, column '{column}': cannot convert '{value}' to a whole number")]
    Type {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock for product {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl InventoryError {
    /// True for a missing data file or a missing product
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            InventoryError::DataFileNotFound(_)
                | InventoryError::ProductNotFound(_)
                | InventoryError::ProductNameNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
