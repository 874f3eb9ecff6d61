//! Aurelion inventory core
//!
//! A flat product catalog backed by a CSV file:
//!
//! - [`catalog::store`] - loading, saving and memoizing the catalog file
//! - [`catalog::query`] - composable filters and summary statistics
//! - [`catalog::aggregate`] - per-category/per-supplier groups and extremes
//! - [`catalog::mutation`] - adding products and adjusting stock
//! - [`config`] - configuration file and data file resolution
//! - [`cli`] - the `aurelion` command line

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;

pub use error::{InventoryError, Result};
