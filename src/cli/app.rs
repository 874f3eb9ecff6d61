use crate::catalog::aggregate::GroupKey;
use crate::catalog::mutation::StockOperation;
use crate::catalog::types::StockState;
use crate::config::types::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Aurelion: inventory record-keeper for the shop catalog
#[derive(Parser, Debug)]
#[command(name = "aurelion")]
#[command(version)]
#[command(about = "Inventory record-keeper for the Aurelion shop catalog")]
#[command(
    long_about = "Aurelion keeps the shop's product catalog in a CSV file, answers filtered and grouped queries over it, and records stock receipts, sales and corrections."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog CSV file (overrides AURELION_DATA_FILE and the config file)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Configuration file (default: ./aurelion.yaml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format (defaults to the configured one, else text)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inventory metrics, most valuable products and low-stock alerts
    Overview {
        /// Number of products in the most-valuable list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// List products matching the given filters
    List {
        /// Exact category ("Todas" for all)
        #[arg(long)]
        category: Option<String>,

        /// Exact supplier ("Todos" for all)
        #[arg(long)]
        supplier: Option<String>,

        /// Lowest price to include
        #[arg(long)]
        min_price: Option<u32>,

        /// Highest price to include
        #[arg(long)]
        max_price: Option<u32>,

        /// Stock state to include
        #[arg(long, value_enum)]
        stock: Option<StockStateArg>,

        /// Case-insensitive part of the product name
        #[arg(long)]
        name: Option<String>,
    },

    /// Statistics grouped by category or supplier
    Stats {
        /// Grouping key
        #[arg(long, value_enum, default_value = "category")]
        by: GroupKeyArg,
    },

    /// Add a new product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Category
        #[arg(long)]
        category: String,

        /// Price in coins
        #[arg(long, default_value_t = 100)]
        price: u32,

        /// Initial stock
        #[arg(long, default_value_t = 10)]
        stock: u32,

        /// Supplier
        #[arg(long)]
        supplier: String,

        /// Description
        #[arg(long)]
        description: String,
    },

    /// Receive, sell or set the stock of a product
    Stock {
        /// Product id, or the product's exact name
        product: String,

        /// Operation to apply
        #[arg(value_enum)]
        action: StockAction,

        /// Units received or sold, or the new stock level
        amount: u32,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Overview { .. } => "overview",
            Commands::List { .. } => "list",
            Commands::Stats { .. } => "stats",
            Commands::Add { .. } => "add",
            Commands::Stock { .. } => "stock",
        }
    }

    /// Check if this command rewrites the catalog file
    pub fn modifies_files(&self) -> bool {
        matches!(self, Commands::Add { .. } | Commands::Stock { .. })
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StockStateArg {
    /// Stock at or below the low-stock threshold
    Low,
    /// Stock above the threshold
    Ok,
}

impl From<StockStateArg> for StockState {
    fn from(arg: StockStateArg) -> Self {
        match arg {
            StockStateArg::Low => StockState::Low,
            StockStateArg::Ok => StockState::Ok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupKeyArg {
    Category,
    Supplier,
}

impl From<GroupKeyArg> for GroupKey {
    fn from(arg: GroupKeyArg) -> Self {
        match arg {
            GroupKeyArg::Category => GroupKey::Category,
            GroupKeyArg::Supplier => GroupKey::Supplier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StockAction {
    /// Add received units
    Receive,
    /// Remove sold units
    Sell,
    /// Overwrite the stock level
    Set,
}

impl StockAction {
    pub fn with_amount(self, amount: u32) -> StockOperation {
        match self {
            StockAction::Receive => StockOperation::Receive(amount),
            StockAction::Sell => StockOperation::Sell(amount),
            StockAction::Set => StockOperation::Set(amount),
        }
    }
}
