pub mod aggregate;
pub mod mutation;
pub mod query;
pub mod store;
pub mod types;

pub use aggregate::{extremum, group_by, max_by_price, min_by_price, Extreme, Field, GroupKey, GroupSummary};
pub use mutation::{MutationService, StockAdjustment, StockOperation};
pub use query::{filter, FilterResult, Overview, ProductFilter, Summary};
pub use store::CatalogStore;
pub use types::{Catalog, NewProduct, Product, ProductId, StockState, LOW_STOCK_THRESHOLD};
