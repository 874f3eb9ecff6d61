use crate::catalog::types::{Catalog, Product, StockState};
use serde::Serialize;
use std::collections::HashSet;

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "Todas";
/// Supplier value meaning "no supplier filter"
pub const ALL_SUPPLIERS: &str = "Todos";

/// Composable product filter; every set option must match (logical AND)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact, case-sensitive category
    pub category: Option<String>,
    /// Exact supplier
    pub supplier: Option<String>,
    /// Inclusive price bounds; `None` keeps the whole catalog range
    pub price_range: Option<(u32, u32)>,
    pub stock_state: Option<StockState>,
    /// Case-insensitive substring of the product name
    pub name_contains: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn price_range(mut self, min: u32, max: u32) -> Self {
        self.price_range = Some((min, max));
        self
    }

    pub fn stock_state(mut self, state: StockState) -> Self {
        self.stock_state = Some(state);
        self
    }

    pub fn name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    fn matches_with(&self, product: &Product, needle: &Option<String>) -> bool {
        if let Some(category) = active(&self.category, ALL_CATEGORIES) {
            if product.category != category {
                return false;
            }
        }

        if let Some(supplier) = active(&self.supplier, ALL_SUPPLIERS) {
            if product.supplier != supplier {
                return false;
            }
        }

        if let Some((min, max)) = self.price_range {
            if product.price < min || product.price > max {
                return false;
            }
        }

        if let Some(state) = self.stock_state {
            if product.stock_state() != state {
                return false;
            }
        }

        if let Some(needle) = needle {
            if !product.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        true
    }

    fn normalized_needle(&self) -> Option<String> {
        self.name_contains
            .as_deref()
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
    }
}

/// Treat `None` and the "all" sentinel as no filter
fn active<'f>(value: &'f Option<String>, all: &str) -> Option<&'f str> {
    value.as_deref().filter(|v| *v != all)
}

/// Totals over a set of products
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub stock_total: u64,
    /// Held in `u128`; a single line value can already use most of a `u64`
    pub value_total: u128,
    /// Mean price; 0 when there are no products
    pub price_mean: f64,
}

impl Summary {
    pub fn of<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut summary = Summary::default();
        let mut price_total: u64 = 0;

        for product in products {
            summary.count += 1;
            summary.stock_total += u64::from(product.stock);
            summary.value_total += u128::from(product.line_value());
            price_total += u64::from(product.price);
        }

        summary.price_mean = mean(price_total, summary.count);
        summary
    }
}

pub(crate) fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Products matching a filter, in catalog order, plus their totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult<'a> {
    pub products: Vec<&'a Product>,
    pub summary: Summary,
}

/// Apply `filter` to `catalog`
pub fn filter<'a>(catalog: &'a Catalog, filter: &ProductFilter) -> FilterResult<'a> {
    let needle = filter.normalized_needle();
    let products: Vec<&Product> = catalog
        .iter()
        .filter(|product| filter.matches_with(product, &needle))
        .collect();
    let summary = Summary::of(products.iter().copied());

    FilterResult { products, summary }
}

/// Whole-catalog metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub product_count: usize,
    pub stock_total: u64,
    pub value_total: u128,
    pub category_count: usize,
    pub supplier_count: usize,
    pub low_stock_count: usize,
    pub stock_mean: f64,
    pub price_mean: f64,
}

pub fn overview(catalog: &Catalog) -> Overview {
    let summary = Summary::of(catalog);
    let categories: HashSet<&str> = catalog.iter().map(|p| p.category.as_str()).collect();
    let suppliers: HashSet<&str> = catalog.iter().map(|p| p.supplier.as_str()).collect();

    Overview {
        product_count: summary.count,
        stock_total: summary.stock_total,
        value_total: summary.value_total,
        category_count: categories.len(),
        supplier_count: suppliers.len(),
        low_stock_count: catalog.iter().filter(|p| p.is_low_stock()).count(),
        stock_mean: mean(summary.stock_total, summary.count),
        price_mean: summary.price_mean,
    }
}

/// The `n` products with the highest line value; ties keep catalog order
pub fn top_by_value(catalog: &Catalog, n: usize) -> Vec<&Product> {
    let mut products: Vec<&Product> = catalog.iter().collect();
    // Stable sort keeps catalog order among equal values
    products.sort_by(|a, b| b.line_value().cmp(&a.line_value()));
    products.truncate(n);
    products
}

/// Low-stock products, lowest stock first; ties keep catalog order
pub fn low_stock(catalog: &Catalog) -> Vec<&Product> {
    let mut products: Vec<&Product> = catalog.iter().filter(|p| p.is_low_stock()).collect();
    products.sort_by_key(|p| p.stock);
    products
}

/// Price bands used for the distribution report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// (0, 500]
    Budget,
    /// (500, 2000]
    Mid,
    /// (2000, 10000]
    Premium,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Budget, PriceTier::Mid, PriceTier::Premium];

    /// Tier for a price; prices of 0 or above 10000 fall in no tier
    pub fn of(price: u32) -> Option<Self> {
        match price {
            1..=500 => Some(PriceTier::Budget),
            501..=2000 => Some(PriceTier::Mid),
            2001..=10000 => Some(PriceTier::Premium),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Budget => "Budget (<500)",
            PriceTier::Mid => "Mid (500-2000)",
            PriceTier::Premium => "Premium (>2000)",
        }
    }
}

/// Product count per price tier, in [`PriceTier::ALL`] order
pub fn price_tiers(catalog: &Catalog) -> Vec<(PriceTier, usize)> {
    PriceTier::ALL
        .iter()
        .map(|tier| {
            let count = catalog
                .iter()
                .filter(|p| PriceTier::of(p.price) == Some(*tier))
                .count();
            (*tier, count)
        })
        .collect()
}
