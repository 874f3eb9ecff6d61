use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Product identifier as stored in the `id` column
pub type ProductId = u32;

/// Products with stock at or below this level are flagged as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// A single catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, immutable once assigned
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Price in coins
    pub price: u32,
    /// On-hand quantity
    pub stock: u32,
    pub description: String,
    pub supplier: String,
}

impl Product {
    /// Value of the units on hand (`price * stock`)
    pub fn line_value(&self) -> u64 {
        u64::from(self.price) * u64::from(self.stock)
    }

    pub fn stock_state(&self) -> StockState {
        StockState::of(self.stock)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_state() == StockState::Low
    }
}

/// Stock classification against [`LOW_STOCK_THRESHOLD`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockState {
    Low,
    Ok,
}

impl StockState {
    pub fn of(stock: u32) -> Self {
        if stock <= LOW_STOCK_THRESHOLD {
            StockState::Low
        } else {
            StockState::Ok
        }
    }
}

impl fmt::Display for StockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockState::Low => write!(f, "LOW"),
            StockState::Ok => write!(f, "OK"),
        }
    }
}

/// Fields supplied by the caller when adding a product; the id is allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: u32,
    pub stock: u32,
    pub description: String,
    pub supplier: String,
}

impl NewProduct {
    pub(crate) fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description,
            supplier: self.supplier,
        }
    }
}

/// The in-memory product collection, in file row order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// First product with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn contains_id(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> Option<ProductId> {
        self.products.iter().map(|p| p.id).max()
    }

    /// Sorted distinct categories
    pub fn categories(&self) -> Vec<String> {
        self.distinct(|p| &p.category)
    }

    /// Sorted distinct suppliers
    pub fn suppliers(&self) -> Vec<String> {
        self.distinct(|p| &p.supplier)
    }

    pub(crate) fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Product) -> &String,
    {
        self.products
            .iter()
            .map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
