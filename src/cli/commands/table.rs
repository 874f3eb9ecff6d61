use crate::catalog::aggregate::GroupSummary;
use crate::catalog::types::Product;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

const MAX_DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
pub struct ProductRow {
    #[tabled(rename = "Id")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: u32,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            state: product.stock_state().to_string(),
            supplier: product.supplier.clone(),
            description: truncate(&product.description, MAX_DESCRIPTION_WIDTH),
        }
    }
}

#[derive(Tabled)]
pub struct ValueRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Line value")]
    line_value: u64,
}

impl From<&Product> for ValueRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            line_value: product.line_value(),
        }
    }
}

#[derive(Tabled)]
pub struct AlertRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Supplier")]
    supplier: String,
}

impl From<&Product> for AlertRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            stock: product.stock,
            supplier: product.supplier.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct GroupRow {
    #[tabled(rename = "Group")]
    key: String,
    #[tabled(rename = "Products")]
    count: usize,
    #[tabled(rename = "Stock total")]
    stock_total: u64,
    #[tabled(rename = "Mean price")]
    price_mean: String,
    #[tabled(rename = "Value total")]
    value_total: u128,
    #[tabled(rename = "Categories")]
    category_count: String,
}

impl From<&GroupSummary> for GroupRow {
    fn from(group: &GroupSummary) -> Self {
        Self {
            key: group.key.clone(),
            count: group.count,
            stock_total: group.stock_total,
            price_mean: format!("{:.0}", group.price_mean),
            value_total: group.value_total,
            category_count: group
                .category_count
                .map_or_else(|| "-".to_string(), |c| c.to_string()),
        }
    }
}

/// Render rows in the shared table style
pub fn render<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
