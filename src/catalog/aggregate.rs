//! Grouped statistics and extremum lookups over a catalog.

use crate::catalog::query::mean;
use crate::catalog::types::{Catalog, Product};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Field used to partition the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Category,
    Supplier,
}

impl GroupKey {
    fn key_of<'p>(&self, product: &'p Product) -> &'p str {
        match self {
            GroupKey::Category => &product.category,
            GroupKey::Supplier => &product.supplier,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Category => write!(f, "category"),
            GroupKey::Supplier => write!(f, "supplier"),
        }
    }
}

/// Statistics for the products sharing one key value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub stock_total: u64,
    pub price_mean: f64,
    pub value_total: u128,
    /// Distinct categories in the group; only set when grouping by supplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_count: Option<usize>,
}

#[derive(Default)]
struct GroupAccumulator<'p> {
    count: usize,
    stock_total: u64,
    price_total: u64,
    value_total: u128,
    categories: HashSet<&'p str>,
}

/// Partition `catalog` by `key`.
///
/// Groups come back in order of first appearance; callers sort for display.
pub fn group_by(catalog: &Catalog, key: GroupKey) -> Vec<GroupSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, GroupAccumulator> = HashMap::new();

    for product in catalog {
        let value = key.key_of(product);
        let group = groups.entry(value).or_insert_with(|| {
            order.push(value);
            GroupAccumulator::default()
        });

        group.count += 1;
        group.stock_total += u64::from(product.stock);
        group.price_total += u64::from(product.price);
        group.value_total += u128::from(product.line_value());
        group.categories.insert(&product.category);
    }

    order
        .into_iter()
        .filter_map(|value| {
            let group = groups.remove(value)?;
            Some(GroupSummary {
                key: value.to_string(),
                count: group.count,
                stock_total: group.stock_total,
                price_mean: mean(group.price_total, group.count),
                value_total: group.value_total,
                category_count: match key {
                    GroupKey::Supplier => Some(group.categories.len()),
                    GroupKey::Category => None,
                },
            })
        })
        .collect()
}

/// Numeric product field an extremum can be taken over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Stock,
    LineValue,
}

impl Field {
    fn value(&self, product: &Product) -> u64 {
        match self {
            Field::Price => u64::from(product.price),
            Field::Stock => u64::from(product.stock),
            Field::LineValue => product.line_value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Product with the largest or smallest `field`, or `None` for an empty
/// catalog. Ties resolve to the first product in catalog order.
pub fn extremum(catalog: &Catalog, field: Field, extreme: Extreme) -> Option<&Product> {
    let mut best: Option<(&Product, u64)> = None;

    for product in catalog {
        let value = field.value(product);
        let better = match best {
            None => true,
            Some((_, current)) => match extreme {
                Extreme::Max => value > current,
                Extreme::Min => value < current,
            },
        };
        if better {
            best = Some((product, value));
        }
    }

    best.map(|(product, _)| product)
}

pub fn max_by_price(catalog: &Catalog) -> Option<&Product> {
    extremum(catalog, Field::Price, Extreme::Max)
}

pub fn min_by_price(catalog: &Catalog) -> Option<&Product> {
    extremum(catalog, Field::Price, Extreme::Min)
}
