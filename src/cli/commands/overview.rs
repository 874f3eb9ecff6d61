use super::table::{render, AlertRow, ValueRow};
use super::{CommandContext, CommandHandler};
use crate::catalog::query::{self, Overview, PriceTier};
use crate::catalog::types::{Product, LOW_STOCK_THRESHOLD};
use crate::Result;
use serde::Serialize;

/// Handler for the `overview` command
pub struct OverviewCommand {
    pub ctx: CommandContext,
    pub top: usize,
}

#[derive(Serialize)]
struct OverviewReport<'a> {
    overview: Overview,
    price_tiers: Vec<(PriceTier, usize)>,
    top_by_value: Vec<&'a Product>,
    low_stock: Vec<&'a Product>,
}

impl CommandHandler for OverviewCommand {
    fn execute(&self) -> Result<()> {
        let catalog = self.ctx.store().load()?;

        let report = OverviewReport {
            overview: query::overview(&catalog),
            price_tiers: query::price_tiers(&catalog),
            top_by_value: query::top_by_value(&catalog, self.top),
            low_stock: query::low_stock(&catalog),
        };

        if self.ctx.is_json() {
            return self.ctx.print_json(&report);
        }

        let o = &report.overview;
        println!(
            "Products: {} | Stock: {} | Value: {} coins | Categories: {} | Suppliers: {}",
            o.product_count, o.stock_total, o.value_total, o.category_count, o.supplier_count
        );
        println!(
            "Mean stock: {:.1} | Mean price: {:.0} coins | Low stock (<= {}): {}",
            o.stock_mean, o.price_mean, LOW_STOCK_THRESHOLD, o.low_stock_count
        );

        let tiers: Vec<String> = report
            .price_tiers
            .iter()
            .map(|(tier, count)| format!("{}: {}", tier.label(), count))
            .collect();
        println!("Price tiers: {}", tiers.join(", "));

        if !report.top_by_value.is_empty() {
            let rows: Vec<ValueRow> = report.top_by_value.iter().map(|p| ValueRow::from(*p)).collect();
            println!("\nTop {} by value\n{}", self.top, render(&rows));
        }

        if !report.low_stock.is_empty() {
            let rows: Vec<AlertRow> = report.low_stock.iter().map(|p| AlertRow::from(*p)).collect();
            println!("\nLow stock alert\n{}", render(&rows));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "overview"
    }
}

impl OverviewCommand {
    /// Create new overview command
    pub fn new(ctx: CommandContext, top: usize) -> Self {
        Self { ctx, top }
    }
}
