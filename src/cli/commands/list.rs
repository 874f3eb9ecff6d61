use super::table::{render, ProductRow};
use super::{CommandContext, CommandHandler};
use crate::catalog::query::{self, ProductFilter};
use crate::catalog::types::StockState;
use crate::{InventoryError, Result};

/// Handler for the `list` command
pub struct ListCommand {
    pub ctx: CommandContext,
    pub filter: ProductFilter,
}

impl CommandHandler for ListCommand {
    fn execute(&self) -> Result<()> {
        let catalog = self.ctx.store().load()?;
        let result = query::filter(&catalog, &self.filter);

        if self.ctx.is_json() {
            return self.ctx.print_json(&result);
        }

        println!("Results: {} product(s)", result.summary.count);
        if result.products.is_empty() {
            println!("No products match the selected filters.");
            return Ok(());
        }

        let rows: Vec<ProductRow> = result.products.iter().map(|p| ProductRow::from(*p)).collect();
        println!("{}", render(&rows));
        println!(
            "Stock total: {} | Value total: {} coins | Mean price: {:.0} coins",
            result.summary.stock_total, result.summary.value_total, result.summary.price_mean
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    /// Create new list command from the command-line filter options
    pub fn new(
        ctx: CommandContext,
        category: Option<String>,
        supplier: Option<String>,
        min_price: Option<u32>,
        max_price: Option<u32>,
        stock: Option<StockState>,
        name: Option<String>,
    ) -> Result<Self> {
        let price_range = match (min_price, max_price) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(0);
                let max = max.unwrap_or(u32::MAX);
                if min > max {
                    return Err(InventoryError::Validation(format!(
                        "Minimum price {} is above maximum price {}",
                        min, max
                    )));
                }
                Some((min, max))
            }
        };

        let filter = ProductFilter {
            category,
            supplier,
            price_range,
            stock_state: stock,
            name_contains: name,
        };

        Ok(Self { ctx, filter })
    }
}
