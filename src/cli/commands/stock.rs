use super::{CommandContext, CommandHandler};
use crate::catalog::mutation::{MutationService, StockOperation};
use crate::catalog::types::{Catalog, ProductId};
use crate::{InventoryError, Result};
use serde::Serialize;

/// Handler for the `stock` command
pub struct StockCommand {
    pub ctx: CommandContext,
    /// Product id, or an exact product name
    pub product: String,
    pub operation: StockOperation,
}

#[derive(Serialize)]
struct StockReport<'a> {
    id: ProductId,
    name: &'a str,
    #[serde(flatten)]
    operation: StockOperation,
    previous_stock: u32,
    new_stock: u32,
    low_stock: bool,
}

/// Numeric references are ids; anything else must match a name exactly
fn resolve_product(catalog: &Catalog, product: &str) -> Result<ProductId> {
    if let Ok(id) = product.trim().parse::<ProductId>() {
        return Ok(id);
    }

    catalog
        .find_by_name(product)
        .map(|p| p.id)
        .ok_or_else(|| InventoryError::ProductNameNotFound(product.to_string()))
}

impl CommandHandler for StockCommand {
    fn execute(&self) -> Result<()> {
        let mut store = self.ctx.store();
        let catalog = store.load()?;
        let id = resolve_product(&catalog, &self.product)?;

        let adjustment =
            MutationService::new(&mut store).adjust_stock(&catalog, id, self.operation)?;
        let name = adjustment
            .catalog
            .get(id)
            .map(|p| p.name.as_str())
            .unwrap_or_default();

        if self.ctx.is_json() {
            return self.ctx.print_json(&StockReport {
                id,
                name,
                operation: self.operation,
                previous_stock: adjustment.previous_stock,
                new_stock: adjustment.new_stock,
                low_stock: adjustment.low_stock,
            });
        }

        let summary = match self.operation {
            StockOperation::Receive(amount) => format!("Received {} units", amount),
            StockOperation::Sell(amount) => format!("Sold {} units", amount),
            StockOperation::Set(amount) => format!("Stock set to {} units", amount),
        };
        println!(
            "{} of '{}' (id {}). New stock: {} units (was {})",
            summary, name, id, adjustment.new_stock, adjustment.previous_stock
        );
        if adjustment.low_stock {
            println!("Warning: low stock, consider restocking.");
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stock"
    }
}

impl StockCommand {
    /// Create new stock command
    pub fn new(ctx: CommandContext, product: String, operation: StockOperation) -> Self {
        Self {
            ctx,
            product,
            operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Product;
    use pretty_assertions::assert_eq;

    fn create_test_catalog() -> Catalog {
        let product = |id: ProductId, name: &str| Product {
            id,
            name: name.to_string(),
            category: "Armas".to_string(),
            price: 100,
            stock: 30,
            description: "test".to_string(),
            supplier: "Forja".to_string(),
        };
        Catalog::from_products(vec![product(1, "Espada Larga"), product(2, "Arco Elfico")])
    }

    #[test]
    fn test_resolve_product_by_id_or_name() {
        let catalog = create_test_catalog();

        assert_eq!(resolve_product(&catalog, "2").unwrap(), 2);
        assert_eq!(resolve_product(&catalog, "Espada Larga").unwrap(), 1);
        // Ids are passed through; the mutation reports unknown ones
        assert_eq!(resolve_product(&catalog, "99").unwrap(), 99);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = resolve_product(&create_test_catalog(), "espada larga").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("espada larga"));
    }

    #[test]
    fn test_report_flattens_operation() {
        let report = StockReport {
            id: 1,
            name: "Espada Larga",
            operation: StockOperation::Sell(4),
            previous_stock: 30,
            new_stock: 26,
            low_stock: false,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["operation"], "sell");
        assert_eq!(json["amount"], 4);
        assert_eq!(json["new_stock"], 26);
    }
}
