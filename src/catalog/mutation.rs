use crate::catalog::store::CatalogStore;
use crate::catalog::types::{Catalog, NewProduct, ProductId, StockState};
use crate::{InventoryError, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Id given to the first product of an empty catalog
pub const FIRST_PRODUCT_ID: ProductId = 1;

/// A stock change applied to one product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", content = "amount", rename_all = "lowercase")]
pub enum StockOperation {
    /// Goods received; amount must be positive
    Receive(u32),
    /// Goods sold; amount must be positive and not exceed the stock
    Sell(u32),
    /// Overwrite the stock level
    Set(u32),
}

impl StockOperation {
    fn apply(&self, id: ProductId, stock: u32) -> Result<u32> {
        match *self {
            StockOperation::Receive(0) | StockOperation::Sell(0) => Err(
                InventoryError::Validation("Amount must be greater than zero".to_string()),
            ),
            StockOperation::Receive(amount) => stock.checked_add(amount).ok_or_else(|| {
                InventoryError::Validation(format!(
                    "Receiving {} units would overflow the stock of product {}",
                    amount, id
                ))
            }),
            StockOperation::Sell(amount) if amount > stock => {
                Err(InventoryError::InsufficientStock {
                    id,
                    requested: amount,
                    available: stock,
                })
            }
            StockOperation::Sell(amount) => Ok(stock - amount),
            StockOperation::Set(amount) => Ok(amount),
        }
    }
}

/// Outcome of a committed stock change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    /// The catalog as persisted
    pub catalog: Catalog,
    pub id: ProductId,
    pub previous_stock: u32,
    pub new_stock: u32,
    /// Set when the new stock is at or below the low-stock threshold
    pub low_stock: bool,
}

/// Read-modify-write operations committed through a [`CatalogStore`].
///
/// The input catalog is never touched: each operation works on a copy and
/// returns it only after the save succeeded.
pub struct MutationService<'s> {
    store: &'s mut CatalogStore,
}

impl<'s> MutationService<'s> {
    pub fn new(store: &'s mut CatalogStore) -> Self {
        Self { store }
    }

    /// Append a product with the next free id and persist the catalog
    pub fn add_product(
        &mut self,
        catalog: &Catalog,
        fields: NewProduct,
    ) -> Result<(Catalog, ProductId)> {
        validate_new_product(&fields)?;

        let new_id = match catalog.max_id() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                InventoryError::Validation("Product id space exhausted".to_string())
            })?,
            None => FIRST_PRODUCT_ID,
        };

        let mut updated = catalog.clone();
        let name = fields.name.clone();
        updated.push(fields.into_product(new_id));

        self.store.save(&updated)?;
        info!(id = new_id, name = %name, "Product added");

        Ok((updated, new_id))
    }

    /// Apply `operation` to the stock of product `id` and persist the catalog
    pub fn adjust_stock(
        &mut self,
        catalog: &Catalog,
        id: ProductId,
        operation: StockOperation,
    ) -> Result<StockAdjustment> {
        let mut updated = catalog.clone();
        let product = updated
            .get_mut(id)
            .ok_or(InventoryError::ProductNotFound(id))?;

        let previous_stock = product.stock;
        let new_stock = operation.apply(id, previous_stock)?;
        product.stock = new_stock;

        self.store.save(&updated)?;
        info!(id, previous_stock, new_stock, ?operation, "Stock adjusted");

        let low_stock = StockState::of(new_stock) == StockState::Low;
        if low_stock {
            warn!(id, stock = new_stock, "Stock is low, consider restocking");
        }

        Ok(StockAdjustment {
            catalog: updated,
            id,
            previous_stock,
            new_stock,
            low_stock,
        })
    }
}

fn validate_new_product(fields: &NewProduct) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(InventoryError::Validation("Name is required".to_string()));
    }
    if fields.description.trim().is_empty() {
        return Err(InventoryError::Validation(
            "Description is required".to_string(),
        ));
    }
    if fields.price == 0 {
        return Err(InventoryError::Validation(
            "Price must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Product;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (CatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tienda.csv");
        fs::write(
            &path,
            "id,nombre,categoria,precio,stock,descripcion,proveedor\n\
             1,Espada,Armas,100,5,Filo,Forja\n\
             2,Pocion,Pociones,50,30,Cura,Gremio\n",
        )
        .unwrap();
        (CatalogStore::new(path), temp_dir)
    }

    fn new_product(name: &str, description: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Armas".to_string(),
            price: 100,
            stock: 10,
            description: description.to_string(),
            supplier: "Forja".to_string(),
        }
    }

    #[test]
    fn test_stock_operation_apply() {
        assert_eq!(StockOperation::Receive(10).apply(1, 30).unwrap(), 40);
        assert_eq!(StockOperation::Sell(5).apply(1, 5).unwrap(), 0);
        assert_eq!(StockOperation::Set(0).apply(1, 5).unwrap(), 0);
        assert!(matches!(
            StockOperation::Sell(6).apply(1, 5),
            Err(InventoryError::InsufficientStock {
                id: 1,
                requested: 6,
                available: 5
            })
        ));
        assert!(matches!(
            StockOperation::Receive(0).apply(1, 5),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            StockOperation::Receive(1).apply(1, u32::MAX),
            Err(InventoryError::Validation(_))
        ));
    }

    #[test]
    fn test_add_product_assigns_next_id_and_persists() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let (updated, id) = MutationService::new(&mut store)
            .add_product(&catalog, new_product("Arco", "Tejo"))
            .unwrap();

        assert_eq!(id, 3);
        assert_eq!(updated.len(), 3);
        assert_eq!(catalog.len(), 2);
        assert!(!store.is_cached());
        assert_eq!(store.load().unwrap(), updated);
    }

    #[test]
    fn test_add_product_to_empty_catalog_starts_at_one() {
        let (mut store, _temp_dir) = create_test_store();

        let (updated, id) = MutationService::new(&mut store)
            .add_product(&Catalog::new(), new_product("Arco", "Tejo"))
            .unwrap();

        assert_eq!(id, FIRST_PRODUCT_ID);
        assert_eq!(updated.products()[0].id, 1);
    }

    #[test]
    fn test_add_product_requires_name_and_description() {
        let (mut store, temp_dir) = create_test_store();
        let catalog = store.load().unwrap();
        let before = fs::read_to_string(temp_dir.path().join("tienda.csv")).unwrap();

        let mut service = MutationService::new(&mut store);
        for fields in [new_product("", "x"), new_product("Arco", "  ")] {
            let err = service.add_product(&catalog, fields).unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
        }

        let mut free = new_product("Arco", "Tejo");
        free.price = 0;
        assert!(matches!(
            service.add_product(&catalog, free),
            Err(InventoryError::Validation(_))
        ));

        let after = fs::read_to_string(temp_dir.path().join("tienda.csv")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_receive_without_warning() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let adjustment = MutationService::new(&mut store)
            .adjust_stock(&catalog, 2, StockOperation::Receive(10))
            .unwrap();

        assert_eq!(adjustment.previous_stock, 30);
        assert_eq!(adjustment.new_stock, 40);
        assert!(!adjustment.low_stock);
        assert_eq!(adjustment.catalog.get(2).map(|p| p.stock), Some(40));
        assert_eq!(store.load().unwrap().get(2).map(|p| p.stock), Some(40));
    }

    #[test]
    fn test_sell_more_than_stock_fails() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let err = MutationService::new(&mut store)
            .adjust_stock(&catalog, 1, StockOperation::Sell(10))
            .unwrap_err();

        assert!(matches!(err, InventoryError::InsufficientStock { .. }));
        assert_eq!(catalog.get(1).map(|p| p.stock), Some(5));
        assert_eq!(store.load().unwrap().get(1).map(|p| p.stock), Some(5));
    }

    #[test]
    fn test_set_flags_low_stock() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let adjustment = MutationService::new(&mut store)
            .adjust_stock(&catalog, 2, StockOperation::Set(20))
            .unwrap();

        assert_eq!(adjustment.new_stock, 20);
        assert!(adjustment.low_stock);
    }

    #[test]
    fn test_adjust_unknown_product() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let err = MutationService::new(&mut store)
            .adjust_stock(&catalog, 99, StockOperation::Set(1))
            .unwrap_err();

        assert!(matches!(err, InventoryError::ProductNotFound(99)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_adjust_keeps_other_fields() {
        let (mut store, _temp_dir) = create_test_store();
        let catalog = store.load().unwrap();

        let adjustment = MutationService::new(&mut store)
            .adjust_stock(&catalog, 1, StockOperation::Sell(2))
            .unwrap();

        let expected = Product {
            stock: 3,
            ..catalog.get(1).unwrap().clone()
        };
        assert_eq!(adjustment.catalog.get(1), Some(&expected));
        assert_eq!(adjustment.catalog.get(2), catalog.get(2));
    }
}
