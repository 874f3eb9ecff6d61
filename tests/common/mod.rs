//! Shared helpers for integration tests

#![allow(dead_code)]

use aurelion::catalog::types::{Catalog, Product, ProductId};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const HEADER: &str = "id,nombre,categoria,precio,stock,descripcion,proveedor";

/// A small catalog in the on-disk format
pub const SAMPLE_CSV: &str = "\
id,nombre,categoria,precio,stock,descripcion,proveedor
1,Espada Larga,Armas,100,5,Acero templado,Forja Norte
2,Pocion de Vida,Pociones,50,30,\"Restaura salud, sabor menta\",Gremio Alquimista
3,Escudo de Roble,Armaduras,2500,12,Madera reforzada,Forja Norte
4,Arco Elfico,Armas,1800,25,Tejo del bosque,Taller Silvano
";

/// Write `content` as the catalog file inside `dir`
pub fn write_catalog_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("tienda_aurelion.csv");
    fs::write(&path, content).unwrap();
    path
}

pub fn product(id: ProductId, category: &str, supplier: &str, price: u32, stock: u32) -> Product {
    Product {
        id,
        name: format!("Producto {id}"),
        category: category.to_string(),
        price,
        stock,
        description: format!("Descripcion {id}"),
        supplier: supplier.to_string(),
    }
}

/// Catalog of the two-product scenario: a low-stock item and a healthy one
pub fn scenario_catalog() -> Catalog {
    Catalog::from_products(vec![
        product(1, "Armas", "Forja", 100, 5),
        product(2, "Pociones", "Gremio", 50, 30),
    ])
}
