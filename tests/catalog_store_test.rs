//! Persistence tests for the catalog file
//!
//! Covers the load/save round trip, the load memo, and the guarantee that a
//! failed write never damages the existing file.

mod common;

use aurelion::catalog::store::{read_catalog, write_catalog, CatalogStore};
use aurelion::catalog::types::Catalog;
use aurelion::InventoryError;
use common::{init_test_logging, product, write_catalog_file, HEADER, SAMPLE_CSV};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_round_trip_preserves_file_content() {
    init_test_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog_file(temp_dir.path(), SAMPLE_CSV);

    let mut store = CatalogStore::new(&path);
    let catalog = store.load().unwrap();
    store.save(&catalog).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_CSV);
}

#[test]
fn test_round_trip_of_header_only_file() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!("{HEADER}\n");
    let path = write_catalog_file(temp_dir.path(), &content);

    let mut store = CatalogStore::new(&path);
    let catalog = store.load().unwrap();
    assert!(catalog.is_empty());

    store.save(&catalog).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_saved_catalog_reloads_equal() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nuevo.csv");

    let mut catalog = Catalog::from_products(vec![
        product(10, "Armas", "Forja, Norte", 100, 5),
        product(3, "Pociones", "Gremio \"Azul\"", 50, 0),
    ]);
    let mut store = CatalogStore::new(&path);
    store.save(&catalog).unwrap();

    assert_eq!(store.load().unwrap(), catalog);

    // Row order is file order, not id order
    catalog = store.load().unwrap();
    let ids: Vec<u32> = catalog.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 3]);
}

#[test]
fn test_text_quoted_only_when_needed() {
    let catalog = Catalog::from_products(vec![product(1, "Armas", "Forja, Norte", 100, 5)]);

    let mut buffer = Vec::new();
    write_catalog(&mut buffer, &catalog).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(
        text,
        format!("{HEADER}\n1,Producto 1,Armas,100,5,Descripcion 1,\"Forja, Norte\"\n")
    );
}

#[test]
fn test_read_catalog_from_memory() {
    let catalog = read_catalog(SAMPLE_CSV.as_bytes()).unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(
        catalog.get(2).map(|p| p.description.as_str()),
        Some("Restaura salud, sabor menta")
    );
}

#[test]
fn test_empty_file_is_a_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog_file(temp_dir.path(), "");

    let err = CatalogStore::new(&path).load().unwrap_err();
    assert!(matches!(err, InventoryError::Format(_)));
}

#[test]
fn test_unknown_column_is_a_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog_file(
        temp_dir.path(),
        &format!("{HEADER},color\n1,A,B,10,1,x,y,rojo\n"),
    );

    let err = CatalogStore::new(&path).load().unwrap_err();
    assert!(matches!(err, InventoryError::Format(ref msg) if msg.contains("color")));
}

#[test]
fn test_invalid_utf8_is_a_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tienda_aurelion.csv");
    let mut bytes = format!("{HEADER}\n1,").into_bytes();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b",B,10,1,x,y\n");
    fs::write(&path, bytes).unwrap();

    let err = CatalogStore::new(&path).load().unwrap_err();
    assert!(matches!(err, InventoryError::Format(_)));
}

#[test]
fn test_type_error_names_row_and_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog_file(
        temp_dir.path(),
        &format!("{HEADER}\n1,A,B,10,1,x,y\n2,C,D,diez,1,x,y\n"),
    );

    let err = CatalogStore::new(&path).load().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("row 2"), "{message}");
    assert!(message.contains("precio"), "{message}");
    assert!(message.contains("diez"), "{message}");
}

#[test]
fn test_save_into_missing_directory_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("tienda.csv");

    let mut store = CatalogStore::new(&path);
    let err = store.save(&Catalog::new()).unwrap_err();

    assert!(matches!(err, InventoryError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn test_memo_serves_until_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_catalog_file(temp_dir.path(), SAMPLE_CSV);
    let mut store = CatalogStore::new(&path);

    let first = store.load().unwrap();
    fs::remove_file(&path).unwrap();

    // Served from the memo even though the file is gone
    assert_eq!(store.load().unwrap(), first);

    store.save(&first).unwrap();
    assert!(!store.is_cached());
    assert_eq!(store.load().unwrap(), first);
    assert!(store.is_cached());
}
