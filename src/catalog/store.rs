use crate::catalog::types::{Catalog, Product};
use crate::{InventoryError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Column names of the backing file, in the order they are written
pub const COLUMNS: [&str; 7] = [
    "id",
    "nombre",
    "categoria",
    "precio",
    "stock",
    "descripcion",
    "proveedor",
];

/// Owns the backing CSV file and a memoized snapshot of its contents
pub struct CatalogStore {
    /// Path of the backing file
    path: PathBuf,
    /// Snapshot served by `load()` until the next successful save
    snapshot: Option<Catalog>,
}

impl CatalogStore {
    /// Create a store for the given file; nothing is read until `load()`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: None,
        }
    }

    /// Load the catalog, serving the memoized snapshot when there is one
    pub fn load(&mut self) -> Result<Catalog> {
        if let Some(snapshot) = &self.snapshot {
            debug!(path = %self.path.display(), "Serving catalog from memo");
            return Ok(snapshot.clone());
        }

        let catalog = self.read_from_disk()?;
        self.snapshot = Some(catalog.clone());
        Ok(catalog)
    }

    /// Overwrite the backing file with `catalog`.
    ///
    /// The rows go to a temporary file in the same directory which then
    /// replaces the original, so a failed save leaves the previous content in
    /// place. An existing file keeps its permissions. The memo is dropped
    /// after the replace succeeds.
    pub fn save(&mut self, catalog: &Catalog) -> Result<()> {
        let mut temp = NamedTempFile::new_in(self.parent_dir())?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }
        write_catalog(temp.as_file_mut(), catalog)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)
            .map_err(|e| InventoryError::Io(e.error))?;

        self.invalidate();
        info!(
            path = %self.path.display(),
            products = catalog.len(),
            "Catalog saved"
        );
        Ok(())
    }

    /// Drop the memoized snapshot (forces a read from disk on next load)
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn is_cached(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_from_disk(&self) -> Result<Catalog> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(InventoryError::DataFileNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let catalog = read_catalog(io::BufReader::new(file))?;
        debug!(
            path = %self.path.display(),
            products = catalog.len(),
            "Catalog loaded from disk"
        );
        Ok(catalog)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Parse a catalog from CSV text with a header row.
///
/// Columns are matched by name and may come in any order; every column in
/// [`COLUMNS`] must be present exactly once and no other column is accepted.
pub fn read_catalog<R: io::Read>(reader: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(reader.headers().map_err(csv_error)?)?;

    let mut products = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        products.push(layout.product(&record, index + 1)?);
    }

    Ok(Catalog::from_products(products))
}

/// Write a catalog as CSV in [`COLUMNS`] order. Text is quoted only when it
/// contains a delimiter, quote or line break.
pub fn write_catalog<W: io::Write>(writer: W, catalog: &Catalog) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS).map_err(csv_error)?;

    for product in catalog {
        let id = product.id.to_string();
        let price = product.price.to_string();
        let stock = product.stock.to_string();
        writer
            .write_record([
                id.as_str(),
                product.name.as_str(),
                product.category.as_str(),
                price.as_str(),
                stock.as_str(),
                product.description.as_str(),
                product.supplier.as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

/// Position of each known column within a record, indexed like [`COLUMNS`]
struct ColumnLayout {
    positions: [usize; 7],
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut positions = [None; 7];

        for (position, header) in headers.iter().enumerate() {
            let header = header.trim();
            let slot = COLUMNS
                .iter()
                .position(|column| *column == header)
                .ok_or_else(|| InventoryError::Format(format!("Unexpected column '{}'", header)))?;

            if positions[slot].replace(position).is_some() {
                return Err(InventoryError::Format(format!(
                    "Duplicate column '{}'",
                    header
                )));
            }
        }

        let mut resolved = [0; 7];
        for (slot, position) in positions.iter().enumerate() {
            resolved[slot] = position.ok_or_else(|| {
                InventoryError::Format(format!("Missing column '{}'", COLUMNS[slot]))
            })?;
        }

        Ok(Self {
            positions: resolved,
        })
    }

    fn field<'r>(&self, record: &'r csv::StringRecord, slot: usize) -> &'r str {
        record.get(self.positions[slot]).unwrap_or_default()
    }

    fn whole(&self, record: &csv::StringRecord, slot: usize, row: usize) -> Result<u32> {
        coerce_whole(self.field(record, slot), row, COLUMNS[slot])
    }

    fn product(&self, record: &csv::StringRecord, row: usize) -> Result<Product> {
        Ok(Product {
            id: self.whole(record, 0, row)?,
            name: self.field(record, 1).to_string(),
            category: self.field(record, 2).to_string(),
            price: self.whole(record, 3, row)?,
            stock: self.whole(record, 4, row)?,
            description: self.field(record, 5).to_string(),
            supplier: self.field(record, 6).to_string(),
        })
    }
}

/// Coerce a numeric field to a non-negative whole number.
///
/// Accepts plain integers and decimals with no fractional part ("12.0").
fn coerce_whole(value: &str, row: usize, column: &'static str) -> Result<u32> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Ok(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) => {
            Ok(f as u32)
        }
        _ => Err(InventoryError::Type {
            row,
            column,
            value: value.to_string(),
        }),
    }
}

fn csv_error(err: csv::Error) -> InventoryError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => InventoryError::Io(io_err),
        _ => InventoryError::Format(message),
    }
}
