/// Inventory and shipment loading.
///
/// Both files are streamed through [`StockReader`]. The inventory is
/// validated record by record, collected, and sorted once; the shipment is
/// merged into the catalog as it is read.
use catalog::{Book, Catalog};
use std::path::Path;
use stockfile::StockReader;
use tracing::{debug, info};

use crate::merge::{try_merge_all, MergeStats};
use crate::{RunError, Stage};

/// Result of [`load_inventory`].
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    /// Records accepted into the catalog.
    pub loaded: usize,
    /// Records dropped by the isbn-length or quantity check.
    pub skipped: usize,
}

/// Reads the starting inventory and builds a sorted catalog from it.
///
/// Duplicate ISBNs in the file are all kept.
///
/// # Errors
///
/// Missing, empty, or malformed files fail with [`Stage::Inventory`].
pub fn load_inventory<P: AsRef<Path>>(path: P) -> Result<LoadReport, RunError> {
    let path = path.as_ref();
    let reader = StockReader::open(path).map_err(|e| RunError::new(Stage::Inventory, e))?;

    let mut books: Vec<Book> = Vec::new();
    let mut skipped = 0usize;
    for record in reader {
        let record = record.map_err(|e| RunError::new(Stage::Inventory, e))?;
        match record.validate() {
            Ok(book) => books.push(book),
            Err(rejection) => {
                debug!(%rejection, "inventory record skipped");
                skipped += 1;
            }
        }
    }

    let loaded = books.len();
    let catalog = Catalog::bulk_load_and_sort(books);
    info!(path = %path.display(), loaded, skipped, "inventory loaded");

    Ok(LoadReport {
        catalog,
        loaded,
        skipped,
    })
}

/// Merges a shipment file into `catalog`.
///
/// # Errors
///
/// Missing, empty, or malformed files fail with [`Stage::Shipment`]. A
/// malformed record aborts the merge; records before it have already been
/// applied to `catalog`.
pub fn apply_shipment<P: AsRef<Path>>(catalog: &mut Catalog, path: P) -> Result<MergeStats, RunError> {
    let path = path.as_ref();
    let reader = StockReader::open(path).map_err(|e| RunError::new(Stage::Shipment, e))?;

    let stats = try_merge_all(catalog, reader).map_err(|e| RunError::new(Stage::Shipment, e))?;
    info!(
        path = %path.display(),
        updated = stats.updated,
        added = stats.added,
        skipped = stats.skipped,
        size = catalog.len(),
        "shipment merged"
    );
    Ok(stats)
}
