/// Persisting the merged catalog.
use catalog::Catalog;
use config::Config;
use std::path::Path;
use stockfile::StockWriter;
use tracing::info;

use crate::{RunError, Stage};

/// Writes `catalog` to `path` in the inventory format, replacing any
/// existing file. Returns the number of records written.
///
/// # Errors
///
/// Any failure to create or write the file fails with [`Stage::Output`].
pub fn write_inventory<P: AsRef<Path>>(
    catalog: &Catalog,
    path: P,
    config: &Config,
) -> Result<usize, RunError> {
    let path = path.as_ref();
    let written = StockWriter::write_catalog(path, catalog, config.sync_output)
        .map_err(|e| RunError::new(Stage::Output, e))?;
    info!(path = %path.display(), written, "inventory persisted");
    Ok(written)
}
