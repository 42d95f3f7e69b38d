//! # Restock - inventory merge engine
//!
//! Ties the [`catalog`] and [`stockfile`] crates together into the
//! load → merge → persist pipeline the `stockroom` binary runs.
//!
//! ```text
//!  inventory file ──> load_inventory() ──> Catalog (sorted once)
//!                                             |
//!  shipment file  ──> apply_shipment() ──────>│  merge_one() per record:
//!                                             │    hit  -> add stock
//!                                             │    miss -> insert sorted
//!                                             v
//!  output file    <── write_inventory() <── Catalog
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module      | Purpose                                              |
//! |-------------|------------------------------------------------------|
//! | [`merge`]   | `merge_one()`, `merge_all()`, `try_merge_all()`      |
//! | [`load`]    | `load_inventory()`, `apply_shipment()`               |
//! | [`persist`] | `write_inventory()`                                  |
//! | [`error`]   | `RunError`, `Stage`, exit codes                      |
//!
//! The catalog is a plain owned value passed between the steps; nothing
//! here keeps global state.

pub mod error;
pub mod load;
pub mod merge;
pub mod persist;

pub use error::{exit_code, RunError, Stage};
pub use load::{apply_shipment, load_inventory, LoadReport};
pub use merge::{merge_all, merge_one, try_merge_all, MergeOutcome, MergeStats};
pub use persist::write_inventory;

use config::Config;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The three files a run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub inventory: PathBuf,
    pub shipment: PathBuf,
    pub output: PathBuf,
}

/// Hooks called as a run progresses. All methods default to doing nothing.
pub trait Progress {
    fn loaded(&mut self, _report: &LoadReport) {}
    /// Catalog size before and after the merge.
    fn inventory_size(&mut self, _size: usize) {}
    fn merged(&mut self, _stats: &MergeStats) {}
    fn written(&mut self, _path: &Path, _records: usize) {}
}

impl Progress for () {}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub size_before: usize,
    pub size_after: usize,
    /// `None` when the merge was skipped because nothing was loaded.
    pub merge: Option<MergeStats>,
    /// Records written, or `None` if nothing was written.
    pub written: Option<usize>,
}

/// Runs the full pipeline.
///
/// If the inventory yields no valid records the shipment is not read and
/// no output is written; this is not an error.
pub fn run<P: Progress>(
    paths: &RunPaths,
    config: &Config,
    progress: &mut P,
) -> Result<RunSummary, RunError> {
    let report = load_inventory(&paths.inventory)?;
    progress.loaded(&report);

    let mut summary = RunSummary {
        loaded: report.loaded,
        skipped: report.skipped,
        ..RunSummary::default()
    };
    let mut catalog = report.catalog;

    if catalog.is_empty() {
        warn!(
            path = %paths.inventory.display(),
            "inventory has no valid records; nothing merged or written"
        );
        return Ok(summary);
    }

    summary.size_before = catalog.len();
    progress.inventory_size(summary.size_before);

    let stats = apply_shipment(&mut catalog, &paths.shipment)?;
    progress.merged(&stats);
    summary.merge = Some(stats);

    summary.size_after = catalog.len();
    progress.inventory_size(summary.size_after);

    let written = write_inventory(&catalog, &paths.output, config)?;
    progress.written(&paths.output, written);
    summary.written = Some(written);

    Ok(summary)
}

#[cfg(test)]
mod tests;
