//! Merge path: folds shipment records into a sorted [`Catalog`].
//!
//! Each incoming record is looked up by ISBN. A hit adds the shipment
//! quantity to the shelf count in place; a miss inserts a new book at the
//! search's insertion point. The catalog stays sorted after every call, so a
//! shipment that lists the same ISBN twice sees its own first occurrence as
//! already present.

use catalog::{Catalog, CatalogError, RawRecord, Rejection};
use tracing::debug;

/// How a single incoming record was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Stock added to the existing record at this index.
    Updated(usize),
    /// New record inserted at this index.
    Added(usize),
    /// Record failed the isbn-length or quantity check and was dropped.
    Skipped(Rejection),
}

/// Running totals over a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub updated: usize,
    pub added: usize,
    /// Records dropped by validation. Not counted as updated or added.
    pub skipped: usize,
}

impl MergeStats {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Updated(_) => self.updated += 1,
            MergeOutcome::Added(_) => self.added += 1,
            MergeOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Applies one incoming record to the catalog.
///
/// The lookup and the insertion share one binary search: `insert_sorted`
/// either places the new book at the insertion point or hands it back with
/// the index of the book already on file.
pub fn merge_one(catalog: &mut Catalog, incoming: RawRecord) -> MergeOutcome {
    let book = match incoming.validate() {
        Ok(book) => book,
        Err(rejection) => {
            debug!(%rejection, "shipment record skipped");
            return MergeOutcome::Skipped(rejection);
        }
    };

    match catalog.insert_sorted(book) {
        Ok(index) => {
            debug!(index, "added");
            MergeOutcome::Added(index)
        }
        Err(CatalogError::DuplicateIsbn { index, book }) => {
            if let Some(existing) = catalog.get_mut(index) {
                existing.add_stock(i64::try_from(book.stock()).unwrap_or(i64::MAX));
                debug!(isbn = %existing.isbn(), index, stock = existing.stock(), "updated");
            }
            MergeOutcome::Updated(index)
        }
    }
}

/// Applies every record in stream order.
pub fn merge_all<I>(catalog: &mut Catalog, incoming: I) -> MergeStats
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut stats = MergeStats::default();
    for record in incoming {
        stats.record(merge_one(catalog, record));
    }
    stats
}

/// Like [`merge_all`] over a fallible stream. Stops at the first error;
/// records before it have already been applied.
pub fn try_merge_all<I, E>(catalog: &mut Catalog, incoming: I) -> Result<MergeStats, E>
where
    I: IntoIterator<Item = Result<RawRecord, E>>,
{
    let mut stats = MergeStats::default();
    for record in incoming {
        stats.record(merge_one(catalog, record?));
    }
    Ok(stats)
}
