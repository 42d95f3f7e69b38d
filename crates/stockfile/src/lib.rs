//! # Stockfile - inventory text format
//!
//! Reads and writes the flat text files the bookstore keeps its inventory
//! and shipments in. Both files share one layout; a shipment's third-line
//! count is the number of copies arriving, an inventory's is the number on
//! the shelf.
//!
//! ## Record layout
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ line 1 │ isbn (13 chars) <spaces> title ...                 │
//! │ line 2 │ author ...                                         │
//! │ line 3 │ pages <ws> price <ws> quantity                     │
//! └────────────────────────────────────────────────────────────┘
//!   ... repeated until end of input; blank lines between records
//!   are ignored.
//! ```
//!
//! On output the isbn is right-aligned in 13 columns and separated from the
//! title by two spaces; the price is printed with two decimals:
//!
//! ```text
//! 1111111111111  Go Deep
//! A. Uthor
//! 200  9.99  8
//! ```
//!
//! Records that fail the isbn-length or quantity checks are not the reader's
//! concern; it hands back every well-formed [`catalog::RawRecord`] and leaves
//! validation to the caller.

mod format;
mod reader;
mod writer;

pub use format::{parse_record_lines, write_record, LineError, FIELD_SEP};
pub use reader::StockReader;
pub use writer::StockWriter;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing an inventory file.
#[derive(Debug, Error)]
pub enum StockFileError {
    /// The source file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source file holds nothing but whitespace.
    #[error("file {} is empty", .path.display())]
    Empty { path: PathBuf },

    /// A record does not have the expected shape or field types.
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Reading failed after the file was opened.
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination (or its temp file) could not be created.
    #[error("cannot create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing, syncing or renaming the destination failed.
    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
