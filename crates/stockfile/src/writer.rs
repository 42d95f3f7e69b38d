use catalog::{Book, Catalog};
use std::ffi::OsString;
use std::fs::{rename, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::format::write_record;
use crate::StockFileError;

/// Writes a catalog back out in the text format.
///
/// The writer is stateless; all work happens in
/// [`write_catalog`](StockWriter::write_catalog). Output is
/// written to `<name>.tmp` beside the destination and renamed into place
/// once complete, so an existing file is only replaced by a finished one.
pub struct StockWriter {}

impl StockWriter {
    /// Writes every book in `catalog`, in catalog order, to `path`.
    /// Returns the number of records written.
    ///
    /// When `sync` is true the temp file is fsynced before the rename.
    ///
    /// # Errors
    ///
    /// [`StockFileError::Create`] if the temp file cannot be created (for
    /// example, the directory is write-protected or missing) and
    /// [`StockFileError::Write`] for any later failure.
    pub fn write_catalog(path: &Path, catalog: &Catalog, sync: bool) -> Result<usize, StockFileError> {
        Self::write_books(path, catalog.iter(), sync)
    }

    /// Writes books from any iterator. The caller decides the order.
    pub fn write_books<'a, I>(path: &Path, books: I, sync: bool) -> Result<usize, StockFileError>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let tmp_path = tmp_path_for(path).ok_or_else(|| StockFileError::Create {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        })?;

        let raw_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|source| StockFileError::Create {
                path: tmp_path.clone(),
                source,
            })?;
        let mut file = BufWriter::new(raw_file);

        let result = (|| -> io::Result<usize> {
            let mut count = 0usize;
            for book in books {
                write_record(&mut file, book)?;
                count += 1;
            }
            file.flush()?;
            let raw = file.into_inner().map_err(|e| e.into_error())?;
            if sync {
                raw.sync_all()?;
            }
            // close before rename
            drop(raw);
            rename(&tmp_path, path)?;
            Ok(count)
        })();

        let count = match result {
            Ok(count) => count,
            Err(source) => {
                let _ = std::fs::remove_file(&tmp_path);
                return Err(StockFileError::Write {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if sync {
            if let Some(parent) = path.parent() {
                if let Ok(dir) = std::fs::File::open(parent) {
                    let _ = dir.sync_all();
                }
            }
        }

        debug!(path = %path.display(), records = count, "inventory written");
        Ok(count)
    }
}

fn tmp_path_for(path: &Path) -> Option<PathBuf> {
    let mut name: OsString = path.file_name()?.to_os_string();
    name.push(".tmp");
    Some(path.with_file_name(name))
}
