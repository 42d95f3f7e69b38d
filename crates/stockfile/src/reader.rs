use catalog::RawRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::format::parse_record_lines;
use crate::StockFileError;

/// Streams [`RawRecord`]s out of an inventory or shipment file.
///
/// The reader is an iterator of `Result`s. The first `Err` ends the stream:
/// a malformed record makes everything after it unreliable, so nothing more
/// is yielded.
pub struct StockReader<R = BufReader<File>> {
    path: PathBuf,
    lines: Lines<R>,
    /// Number of the last physical line consumed (1-based).
    line_no: usize,
    /// First non-blank line, read ahead by the emptiness check.
    peeked: Option<(usize, String)>,
    done: bool,
}

impl StockReader<BufReader<File>> {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// [`StockFileError::Open`] if the file cannot be opened,
    /// [`StockFileError::Empty`] if it contains only whitespace, and
    /// [`StockFileError::Malformed`] if its first non-blank line is not UTF-8.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StockFileError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| StockFileError::Open {
            path: path.clone(),
            source,
        })?;
        let mut reader = Self::new(path, BufReader::new(file));
        reader.ensure_not_empty()?;
        Ok(reader)
    }
}

impl<R: BufRead> StockReader<R> {
    /// Wraps an already-open source. `path` is only used in error messages.
    ///
    /// Unlike [`StockReader::open`] this does not check for an empty source;
    /// call [`StockReader::ensure_not_empty`] for that.
    pub fn new(path: impl Into<PathBuf>, inner: R) -> Self {
        Self {
            path: path.into(),
            lines: inner.lines(),
            line_no: 0,
            peeked: None,
            done: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails with [`StockFileError::Empty`] unless at least one non-blank
    /// line remains.
    pub fn ensure_not_empty(&mut self) -> Result<(), StockFileError> {
        match self.next_content_line()? {
            Some(line) => {
                self.peeked = Some(line);
                Ok(())
            }
            None => Err(StockFileError::Empty {
                path: self.path.clone(),
            }),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, StockFileError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(Some(line))
            }
            Some(Err(source)) if source.kind() == io::ErrorKind::InvalidData => {
                Err(self.malformed(self.line_no + 1, "line is not valid UTF-8"))
            }
            Some(Err(source)) => Err(StockFileError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Next non-blank line with its line number.
    fn next_content_line(&mut self) -> Result<Option<(usize, String)>, StockFileError> {
        if let Some(peeked) = self.peeked.take() {
            return Ok(Some(peeked));
        }
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some((self.line_no, line)));
            }
        }
        Ok(None)
    }

    fn malformed(&self, line: usize, reason: impl Into<String>) -> StockFileError {
        StockFileError::Malformed {
            path: self.path.clone(),
            line,
            reason: reason.into(),
        }
    }

    fn read_record(&mut self) -> Result<Option<RawRecord>, StockFileError> {
        let (start, first) = match self.next_content_line()? {
            Some(l) => l,
            None => return Ok(None),
        };

        let author = self.next_line()?.ok_or_else(|| {
            self.malformed(
                start + 1,
                format!("unexpected end of input: record at line {} has no author line", start),
            )
        })?;
        let numbers = self.next_line()?.ok_or_else(|| {
            self.malformed(
                start + 2,
                format!(
                    "unexpected end of input: record at line {} has no `pages price quantity` line",
                    start
                ),
            )
        })?;

        parse_record_lines(&first, &author, &numbers)
            .map(Some)
            .map_err(|e| self.malformed(start + e.offset, e.reason))
    }
}

impl<R: BufRead> Iterator for StockReader<R> {
    type Item = Result<RawRecord, StockFileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
