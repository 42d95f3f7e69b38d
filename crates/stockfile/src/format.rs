//! Line-level codec for one inventory record.
//!
//! ```text
//! line 1: {isbn:>13}  {title}
//! line 2: {author}
//! line 3: {pages}  {price:.2}  {quantity}
//! ```
//!
//! Parsing is lenient about the amount of whitespace between fields;
//! writing always uses [`FIELD_SEP`].

use catalog::{Book, Price, RawRecord, ISBN_LEN};
use std::io::{Result as IoResult, Write};

/// Separator placed between fields on output.
pub const FIELD_SEP: &str = "  ";

/// A problem with one of a record's three lines.
///
/// `offset` is 0, 1 or 2 for the isbn/title, author and numbers line; the
/// reader turns it into an absolute line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub offset: usize,
    pub reason: String,
}

impl LineError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }
}

/// Splits a line into its first whitespace-delimited token and the rest,
/// with the separating whitespace removed from the rest.
fn split_first_token(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }
    match line.find(char::is_whitespace) {
        Some(end) => Some((&line[..end], line[end..].trim_start())),
        None => Some((line, "")),
    }
}

/// Parses the three lines of one record.
///
/// Only the shape and field types are checked here. The isbn length and the
/// sign of the quantity are left to [`RawRecord::validate`] so that bad
/// values can be skipped instead of aborting the whole file.
pub fn parse_record_lines(
    first: &str,
    author: &str,
    numbers: &str,
) -> Result<RawRecord, LineError> {
    let (isbn, title) =
        split_first_token(first).ok_or_else(|| LineError::new(0, "expected an isbn"))?;

    let fields: Vec<&str> = numbers.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(LineError::new(
            2,
            format!(
                "expected `pages price quantity`, found {} field(s)",
                fields.len()
            ),
        ));
    }

    let pages: u32 = fields[0].parse().map_err(|_| {
        LineError::new(2, format!("expected integer page count, found {:?}", fields[0]))
    })?;
    let price = Price::parse(fields[1]).map_err(|e| LineError::new(2, e.to_string()))?;
    let quantity: i64 = fields[2].parse().map_err(|_| {
        LineError::new(2, format!("expected integer quantity, found {:?}", fields[2]))
    })?;

    Ok(RawRecord {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        pages,
        price,
        quantity,
    })
}

/// Writes one book in the layout [`parse_record_lines`] reads back.
pub fn write_record<W: Write>(w: &mut W, book: &Book) -> IoResult<()> {
    writeln!(
        w,
        "{:>width$}{FIELD_SEP}{}",
        book.isbn(),
        book.title(),
        width = ISBN_LEN
    )?;
    writeln!(w, "{}", book.author())?;
    writeln!(
        w,
        "{}{FIELD_SEP}{}{FIELD_SEP}{}",
        book.pages(),
        book.price(),
        book.stock()
    )?;
    Ok(())
}
