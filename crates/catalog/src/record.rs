//! Book records and the unvalidated tuples they are built from.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// Number of characters every ISBN key must have.
pub const ISBN_LEN: usize = 13;

/// Largest stock count a book can hold. Quantities are read back as signed
/// 64-bit integers, so anything above this could not be loaded again.
pub const MAX_STOCK: u64 = i64::MAX as u64;

/// A 13-character ISBN key.
///
/// Ordering is byte-wise on the underlying string, which is what the catalog
/// searches and sorts by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Builds an ISBN, returning the offending length if it is not exactly
    /// [`ISBN_LEN`] characters.
    pub fn parse(s: impl Into<String>) -> Result<Self, Rejection> {
        let s = s.into();
        let len = s.chars().count();
        if len != ISBN_LEN {
            return Err(Rejection::IsbnLength(len));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // delegate so width/alignment flags apply
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unit price in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

/// A price token that is not a plain non-negative decimal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid price {0:?}: expected a non-negative decimal")]
pub struct InvalidPrice(pub String);

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Parses a decimal token such as `9.99`, `5` or `.5`, rounding half up
    /// to the nearest cent.
    ///
    /// The digits are read as text, so `1.005` is exactly half a cent and
    /// rounds to `1.01`.
    pub fn parse(token: &str) -> Result<Self, InvalidPrice> {
        let invalid = || InvalidPrice(token.to_string());

        let digits = token.strip_prefix('+').unwrap_or(token);
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let mut frac_digits = frac.bytes().map(|b| u64::from(b - b'0'));
        let tenths = frac_digits.next().unwrap_or(0);
        let hundredths = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().is_some_and(|d| d >= 5);

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + u64::from(round_up)))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Why a parsed record was dropped before reaching the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("isbn has {0} characters, expected 13")]
    IsbnLength(usize),

    #[error("negative quantity {0}")]
    NegativeQuantity(i64),
}

/// One book in the inventory.
///
/// Everything except the stock count is fixed at construction. Equality and
/// ordering look at the ISBN only, so two records for the same ISBN compare
/// equal even if their titles differ.
#[derive(Debug, Clone)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    pages: u32,
    price: Price,
    stock: u64,
}

impl Book {
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        pages: u32,
        price: Price,
        stock: u64,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            pages,
            price,
            stock: stock.min(MAX_STOCK),
        }
    }

    /// Adds copies to the shelf, saturating at [`MAX_STOCK`]. Non-positive
    /// deltas are ignored.
    pub fn add_stock(&mut self, delta: i64) {
        if delta > 0 {
            self.stock = self.stock.saturating_add(delta as u64).min(MAX_STOCK);
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Book {
    fn cmp(&self, other: &Self) -> Ordering {
        self.isbn.cmp(&other.isbn)
    }
}

/// A record as it comes off the page, before the sanity checks.
///
/// The quantity is signed so that a negative count in the input can be
/// recognised and skipped rather than treated as a parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub price: Price,
    pub quantity: i64,
}

impl RawRecord {
    /// Applies the ISBN-length and quantity checks, producing a [`Book`]
    /// whose stock is the record's quantity.
    pub fn validate(self) -> Result<Book, Rejection> {
        let isbn = Isbn::parse(self.isbn)?;
        if self.quantity < 0 {
            return Err(Rejection::NegativeQuantity(self.quantity));
        }
        Ok(Book::new(
            isbn,
            self.title,
            self.author,
            self.pages,
            self.price,
            self.quantity as u64,
        ))
    }
}
