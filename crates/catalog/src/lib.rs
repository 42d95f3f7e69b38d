//! # Catalog - sorted in-memory inventory
//!
//! Holds the bookstore's [`Book`] records in a `Vec` kept in ascending ISBN
//! order, and provides the binary search that every lookup and insertion in
//! the merge path goes through.
//!
//! ```text
//!   bulk_load_and_sort(batch)      one stable sort after load
//!           |
//!           v
//!   [ b0 < b1 < b2 < ... < bn ]    sorted by isbn (byte-wise)
//!           |
//!   search(isbn) ──> Found(i)      -> get_mut(i).add_stock(..)
//!                └─> NotFound(j)   -> insert_sorted(book) at j
//! ```
//!
//! Duplicate ISBNs in the initial batch are kept side by side; nothing is
//! deduplicated at load time. After that, `insert_sorted` refuses keys that
//! are already present, so merges never introduce new duplicates.

mod record;

pub use record::{Book, InvalidPrice, Isbn, Price, RawRecord, Rejection, ISBN_LEN, MAX_STOCK};

use thiserror::Error;
use tracing::trace;

/// Outcome of [`Catalog::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// Index of a record with the requested ISBN.
    Found(usize),
    /// Index at which a record with the requested ISBN would have to be
    /// inserted to keep the catalog sorted.
    NotFound(usize),
}

impl Search {
    /// Packs the result into a single signed integer: the index when found,
    /// `-(insertion) - 1` otherwise.
    pub fn encode(self) -> i64 {
        match self {
            Search::Found(i) => i as i64,
            Search::NotFound(i) => -(i as i64) - 1,
        }
    }

    /// Inverse of [`Search::encode`].
    pub fn decode(code: i64) -> Self {
        if code >= 0 {
            Search::Found(code as usize)
        } else {
            Search::NotFound((-code - 1) as usize)
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Search::Found(_))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// `insert_sorted` was handed an ISBN the catalog already holds. The
    /// rejected book is handed back along with the index of the existing one.
    #[error("isbn {} is already in the catalog at index {index}", .book.isbn())]
    DuplicateIsbn { index: usize, book: Book },
}

#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Builds a catalog from an unordered batch with a single stable sort.
    ///
    /// Records sharing an ISBN are all retained, in their input order.
    pub fn bulk_load_and_sort(books: Vec<Book>) -> Self {
        let mut books = books;
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
        Self { books }
    }

    /// Binary search for `isbn`.
    ///
    /// The catalog must be sorted, which every constructor and mutator here
    /// guarantees.
    pub fn search(&self, isbn: &str) -> Search {
        self.probe(isbn).0
    }

    /// Same as [`Catalog::search`], also returning how many midpoints were
    /// examined.
    pub fn probe(&self, isbn: &str) -> (Search, u32) {
        let mut low = 0usize;
        let mut high = self.books.len();
        let mut probes = 0u32;

        // half-open window [low, high)
        while low < high {
            let mid = low + (high - low) / 2;
            probes += 1;
            match self.books[mid].isbn().as_str().cmp(isbn) {
                std::cmp::Ordering::Equal => {
                    trace!(isbn, probes, index = mid, "search hit");
                    return (Search::Found(mid), probes);
                }
                std::cmp::Ordering::Greater => high = mid,
                std::cmp::Ordering::Less => low = mid + 1,
            }
        }

        trace!(isbn, probes, insert_at = low, "search miss");
        (Search::NotFound(low), probes)
    }

    /// Inserts a book whose ISBN is not yet present, at the position that
    /// keeps the catalog sorted. Returns that position.
    pub fn insert_sorted(&mut self, book: Book) -> Result<usize, CatalogError> {
        match self.search(book.isbn().as_str()) {
            Search::Found(index) => Err(CatalogError::DuplicateIsbn { index, book }),
            Search::NotFound(index) => {
                self.books.insert(index, book);
                Ok(index)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Mutable access for in-place stock updates. The ISBN cannot be changed
    /// through a `Book`, so this cannot break the ordering.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Book> {
        self.books.get_mut(index)
    }

    pub fn find(&self, isbn: &str) -> Option<&Book> {
        match self.search(isbn) {
            Search::Found(i) => self.books.get(i),
            Search::NotFound(_) => None,
        }
    }

    /// Ordered iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// True when every adjacent pair is in non-decreasing ISBN order.
    pub fn is_sorted(&self) -> bool {
        self.books.windows(2).all(|w| w[0].isbn() <= w[1].isbn())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
