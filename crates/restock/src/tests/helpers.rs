use catalog::{Book, Catalog, Isbn, Price, RawRecord};
use std::fs;
use std::path::{Path, PathBuf};

pub fn raw(isbn: &str, title: &str, author: &str, pages: u32, price: &str, quantity: i64) -> RawRecord {
    RawRecord {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        pages,
        price: Price::parse(price).unwrap(),
        quantity,
    }
}

pub fn book(isbn: &str, stock: u64) -> Book {
    Book::new(Isbn::parse(isbn).unwrap(), "T", "A", 1, Price::from_cents(100), stock)
}

pub fn catalog_of(books: Vec<Book>) -> Catalog {
    Catalog::bulk_load_and_sort(books)
}

/// Renders records in the file layout.
pub fn file_text(records: &[(&str, &str, &str, u32, &str, i64)]) -> String {
    let mut out = String::new();
    for (isbn, title, author, pages, price, qty) in records {
        out.push_str(&format!("{}  {}\n{}\n{}  {}  {}\n", isbn, title, author, pages, price, qty));
    }
    out
}

pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Field-by-field snapshot, since `Book` equality only looks at the isbn.
pub fn snapshot(c: &Catalog) -> Vec<(String, String, String, u32, u64, u64)> {
    c.iter()
        .map(|b| {
            (
                b.isbn().to_string(),
                b.title().to_string(),
                b.author().to_string(),
                b.pages(),
                b.price().cents(),
                b.stock(),
            )
        })
        .collect()
}
