use catalog::{Book, Catalog, Isbn, Price, RawRecord};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use restock::merge_all;

const N_BOOKS: u64 = 10_000;

fn isbn(i: u64) -> String {
    format!("{:013}", i)
}

/// Catalog holding the even ISBNs in `0..2 * N_BOOKS`.
fn build_catalog() -> Catalog {
    let books = (0..N_BOOKS)
        .map(|i| {
            Book::new(
                Isbn::parse(isbn(i * 2)).unwrap(),
                "Title",
                "Author",
                100,
                Price::from_cents(999),
                1,
            )
        })
        .collect();
    Catalog::bulk_load_and_sort(books)
}

/// Shipment touching every ISBN in `0..2 * N_BOOKS`: half hits, half new.
fn build_shipment() -> Vec<RawRecord> {
    (0..N_BOOKS * 2)
        .map(|i| RawRecord {
            isbn: isbn(i),
            title: "Title".to_string(),
            author: "Author".to_string(),
            pages: 100,
            price: Price::from_cents(999),
            quantity: 3,
        })
        .collect()
}

fn search_hit_benchmark(c: &mut Criterion) {
    let catalog = build_catalog();
    let keys: Vec<String> = (0..N_BOOKS).map(|i| isbn(i * 2)).collect();
    c.bench_function("catalog_search_hit_10k", |b| {
        b.iter(|| {
            for key in &keys {
                assert!(catalog.search(key).is_found());
            }
        })
    });
}

fn search_miss_benchmark(c: &mut Criterion) {
    let catalog = build_catalog();
    let keys: Vec<String> = (0..N_BOOKS).map(|i| isbn(i * 2 + 1)).collect();
    c.bench_function("catalog_search_miss_10k", |b| {
        b.iter(|| {
            for key in &keys {
                assert!(!catalog.search(key).is_found());
            }
        })
    });
}

fn bulk_load_benchmark(c: &mut Criterion) {
    c.bench_function("catalog_bulk_load_10k_reversed", |b| {
        b.iter_batched(
            || {
                (0..N_BOOKS)
                    .rev()
                    .map(|i| {
                        Book::new(
                            Isbn::parse(isbn(i)).unwrap(),
                            "Title",
                            "Author",
                            100,
                            Price::from_cents(999),
                            1,
                        )
                    })
                    .collect::<Vec<_>>()
            },
            Catalog::bulk_load_and_sort,
            BatchSize::LargeInput,
        );
    });
}

fn merge_benchmark(c: &mut Criterion) {
    c.bench_function("merge_20k_into_10k", |b| {
        b.iter_batched(
            || (build_catalog(), build_shipment()),
            |(mut catalog, shipment)| {
                let stats = merge_all(&mut catalog, shipment);
                assert_eq!(stats.added as u64, N_BOOKS);
                catalog
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    search_hit_benchmark,
    search_miss_benchmark,
    bulk_load_benchmark,
    merge_benchmark
);
criterion_main!(benches);
