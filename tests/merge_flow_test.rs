//! End-to-end merge flows against the file-backed store: every request-style
//! operation reloads from disk, merges, reconciles, and rewrites the whole
//! document, just as the HTTP handlers do.

use bookstock::api::BookstockApi;
use bookstock::model::{Book, Dataset};
use bookstock::store::fs::FileStore;
use tempfile::TempDir;

fn api() -> (TempDir, BookstockApi<FileStore>) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    (dir, BookstockApi::new(store))
}

fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        seq: id,
        title: title.to_string(),
        ..Book::default()
    }
}

#[test]
fn import_assigns_sequential_ids_after_current_max() {
    let (_dir, api) = api();

    // Current state: ids {1, 2}.
    api.replace(Dataset {
        books: vec![book(1, "One"), book(2, "Two")],
        cycle_columns: vec!["lan1".to_string(), "lan2".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    // Imported rows claim ids 5 and 9; both are discarded.
    let outcome = api
        .import_books(Dataset {
            books: vec![book(5, "Five"), book(9, "Nine")],
            ..Dataset::default()
        })
        .unwrap();
    assert_eq!(outcome.appended, 2);

    let data = api.data().unwrap();
    let ids: Vec<i64> = data.books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    // Pre-existing rows are untouched.
    assert_eq!(data.books[0].title, "One");
    assert_eq!(data.books[2].title, "Five");
}

#[test]
fn import_unions_columns_and_reconciles_every_row() {
    let (_dir, api) = api();

    api.replace(Dataset {
        books: vec![book(1, "One")],
        cycle_columns: vec!["lan1".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    api.import_books(Dataset {
        books: vec![book(0, "Two")],
        cycle_columns: vec!["lan1".to_string(), "lan2".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    let data = api.data().unwrap();
    assert_eq!(data.cycle_columns, vec!["lan1", "lan2"]);
    for b in &data.books {
        let keys: Vec<&str> = b.cycles.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["lan1", "lan2"]);
    }
}

#[test]
fn row_save_merges_against_the_persisted_state() {
    let (_dir, api) = api();

    api.replace(Dataset {
        books: vec![book(1, "One"), book(2, "Two")],
        cycle_columns: vec!["lan1".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    // Only columns in the request: rows survive, declaration is swapped.
    api.save_row(Dataset {
        cycle_columns: vec!["lan2".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    let data = api.data().unwrap();
    assert_eq!(data.books.len(), 2);
    assert_eq!(data.cycle_columns, vec!["lan2"]);
    assert!(data.books[0].cycles.contains_key("lan2"));
    assert!(!data.books[0].cycles.contains_key("lan1"));
}

#[test]
fn every_operation_reloads_from_storage() {
    let (dir, api) = api();

    api.replace(Dataset {
        books: vec![book(1, "One")],
        cycle_columns: vec!["lan1".to_string()],
        ..Dataset::default()
    })
    .unwrap();

    // A second handle on the same directory sees the first handle's write;
    // the only shared state is the document itself.
    let other = BookstockApi::new(FileStore::new(dir.path().join("data")));
    let data = other.data().unwrap();
    assert_eq!(data.books.len(), 1);
    assert_eq!(data.books[0].title, "One");
}
