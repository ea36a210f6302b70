use crate::commands::MergeOutcome;
use crate::error::Result;
use crate::model::Dataset;
use crate::store::DataStore;

/// Append-import: every incoming book is appended to the stored list with a
/// freshly assigned id, `max_id + 1 ...` in input order (client-supplied ids
/// on imported rows are discarded). Incoming declared columns are unioned
/// into the current declaration, existing order first, new names in their
/// incoming order.
pub fn run<S: DataStore>(store: &S, incoming: Dataset) -> Result<MergeOutcome> {
    let mut current = store.load().unwrap_or_else(|_| Dataset::fallback());

    let mut next_id = current.max_id();
    let appended = incoming.books.len();
    for mut book in incoming.books {
        next_id += 1;
        book.id = next_id;
        current.books.push(book);
    }

    union_columns(&mut current.cycle_columns, incoming.cycle_columns);
    union_columns(&mut current.listed_columns, incoming.listed_columns);

    current.reconcile();
    store.save(&mut current)?;
    Ok(MergeOutcome {
        data: current,
        appended,
    })
}

fn union_columns(current: &mut Vec<String>, incoming: Vec<String>) {
    for name in incoming {
        if !current.contains(&name) {
            current.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn incoming_books(ids: &[i64]) -> Vec<Book> {
        ids.iter()
            .map(|&id| Book {
                id,
                title: format!("Imported {}", id),
                ..Book::default()
            })
            .collect()
    }

    #[test]
    fn appends_with_monotonic_ids_ignoring_client_ids() {
        let store = StoreFixture::new().with_books(2, &["lan1", "lan2"]).store;

        // Client sends ids 5 and 9; they are discarded.
        let outcome = run(
            &store,
            Dataset {
                books: incoming_books(&[5, 9]),
                ..Dataset::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.appended, 2);
        let ids: Vec<i64> = outcome.data.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(outcome.data.books[2].title, "Imported 5");
    }

    #[test]
    fn assigns_ids_from_the_current_maximum_not_the_count() {
        let store = InMemoryStore::new();
        let mut sparse = Dataset {
            books: incoming_books(&[7]),
            cycle_columns: vec!["lan1".to_string()],
            ..Dataset::default()
        };
        sparse.reconcile();
        store.save(&mut sparse).unwrap();

        let outcome = run(
            &store,
            Dataset {
                books: incoming_books(&[0]),
                ..Dataset::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.data.books.last().unwrap().id, 8);
    }

    #[test]
    fn unions_columns_preserving_existing_order() {
        let store = StoreFixture::new().with_books(1, &["lan1", "lan2"]).store;

        let outcome = run(
            &store,
            Dataset {
                cycle_columns: vec![
                    "lan2".to_string(),
                    "lan4".to_string(),
                    "lan3".to_string(),
                ],
                listed_columns: vec!["hangDaLen1".to_string()],
                ..Dataset::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.data.cycle_columns, vec!["lan1", "lan2", "lan4", "lan3"]);
        assert_eq!(outcome.data.listed_columns, vec!["hangDaLen1"]);
        // Existing rows gained the new columns through reconciliation.
        assert!(outcome.data.books[0].cycles.contains_key("lan4"));
        assert!(outcome.data.books[0].cycles.contains_key("hangDaLen1"));
    }

    #[test]
    fn starts_from_defaults_when_load_fails() {
        let store = InMemoryStore::with_load_failure();
        let outcome = run(
            &store,
            Dataset {
                books: incoming_books(&[5, 9]),
                ..Dataset::default()
            },
        )
        .unwrap();

        let ids: Vec<i64> = outcome.data.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(outcome.data.cycle_columns, vec!["lan1", "lan2"]);
    }

    #[test]
    fn import_into_seeded_store_counts_the_seed_row() {
        // First load seeds the default dataset (one row, id 1), so imports
        // continue from there.
        let store = InMemoryStore::new();
        store.load().unwrap();

        let outcome = run(
            &store,
            Dataset {
                books: incoming_books(&[0]),
                ..Dataset::default()
            },
        )
        .unwrap();

        let ids: Vec<i64> = outcome.data.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
