//! # API Facade
//!
//! Thin entry point over the merge commands, generic over [`DataStore`] so
//! the HTTP layer runs against [`crate::store::fs::FileStore`] and tests
//! against [`crate::store::memory::InMemoryStore`]. No business logic lives
//! here; each method dispatches to the matching command and returns its
//! structured result. Nothing is cached between calls: every operation goes
//! back to the store, so concurrent handlers only share the document itself.

use crate::commands::{self, MergeOutcome};
use crate::error::Result;
use crate::model::Dataset;
use crate::store::DataStore;

pub struct BookstockApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> BookstockApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current dataset, seeded on first call.
    pub fn data(&self) -> Result<Dataset> {
        self.store.load()
    }

    /// Full-replace write (POST /api/data).
    pub fn replace(&self, incoming: Dataset) -> Result<MergeOutcome> {
        commands::replace::run(&self.store, incoming)
    }

    /// Row save (POST /api/data/row).
    pub fn save_row(&self, incoming: Dataset) -> Result<MergeOutcome> {
        commands::row::run(&self.store, incoming)
    }

    /// Append-import (POST /api/data/import).
    pub fn import_books(&self, incoming: Dataset) -> Result<MergeOutcome> {
        commands::import::run(&self.store, incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn data_seeds_on_first_call() {
        let api = BookstockApi::new(InMemoryStore::new());
        let data = api.data().unwrap();
        assert_eq!(data.books.len(), 1);
        assert_eq!(data.cycle_columns, vec!["lan1", "lan2"]);
    }

    #[test]
    fn import_reports_appended_count() {
        let api = BookstockApi::new(InMemoryStore::new());
        api.data().unwrap();

        let incoming = Dataset {
            books: vec![Book::default(), Book::default()],
            ..Dataset::default()
        };
        let outcome = api.import_books(incoming).unwrap();
        assert_eq!(outcome.appended, 2);
    }
}
