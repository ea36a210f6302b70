use crate::commands::MergeOutcome;
use crate::error::Result;
use crate::model::Dataset;
use crate::store::DataStore;

/// Row save: sections of the incoming dataset that are non-empty replace the
/// stored ones wholesale; empty sections leave the current value untouched.
/// The front end always sends the full row list, so this is a whole-list
/// swap, not a per-row merge.
pub fn run<S: DataStore>(store: &S, incoming: Dataset) -> Result<MergeOutcome> {
    let mut current = store.load().unwrap_or_else(|_| Dataset::fallback());

    if !incoming.books.is_empty() {
        current.books = incoming.books;
    }
    if !incoming.cycle_columns.is_empty() {
        current.cycle_columns = incoming.cycle_columns;
    }
    if !incoming.listed_columns.is_empty() {
        current.listed_columns = incoming.listed_columns;
    }

    current.reconcile();
    store.save(&mut current)?;
    Ok(MergeOutcome {
        data: current,
        appended: 0,
    })
}
