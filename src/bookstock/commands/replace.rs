use crate::commands::MergeOutcome;
use crate::error::Result;
use crate::model::Dataset;
use crate::store::DataStore;

/// Full replace: the incoming dataset is the authoritative state. Nothing is
/// merged from storage; record ids are trusted as sent.
pub fn run<S: DataStore>(store: &S, mut incoming: Dataset) -> Result<MergeOutcome> {
    incoming.reconcile();
    store.save(&mut incoming)?;
    Ok(MergeOutcome {
        data: incoming,
        appended: 0,
    })
}
