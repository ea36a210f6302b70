//! # Write-Merge Operations
//!
//! The three write endpoints share the persisted dataset but apply different
//! merge policies before reconciling and saving:
//!
//! - [`replace`]: the incoming dataset supersedes the stored one wholesale.
//! - [`row`]: non-empty incoming sections (books, declared columns) replace
//!   their stored counterparts; empty sections leave the current value alone.
//! - [`import`]: incoming books are appended with freshly assigned ids and
//!   incoming columns are unioned into the declaration.
//!
//! Every policy ends with `reconcile` + `save`, so a successfully persisted
//! dataset always satisfies the column invariant. A failed save leaves the
//! previous document in place.

use crate::model::Dataset;

pub mod import;
pub mod replace;
pub mod row;

/// Outcome of a write-merge operation.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// The dataset as persisted.
    pub data: Dataset,
    /// How many records the operation appended (import only).
    pub appended: usize,
}
