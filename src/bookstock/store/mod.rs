//! # Storage Layer
//!
//! Whole-document persistence: the entire [`Dataset`] is one JSON document,
//! and every save rewrites it in full. There is no per-record durability and
//! no cross-request cache. Each request loads, merges, and saves again.
//!
//! The [`DataStore`] trait abstracts the document's location so the merge
//! operations can be tested without a filesystem:
//!
//! - [`fs::FileStore`]: production storage at `<data_dir>/data.json`,
//!   written atomically (temp file + rename).
//! - [`memory::InMemoryStore`]: test storage that keeps the serialized
//!   document in memory but preserves the same load/save semantics,
//!   including first-run seeding.
//!
//! Concurrent writers are not serialized: two overlapping requests can both
//! load, merge, and save, and the last save wins. That lost-update behavior
//! is accepted for this dataset size and usage pattern.

use crate::error::Result;
use crate::model::Dataset;

pub mod fs;
pub mod memory;

/// Abstract interface for whole-document dataset storage.
pub trait DataStore {
    /// Load the persisted dataset, seeding and persisting a default one on
    /// first run. The returned dataset is always reconciled.
    fn load(&self) -> Result<Dataset>;

    /// Stamp `lastUpdated` and overwrite the persisted document in full.
    fn save(&self, data: &mut Dataset) -> Result<()>;
}
