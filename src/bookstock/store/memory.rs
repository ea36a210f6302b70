use super::DataStore;
use crate::error::{BookstockError, Result};
use crate::model::Dataset;
use chrono::Utc;
use std::sync::Mutex;

/// In-memory storage for testing.
///
/// Keeps the dataset as serialized text behind a mutex, so load/save go
/// through the same document round trip as [`super::fs::FileStore`],
/// including first-run seeding and re-reconciliation on load.
#[derive(Default)]
pub struct InMemoryStore {
    document: Mutex<Option<String>>,
    fail_loads: bool,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose loads always fail, for exercising merge fallbacks.
    pub fn with_load_failure() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    /// A store whose saves always fail, for exercising failed-save paths.
    pub fn with_save_failure() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// The raw persisted document, if any (test inspection).
    pub fn document(&self) -> Option<String> {
        self.document.lock().expect("store mutex poisoned").clone()
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Dataset> {
        if self.fail_loads {
            return Err(BookstockError::Store("loads disabled".to_string()));
        }

        let content = self.document();
        match content {
            Some(text) => {
                let mut data: Dataset =
                    serde_json::from_str(&text).map_err(BookstockError::Malformed)?;
                data.reconcile();
                Ok(data)
            }
            None => {
                let mut data = Dataset::seed();
                self.save(&mut data)?;
                Ok(data)
            }
        }
    }

    fn save(&self, data: &mut Dataset) -> Result<()> {
        if self.fail_saves {
            return Err(BookstockError::Store("saves disabled".to_string()));
        }

        data.last_updated = Utc::now().to_rfc3339();
        let text = serde_json::to_string_pretty(data).map_err(BookstockError::Malformed)?;
        *self.document.lock().expect("store mutex poisoned") = Some(text);
        Ok(())
    }
}

// --- Test Fixtures ---
