use super::DataStore;
use crate::error::{BookstockError, Result};
use crate::model::Dataset;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

const DATA_FILENAME: &str = "data.json";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// File-backed dataset storage. Holds only the configured location; every
/// operation goes back to disk, so handlers on different threads can share a
/// clone freely.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(BookstockError::Storage)?;
        }
        Ok(())
    }

    fn write_document(&self, data: &Dataset) -> Result<()> {
        let content = serde_json::to_string_pretty(data).map_err(BookstockError::Malformed)?;

        // Atomic write: readers either see the previous document or the new
        // one, never a partial file.
        let tmp = self
            .data_dir
            .join(format!(".data-{}.tmp", TMP_SEQ.fetch_add(1, Ordering::Relaxed)));
        fs::write(&tmp, content).map_err(BookstockError::Storage)?;
        fs::rename(&tmp, self.data_file()).map_err(BookstockError::Storage)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Dataset> {
        self.ensure_dir()?;

        let path = self.data_file();
        if !path.exists() {
            let mut data = Dataset::seed();
            self.save(&mut data)?;
            return Ok(data);
        }

        let content = fs::read_to_string(&path).map_err(BookstockError::Storage)?;
        // A document that exists but does not parse is surfaced, not repaired.
        let mut data: Dataset =
            serde_json::from_str(&content).map_err(BookstockError::Malformed)?;
        data.reconcile();
        Ok(data)
    }

    fn save(&self, data: &mut Dataset) -> Result<()> {
        self.ensure_dir()?;
        data.last_updated = Utc::now().to_rfc3339();
        self.write_document(data)
    }
}
