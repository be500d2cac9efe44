//! Persistence boundary for the reading ledger.
//!
//! Stores exchange the whole record collection; there is no delta protocol.

use super::record::ReadingRecord;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Whole-collection storage for reading records.
pub trait ReadingStore {
    /// Load every persisted record.
    fn load_all(&self) -> Result<Vec<ReadingRecord>>;

    /// Replace the persisted collection with `records`.
    fn save_all(&mut self, records: &[ReadingRecord]) -> Result<()>;
}

/// In-memory store, mainly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ReadingRecord>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_records(records: Vec<ReadingRecord>) -> Self {
        Self { records, saves: 0 }
    }

    /// How many times `save_all` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ReadingStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<ReadingRecord>> {
        Ok(self.records.clone())
    }

    fn save_all(&mut self, records: &[ReadingRecord]) -> Result<()> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// JSON array file store.
///
/// A missing file loads as an empty collection. Saves go through a sibling
/// temporary file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ReadingStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<ReadingRecord>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    fn save_all(&mut self, records: &[ReadingRecord]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Saved {} reading records to {}", records.len(), self.path.display());
        Ok(())
    }
}
