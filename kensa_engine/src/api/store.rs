//! Host-record collaborator

use crate::types::{HostRecord, TableRow};
use kensa_compiler::logging::codes::{self, Code};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    #[error("Store rejected the update: {reason}")]
    Rejected { reason: String },

    #[error("Record format error: {reason}")]
    Format { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn error_code(&self) -> Code {
        match self {
            StoreError::RecordNotFound(_) | StoreError::Format { .. } => {
                codes::persistence::RECORD_FORMAT_ERROR
            }
            StoreError::Rejected { .. } => codes::persistence::STORE_REJECTED,
            StoreError::Io(_) => codes::persistence::STORE_IO,
        }
    }
}

/// Reads host records and replaces an audit table's row collection.
///
/// `replace_rows` is the only write and is treated as atomic: it either
/// stores the full row set or fails without partial effect.
pub trait HostRecordStore {
    fn load_record(&self, id: &str) -> Result<HostRecord, StoreError>;

    fn replace_rows(&mut self, record_id: &str, table: &str, rows: &[TableRow]) -> Result<(), StoreError>;
}

/// In-memory store, mainly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, HostRecord>,
    reject_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: HostRecord) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    /// Make every subsequent write fail
    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn record(&self, id: &str) -> Option<&HostRecord> {
        self.records.get(id)
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl HostRecordStore for MemoryStore {
    fn load_record(&self, id: &str) -> Result<HostRecord, StoreError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound(id.to_string()))
    }

    fn replace_rows(&mut self, record_id: &str, table: &str, rows: &[TableRow]) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Rejected {
                reason: "writes are disabled".to_string(),
            });
        }
        let record = self
            .records
            .get_mut(record_id)
            .ok_or_else(|| StoreError::RecordNotFound(record_id.to_string()))?;
        record.set_rows(table, rows.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_replace_rows() {
        let mut store = MemoryStore::new().with_record(HostRecord::new("r1"));
        store.replace_rows("r1", "log", &[TableRow::default()]).unwrap();

        assert_eq!(store.record("r1").unwrap().rows("log").len(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_rejected_write_leaves_record_untouched() {
        let mut store = MemoryStore::new().with_record(HostRecord::new("r1"));
        store.reject_writes(true);

        let result = store.replace_rows("r1", "log", &[TableRow::default()]);
        assert_matches!(result, Err(StoreError::Rejected { .. }));
        assert!(store.record("r1").unwrap().rows("log").is_empty());
    }

    #[test]
    fn test_unknown_record() {
        let store = MemoryStore::new();
        assert_matches!(store.load_record("nope"), Err(StoreError::RecordNotFound(_)));
    }
}
