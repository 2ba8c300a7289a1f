//! Host record kept in a JSON file

use kensa_engine::types::{HostRecord, TableRow};
use kensa_engine::{HostRecordStore, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One host record per file. Writes go to a temporary file in the same
/// directory which is then renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whatever record the file holds
    pub fn read_record(&self) -> Result<HostRecord, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Format {
            reason: format!("{}: {}", self.path.display(), e),
        })
    }

    fn read_matching(&self, id: &str) -> Result<HostRecord, StoreError> {
        let record = self.read_record()?;
        if record.id != id {
            return Err(StoreError::RecordNotFound(id.to_string()));
        }
        Ok(record)
    }

    fn write_record(&self, record: &HostRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record).map_err(|e| StoreError::Format {
            reason: e.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl HostRecordStore for JsonFileStore {
    fn load_record(&self, id: &str) -> Result<HostRecord, StoreError> {
        self.read_matching(id)
    }

    fn replace_rows(&mut self, record_id: &str, table: &str, rows: &[TableRow]) -> Result<(), StoreError> {
        let mut record = self.read_matching(record_id)?;
        record.set_rows(table, rows.to_vec());
        self.write_record(&record)
    }
}
