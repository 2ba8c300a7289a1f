//! Configuration compile errors

use crate::logging::codes;
use crate::model::CellKind;
use std::fmt;

/// A single problem found while loading or compiling a configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Cannot read configuration file {path}: {reason}")]
    FileUnreadable { path: String, reason: String },

    #[error("Malformed {format} configuration: {reason}")]
    Format { format: &'static str, reason: String },

    #[error("Configuration file too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Field #{index}: invalid name or label: {reason}")]
    InvalidFieldName { index: usize, reason: String },

    #[error("Duplicate field name '{name}'")]
    DuplicateField { name: String },

    #[error("Too many fields: {count} (max: {max})")]
    TooManyFields { count: usize, max: usize },

    #[error("Field '{field}': invalid extraction spec: {reason}")]
    InvalidExtractionSpec { field: String, reason: String },

    #[error("Field '{field}': {slot} has {count} entries (max: {max})")]
    TooManySlots {
        field: String,
        slot: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Invalid delimiter pattern '{pattern}': {reason}")]
    InvalidDelimiter { pattern: String, reason: String },

    #[error("{location} references undefined code '{code}'")]
    UndefinedReference { location: String, code: String },

    #[error("{location}: code '{code}' is {actual}, expected {expected}")]
    IncompatibleCellKind {
        location: String,
        code: String,
        actual: CellKind,
        expected: String,
    },

    #[error("Undefined audit table '{code}'")]
    UndefinedTable { code: String },
}

impl CompileError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> codes::Code {
        match self {
            CompileError::FileUnreadable { .. } => codes::config::CONFIG_FILE_UNREADABLE,
            CompileError::Format { .. } => codes::config::CONFIG_FORMAT_ERROR,
            CompileError::TooLarge { .. } => codes::config::CONFIG_TOO_LARGE,
            CompileError::InvalidFieldName { .. } => codes::config::INVALID_FIELD_NAME,
            CompileError::DuplicateField { .. } => codes::config::DUPLICATE_FIELD,
            CompileError::TooManyFields { .. } => codes::config::TOO_MANY_FIELDS,
            CompileError::InvalidExtractionSpec { .. } => codes::config::INVALID_EXTRACTION_SPEC,
            CompileError::TooManySlots { .. } => codes::config::TOO_MANY_SLOTS,
            CompileError::InvalidDelimiter { .. } => codes::config::INVALID_DELIMITER,
            CompileError::UndefinedReference { .. } => codes::config::UNDEFINED_REFERENCE,
            CompileError::IncompatibleCellKind { .. } => codes::config::INCOMPATIBLE_CELL_KIND,
            CompileError::UndefinedTable { .. } => codes::config::UNDEFINED_TABLE,
        }
    }

    pub fn severity(&self) -> codes::Severity {
        codes::severity(self.error_code().as_str())
    }
}

/// Every problem found in one compile pass
#[derive(Debug, Clone, PartialEq)]
pub struct CompileErrors(Vec<CompileError>);

impl CompileErrors {
    pub fn new(errors: Vec<CompileError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_code(&self, code: codes::Code) -> bool {
        self.0.iter().any(|e| e.error_code() == code)
    }

    pub fn into_inner(self) -> Vec<CompileError> {
        self.0
    }
}

impl From<CompileError> for CompileErrors {
    fn from(error: CompileError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  [{}] {}", error.error_code(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}
