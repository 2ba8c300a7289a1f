//! # Session Errors

use super::store::StoreError;
use crate::parser::ParseError;
use crate::resolution::ResolutionError;
use kensa_compiler::logging::codes::{self, Code};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The scan was rejected; nothing was appended
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// The store refused the new row set; in-memory rows are unchanged
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl SessionError {
    pub fn error_code(&self) -> Code {
        match self {
            SessionError::Parse(e) => e.error_code(),
            SessionError::Resolution(e) => e.error_code(),
            SessionError::Persistence(e) => e.error_code(),
        }
    }

    /// Whether the next scan can still be submitted to the same session
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability_follows_code_disposition() {
        assert!(SessionError::from(ParseError::Empty).is_recoverable());
        assert!(SessionError::from(StoreError::Rejected { reason: "busy".to_string() }).is_recoverable());

        let malformed = SessionError::from(StoreError::Format { reason: "bad json".to_string() });
        assert!(!malformed.is_recoverable());

        let unknown = SessionError::from(ResolutionError::UnknownOperator {
            field: "qty".to_string(),
            slot: 0,
            label: "??".to_string(),
        });
        assert!(!unknown.is_recoverable());
    }
}
