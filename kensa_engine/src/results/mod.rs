//! Verdict types and audit rows

pub mod audit;
pub mod types;

pub use audit::{prune_blank_rows, AuditRowBuilder};
pub use types::{ConditionResult, FieldVerdict, ResultTag, ScanOutcome};
