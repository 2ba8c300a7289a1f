//! # Kensa scan engine
//!
//! Runtime half of the workspace: turns a raw scan string into typed field
//! values, judges each field against operands and operators read from a host
//! record, and appends one audit row per accepted scan.

pub mod api;
pub mod coercion;
pub mod execution;
pub mod parser;
pub mod resolution;
pub mod results;
pub mod types;

// Convenience re-exports
pub use api::*;

pub mod prelude {
    pub use crate::api::{
        Clock, Explanation, FixedClock, HostRecordStore, MemoryStore, ScanReport, ScanSession,
        SessionError, StoreError, SystemClock,
    };

    pub use crate::coercion::{coerce, CoercionError};
    pub use crate::execution::{evaluate, Evaluation, FieldAggregator};
    pub use crate::parser::{create_parser, parse_scan, ParseError, ParsedScan, ScanParser};
    pub use crate::resolution::{JudgePlan, ResolutionError};
    pub use crate::results::{ConditionResult, FieldVerdict, ResultTag, ScanOutcome};

    pub use crate::types::{
        Cell, CellKind, HostRecord, JoinOp, Operator, ParsedValue, Policy, RecordSchemaExt,
        ScanMode, TableRow, TimeOfDay, ValueKind, ValueKindExt,
    };

    pub use kensa_compiler::{compile, compile_file, CompiledConfig, HostSchema};
}
