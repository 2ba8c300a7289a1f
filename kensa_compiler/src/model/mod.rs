//! Configuration and host-schema model
//!
//! These are the authoritative types shared by the compiler and the engine.

pub mod definition;
pub mod kinds;
pub mod operators;
pub mod schema;

pub use definition::{FieldDefinition, JudgeRefs, ModeParams, RawConfig, TableMapping};
pub use kinds::{CellKind, Policy, ScanMode, ValueKind};
pub use operators::{is_unspecified_label, JoinOp, Operator};
pub use schema::{HostSchema, TableSchema};
