//! # Kensa configuration compiler
//!
//! Loads scan-verification configurations (JSON or TOML), validates them
//! against a host-record schema and produces the immutable
//! [`CompiledConfig`] the engine runs on. Also home to the shared logging
//! system and compile-time limits.

#[macro_use]
pub mod logging;
pub mod compiled;
pub mod config;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod validation;

pub use compiled::{
    AuditTable, ColumnTarget, CompiledConfig, CompiledField, Extraction, JudgeSlots,
};
pub use model::{
    CellKind, FieldDefinition, HostSchema, JoinOp, Operator, Policy, RawConfig, ScanMode,
    TableMapping, ValueKind,
};
pub use pipeline::{compile, compile_file, compile_with_preferences};
pub use validation::{CompileError, CompileErrors};
