//! Engine value types
//!
//! Configuration enums are re-exported from the compiler, which owns them;
//! this module adds the runtime representations built on top.

pub use kensa_compiler::model::{CellKind, JoinOp, Operator, Policy, ScanMode, ValueKind};

pub mod cell;
pub mod common;
pub mod record;
pub mod value;

pub use cell::Cell;
pub use common::ValueKindExt;
pub use record::{HostRecord, RecordSchemaExt, TableRow};
pub use value::{jst, ParsedValue, TimeOfDay};
