//! Structural and schema validation of authoring configurations
//!
//! Each pass returns every problem it finds so a single compile reports the
//! whole list.

mod error;
mod fields;
mod references;

pub use error::{CompileError, CompileErrors};
pub use fields::validate_fields;
pub use references::validate_references;
