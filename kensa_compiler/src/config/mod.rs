//! Configuration module for Kensa
//!
//! `constants` holds the hard limits every deployment shares; `runtime`
//! holds user preferences read from the environment.

pub mod constants;
pub mod runtime;

pub use runtime::{EnginePreferences, LoggingPreferences};
