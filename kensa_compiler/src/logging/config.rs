//! Logging preferences access
//!
//! Preferences are installed once. The first read without an explicit
//! install freezes the environment-derived defaults.

use crate::config::constants::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already initialized".to_string())
}

fn preferences() -> &'static LoggingPreferences {
    PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

/// Whether events logged during a scan carry its scan and record ids
pub fn include_scan_context() -> bool {
    preferences().include_scan_context
}

/// Capacity of `MemoryLogger`
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Cut to `MAX_LOG_MESSAGE_LENGTH` characters, marking the cut with `...`
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(MAX_LOG_MESSAGE_LENGTH).collect();
    truncated.push_str("...");
    truncated
}

pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("Log buffer size must be greater than 0".to_string());
    }
    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Maximum log message length must be greater than 0".to_string());
    }
    Ok(())
}
