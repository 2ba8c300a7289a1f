//! Preferences read from `KENSA_*` environment variables

use crate::config::constants::DEFAULT_REASON_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the console
    pub min_log_level: LogLevel,

    /// Whether events carry the current scan id
    pub include_scan_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::STRUCTURED_LOGGING, false),
            enable_console_logging: env_flag(env_vars::CONSOLE_LOGGING, true),
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_scan_context: env_flag(env_vars::INCLUDE_SCAN_CONTEXT, true),
        }
    }
}

/// `true`/`false` (also `1`/`0`, `yes`/`no`); anything else keeps the default
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePreferences {
    /// Separator placed between reasons in the audit row's reasons cell
    pub reason_separator: String,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            reason_separator: env::var(env_vars::REASON_SEPARATOR)
                .ok()
                .map(|v| unescape_separator(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REASON_SEPARATOR.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

impl From<crate::logging::events::LogLevel> for LogLevel {
    fn from(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

fn parse_log_level(s: &str) -> Option<LogLevel> {
    crate::logging::events::LogLevel::parse(s).map(LogLevel::from)
}

/// Shells make a literal newline awkward, so `\n` and `\t` are expanded.
fn unescape_separator(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\t", "\t")
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LOG_LEVEL: &str = "KENSA_LOG_LEVEL";
    pub const STRUCTURED_LOGGING: &str = "KENSA_STRUCTURED_LOGGING";
    pub const CONSOLE_LOGGING: &str = "KENSA_CONSOLE_LOGGING";
    pub const INCLUDE_SCAN_CONTEXT: &str = "KENSA_INCLUDE_SCAN_CONTEXT";
    pub const REASON_SEPARATOR: &str = "KENSA_REASON_SEPARATOR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("Info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_unescape_separator() {
        assert_eq!(unescape_separator("\\n"), "\n");
        assert_eq!(unescape_separator(" | "), " | ");
    }

    #[test]
    fn test_level_conversion() {
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::events::LogLevel::Debug
        );
    }
}
