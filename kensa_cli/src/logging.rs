//! Routes kensa log events into the `log` facade

use kensa_compiler::config::runtime::{LogLevel as PreferenceLevel, LoggingPreferences};
use kensa_compiler::logging::{self, config, LogEvent, LogLevel, Logger, LoggingService, NullLogger};
use std::sync::Arc;

const TARGET: &str = "kensa";

/// Forwards every event to `log::log!`; the installed `log` backend decides
/// where it lands
pub struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        log::log!(target: TARGET, bridge_level(event.level), "{}", event.format_bare());
    }
}

fn bridge_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
    }
}

fn filter_for(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warning => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    }
}

/// `-v` raises the environment level to info, `-vv` to debug
fn apply_verbosity(mut preferences: LoggingPreferences, verbosity: u8) -> LoggingPreferences {
    let requested = match verbosity {
        0 => preferences.min_log_level,
        1 => PreferenceLevel::Info,
        _ => PreferenceLevel::Debug,
    };
    preferences.min_log_level = preferences.min_log_level.max(requested);
    preferences
}

/// Install runtime preferences and the global logger.
///
/// Structured mode keeps the JSON-lines logger; otherwise events go through
/// env_logger, which still honours `RUST_LOG` when it is set.
pub fn init(verbosity: u8) -> Result<(), String> {
    let preferences = apply_verbosity(LoggingPreferences::default(), verbosity);
    config::init_runtime_preferences(preferences.clone())?;

    if preferences.use_structured_logging {
        return logging::init_global_logging();
    }

    let level = preferences.min_log_level.to_events_log_level();
    if !preferences.enable_console_logging {
        return logging::init_global_logging_with_service(Arc::new(LoggingService::new(
            Arc::new(NullLogger),
            level,
        )));
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_for(level)))
        .format_target(false)
        .try_init()
        .map_err(|e| format!("Cannot install log backend: {}", e))?;

    logging::init_global_logging_with_service(Arc::new(LoggingService::new(
        Arc::new(LogBridge),
        level,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(bridge_level(LogLevel::Warning), log::Level::Warn);
        assert_eq!(bridge_level(LogLevel::Debug), log::Level::Debug);
        assert_eq!(filter_for(LogLevel::Error), "error");
    }

    #[test]
    fn test_verbosity_only_raises() {
        let mut preferences = LoggingPreferences::default();
        preferences.min_log_level = PreferenceLevel::Warning;

        assert_eq!(apply_verbosity(preferences.clone(), 0).min_log_level, PreferenceLevel::Warning);
        assert_eq!(apply_verbosity(preferences.clone(), 1).min_log_level, PreferenceLevel::Info);
        assert_eq!(apply_verbosity(preferences.clone(), 3).min_log_level, PreferenceLevel::Debug);

        preferences.min_log_level = PreferenceLevel::Debug;
        assert_eq!(apply_verbosity(preferences, 1).min_log_level, PreferenceLevel::Debug);
    }
}
