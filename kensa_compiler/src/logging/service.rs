//! Level filtering and the stock sinks

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for events that passed the level filter
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Applies the minimum level before handing events to a sink
pub struct LoggingService {
    sink: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(sink: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Sink chosen from the runtime preferences: silent, JSON lines or plain
    /// lines on stderr
    pub fn from_preferences() -> Self {
        let sink: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(NullLogger)
        } else if config::use_structured_logging() {
            Arc::new(StderrLogger::json())
        } else {
            Arc::new(StderrLogger::plain())
        };
        Self::new(sink, config::get_min_log_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.enabled(event.level) {
            self.sink.log(&event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineFormat {
    Plain,
    Json,
}

/// Writes to stderr; stdout belongs to scan reports
pub struct StderrLogger {
    format: LineFormat,
}

impl StderrLogger {
    pub fn plain() -> Self {
        Self {
            format: LineFormat::Plain,
        }
    }

    pub fn json() -> Self {
        Self {
            format: LineFormat::Json,
        }
    }
}

impl Logger for StderrLogger {
    fn log(&self, event: &LogEvent) {
        let line = match self.format {
            LineFormat::Plain => event.format(),
            LineFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        };
        eprintln!("{}", line);
    }
}

pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Keeps the most recent events in memory, bounded by `LOG_BUFFER_SIZE`
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Codes in arrival order
    pub fn codes(&self) -> Vec<Code> {
        self.guard().iter().map(|e| e.code).collect()
    }

    pub fn contains(&self, level: LogLevel, code: Code) -> bool {
        self.guard().iter().any(|e| e.level == level && e.code == code)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.guard();
        let capacity = config::get_error_buffer_size();
        if events.len() >= capacity {
            let overflow = events.len() + 1 - capacity;
            events.drain(..overflow);
        }
        events.push(event.clone());
    }
}
