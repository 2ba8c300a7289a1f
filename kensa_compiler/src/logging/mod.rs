//! Code-tagged logging shared by the compiler, the engine and the CLI
//!
//! One global [`LoggingService`] is installed per process. While a scan is
//! being processed its ids sit in a thread-local [`ScanContext`] and are
//! attached to every event logged through the macros.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{Logger, LoggingService, MemoryLogger, NullLogger, StderrLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Identity of the scan currently being processed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub scan_id: String,
    pub record_id: String,
}

impl ScanContext {
    pub fn new(scan_id: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            scan_id: scan_id.into(),
            record_id: record_id.into(),
        }
    }
}

thread_local! {
    static SCAN_CONTEXT: RefCell<Option<ScanContext>> = const { RefCell::new(None) };
}

/// Install the preference-driven service as the global logger
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let service = Arc::new(LoggingService::from_preferences());
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

/// Install a caller-built service, e.g. one forwarding to another facade
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// `None` until one of the init functions ran
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Set scan context for current thread
pub fn set_scan_context(context: ScanContext) {
    SCAN_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

/// Clear scan context for current thread
pub fn clear_scan_context() {
    SCAN_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with scan context
pub fn with_scan_context<F, R>(context: ScanContext, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_scan_context();
    set_scan_context(context);
    let result = f();
    match previous {
        Some(prev) => set_scan_context(prev),
        None => clear_scan_context(),
    }
    result
}

/// Get current scan context (used by macros)
pub fn get_current_scan_context() -> Option<ScanContext> {
    SCAN_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_scan_context(event: LogEvent) -> LogEvent {
    if !config::include_scan_context() {
        return event;
    }
    match get_current_scan_context() {
        Some(scan) => event
            .with_context("scan_id", &scan.scan_id)
            .with_context("record_id", &scan.record_id),
        None => event,
    }
}

/// Route a prepared event through the global logger (used by macros)
pub fn log_event_with_scan_context(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_scan_context(event));
    }
}

fn with_pairs(event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, value))
}

/// Backs `log_error!`; long messages are truncated
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let event = LogEvent::error(code, &config::truncate_message(message));
    log_event_with_scan_context(with_pairs(event, context));
}

/// Backs `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    log_event_with_scan_context(with_pairs(LogEvent::success(code, message), context));
}

/// Backs `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    log_event_with_scan_context(with_pairs(LogEvent::info(message), context));
}
