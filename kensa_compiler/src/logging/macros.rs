//! Logging macros. Context values accept anything implementing `Display`.

/// Attach `key => value` pairs to an event and route it through the global
/// logger with the current scan context
#[doc(hidden)]
#[macro_export]
macro_rules! __kensa_emit {
    ($event:expr $(, $key:expr => $value:expr)*) => {{
        #[allow(unused_mut)]
        let mut event = $event;
        $(
            event = event.with_context($key, &format!("{}", $value));
        )*
        $crate::logging::log_event_with_scan_context(event)
    }};
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__kensa_emit!(
            $crate::logging::LogEvent::error($code, &$crate::logging::config::truncate_message($message))
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__kensa_emit!($crate::logging::LogEvent::success($code, $message) $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__kensa_emit!($crate::logging::LogEvent::info($message) $(, $key => $value)*)
    };
}

/// `log_warning!(code = CODE, "message", ...)` or an uncoded `log_warning!("message", ...)`
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__kensa_emit!($crate::logging::LogEvent::warning($code, $message) $(, $key => $value)*)
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__kensa_emit!($crate::logging::LogEvent::uncoded_warning($message) $(, $key => $value)*)
    };
}

/// Context values are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__kensa_emit!($crate::logging::LogEvent::debug($message) $(, $key => $value)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macros_do_not_panic_without_logger() {
        let tokens: usize = 3;

        log_error!(codes::parse::INSUFFICIENT_TOKENS, "Too few tokens",
            "required" => 4,
            "actual" => tokens
        );
        log_error!(codes::system::INTERNAL_ERROR, "bare");
        log_success!(codes::success::SCAN_PARSED, "Scan parsed", "fields" => 2);
        log_info!("Judging scan", "policy" => "strict");
        log_info!("Idle");
        log_warning!("Key not found", "label" => "ロット");
        log_warning!(code = codes::parse::KEY_NOT_FOUND, "Key not found", "label" => "ロット");
        log_debug!("Coerced value", "kind" => "number", "value" => 1.5);
    }
}
