//! Compile-time limits

pub mod compile_time {
    pub mod config_file {
        /// Maximum configuration file size (1 MiB)
        /// SECURITY: Prevents memory exhaustion via oversized config files
        pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

        /// Maximum number of field definitions in one configuration
        pub const MAX_FIELDS: usize = 64;

        /// Maximum label length in characters
        pub const MAX_LABEL_LENGTH: usize = 128;
    }

    pub mod judging {
        /// Number of condition slots per field
        pub const CONDITION_SLOTS: usize = 5;

        /// Number of AND/OR join slots per field (one between each pair of slots)
        pub const JOIN_SLOTS: usize = CONDITION_SLOTS - 1;

        /// Fixed offset applied to date and datetime values (+09:00)
        pub const UTC_OFFSET_SECONDS: i32 = 9 * 60 * 60;

        /// Default separator between reasons in the audit row
        pub const DEFAULT_REASON_SEPARATOR: &str = " / ";
    }

    pub mod scan {
        /// Maximum accepted scan length in characters
        /// SECURITY: Bounds regex and tokenizer work per scan
        pub const MAX_SCAN_LENGTH: usize = 4096;
    }

    pub mod logging {
        /// In-memory log buffer size
        pub const LOG_BUFFER_SIZE: usize = 1000;

        /// Maximum length of a logged message before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 2048;
    }
}

pub use compile_time::config_file::*;
pub use compile_time::judging::*;
pub use compile_time::logging::*;
pub use compile_time::scan::*;
