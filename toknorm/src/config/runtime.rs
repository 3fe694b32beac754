// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .json extension on token dumps (user preference, not security)
    pub require_json_extension: bool,

    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,

    /// Whether to log debug information for non-.json inputs
    pub log_non_json_processing: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_json_extension: env::var("TOKNORM_REQUIRE_JSON_EXTENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var("TOKNORM_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_non_json_processing: env::var("TOKNORM_LOG_NON_JSON_PROCESSING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizePreferences {
    /// Whether to collect detailed per-class token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to track canonical kind usage patterns
    pub track_kind_patterns: bool,

    /// Whether to log every literal context push/pop
    pub log_context_transitions: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for NormalizePreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("TOKNORM_NORMALIZE_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_kind_patterns: env::var("TOKNORM_NORMALIZE_TRACK_KINDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_context_transitions: env::var("TOKNORM_NORMALIZE_LOG_CONTEXTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var("TOKNORM_NORMALIZE_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within security constraints)
    /// Note: Security events will still be logged regardless of this setting
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("TOKNORM_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("TOKNORM_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("TOKNORM_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var("TOKNORM_LOGGING_LOG_PERFORMANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var("TOKNORM_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var("TOKNORM_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub normalize: NormalizePreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_JSON_EXTENSION: &str = "TOKNORM_REQUIRE_JSON_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "TOKNORM_ENABLE_PERFORMANCE_LOGGING";
    pub const LOG_NON_JSON_PROCESSING: &str = "TOKNORM_LOG_NON_JSON_PROCESSING";

    // Normalize
    pub const NORMALIZE_DETAILED_METRICS: &str = "TOKNORM_NORMALIZE_DETAILED_METRICS";
    pub const NORMALIZE_TRACK_KINDS: &str = "TOKNORM_NORMALIZE_TRACK_KINDS";
    pub const NORMALIZE_LOG_CONTEXTS: &str = "TOKNORM_NORMALIZE_LOG_CONTEXTS";
    pub const NORMALIZE_INCLUDE_POSITIONS: &str = "TOKNORM_NORMALIZE_INCLUDE_POSITIONS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TOKNORM_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TOKNORM_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TOKNORM_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "TOKNORM_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "TOKNORM_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "TOKNORM_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        // Verify all env var names are properly defined
        assert!(!env_vars::ENABLE_PERFORMANCE_LOGGING.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::NORMALIZE_DETAILED_METRICS.is_empty());
    }
}
