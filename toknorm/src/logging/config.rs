//! Configuration module for logging - using compile-time constants
//!
//! Security boundaries are enforced at compile time and cannot be modified at
//! runtime; user preferences adjust verbosity and output format within them.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

// Type alias for clarity
type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Validate runtime preferences against security constraints
fn validate_preferences(_preferences: &LoggingPreferences) -> Result<(), String> {
    // Level bounds are enforced by promotion in get_min_log_level
    Ok(())
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (respects user preference within security bounds)
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();

    // Warnings carry the fatal-context diagnostics and must stay visible
    if (user_level as u8) < SECURITY_MIN_LOG_LEVEL {
        EventsLogLevel::Warning
    } else {
        user_level
    }
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Check if performance events should be logged (user preference)
pub fn log_performance_events() -> bool {
    get_runtime_preferences().log_performance_events
}

/// Check if cargo-style error output is enabled (user preference)
pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

/// Get error buffer size (compile-time security constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log events per file (compile-time security constant)
pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Get maximum log message length (compile-time security constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Validate the logging configuration at startup
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("LOG_BUFFER_SIZE cannot be zero".to_string());
    }
    if MAX_LOG_EVENTS_PER_FILE == 0 {
        return Err("MAX_LOG_EVENTS_PER_FILE cannot be zero".to_string());
    }
    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("MAX_LOG_EVENTS_PER_FILE cannot exceed LOG_BUFFER_SIZE".to_string());
    }

    Ok(())
}

/// Get a human-readable configuration summary
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();
    format!(
        "=== Logging Configuration ===\n\
         Min level: {}\n\
         Structured: {}\n\
         Console: {}\n\
         Cargo-style output: {}\n\
         Buffer size: {}\n\
         Max events per file: {}",
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.enable_cargo_style_output,
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_FILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.contains("Logging Configuration"));
        assert!(summary.contains("Buffer size"));
    }

    #[test]
    fn test_buffer_sizes() {
        assert!(get_error_buffer_size() > 0);
        assert!(get_max_log_events_per_file() > 0);
        assert!(get_max_log_message_length() > 0);
    }
}
