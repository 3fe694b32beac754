//! Error collector for per-file processing with cargo-style output
//!
//! Provides organized error collection and reporting grouped by input file.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of processing results across files
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector keyed by input file
pub struct ErrorCollector {
    /// Events organized by file path for cargo-style output
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,

    /// Processing contexts for timing information
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,

    /// Global processing start time
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.file_events.lock().unwrap();

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            let summary_event = LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            ));
            file_events.push(summary_event);
        }
    }

    /// Record file processing context
    pub fn record_file_context(&self, context: FileProcessingContext) {
        let mut contexts = self.file_contexts.lock().unwrap();
        contexts.insert(context.file_path.clone(), context);
    }

    /// Get all events for a specific file
    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        let events = self.file_events.lock().unwrap();
        events.get(file_path).cloned().unwrap_or_default()
    }

    /// Get errors for a specific file
    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        let events = self.file_events.lock().unwrap();
        events
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    /// Get all file events (for cargo-style output)
    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.file_events.lock().unwrap().clone()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.file_events.lock().unwrap();

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for file_events in events.values() {
            let has_errors = file_events.iter().any(|e| e.is_error());
            let has_warnings = file_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_files += 1;
            } else if has_warnings {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            for event in file_events {
                if event.is_error() {
                    summary.total_errors += 1;
                } else if event.is_warning() {
                    summary.total_warnings += 1;
                }
            }
        }

        summary
    }

    /// Get error count for a specific file
    pub fn get_file_error_count(&self, file_path: &Path) -> usize {
        let events = self.file_events.lock().unwrap();
        events
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).count())
            .unwrap_or(0)
    }

    /// Check if a file has any errors
    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        self.get_file_error_count(file_path) > 0
    }

    /// Get critical errors (errors that require halting)
    pub fn get_critical_errors(&self) -> Vec<(PathBuf, LogEvent)> {
        let events = self.file_events.lock().unwrap();
        let mut critical_errors = Vec::new();

        for (path, file_events) in events.iter() {
            for event in file_events {
                if event.is_error() && event.requires_halt() {
                    critical_errors.push((path.clone(), event.clone()));
                }
            }
        }

        critical_errors
    }

    /// Clear all collected data
    pub fn clear(&self) {
        let mut events = self.file_events.lock().unwrap();
        let mut contexts = self.file_contexts.lock().unwrap();
        events.clear();
        contexts.clear();
    }

    /// Get total event count across all files
    pub fn total_event_count(&self) -> usize {
        let events = self.file_events.lock().unwrap();
        events.values().map(|v| v.len()).sum()
    }

    /// Get capacity information (using compile-time constants)
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        let percentage = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, percentage)
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format errors in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();
    let all_events = collector.get_all_file_events();

    // Print errors grouped by file
    for (file_path, events) in &all_events {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if !error_events.is_empty() || !warning_events.is_empty() {
            output.push_str(&format!("Checking {}...\n", file_path.display()));

            for event in error_events {
                let position_info = event
                    .position
                    .map(|p| format!(" --> {}:{}:{}", file_path.display(), p.line, p.column))
                    .unwrap_or_default();

                output.push_str(&format!(
                    "error[{}]: {}{}\n",
                    event.code.as_str(),
                    event.message,
                    position_info
                ));

                output.push_str(&format!(
                    "  = severity: {}, category: {}\n",
                    event.severity(),
                    event.category()
                ));

                if !event.context.is_empty() {
                    output.push_str("  |\n");
                    for (key, value) in &event.context {
                        if key != "file" && key != "file_id" {
                            output.push_str(&format!("  = {}: {}\n", key, value));
                        }
                    }
                }

                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }

            for event in warning_events {
                let position_info = event
                    .position
                    .map(|p| format!(" --> {}:{}:{}", file_path.display(), p.line, p.column))
                    .unwrap_or_default();

                output.push_str(&format!(
                    "warning[{}]: {}{}\n",
                    event.code.as_str(),
                    event.message,
                    position_info
                ));

                if !event.context.is_empty() {
                    for (key, value) in &event.context {
                        if key != "file" && key != "file_id" {
                            output.push_str(&format!("  = {}: {}\n", key, value));
                        }
                    }
                }
            }

            output.push('\n');
        }
    }

    // Add summary
    let summary = collector.get_summary();

    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use std::path::PathBuf;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();

        let file_path = PathBuf::from("test.json");
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error");

        collector.record_event(&file_path, event);

        let events = collector.get_file_events(&file_path);
        assert_eq!(events.len(), 1);
        assert!(collector.file_has_errors(&file_path));
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();

        let file1 = PathBuf::from("file1.json");
        let file2 = PathBuf::from("file2.json");

        collector.record_event(
            &file1,
            LogEvent::error(codes::classification::UNSUPPORTED_TOKEN, "Error"),
        );
        collector.record_event(&file2, LogEvent::warning("Warning"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_critical_errors() {
        let collector = ErrorCollector::new();

        let file_path = PathBuf::from("test.json");
        let critical_event = LogEvent::error(codes::literal::UNBALANCED_CONTEXT, "Critical error");
        let normal_event =
            LogEvent::error(codes::file_processing::INVALID_EXTENSION, "Normal error");

        collector.record_event(&file_path, critical_event);
        collector.record_event(&file_path, normal_event);

        let critical_errors = collector.get_critical_errors();
        assert_eq!(critical_errors.len(), 1);
        assert_eq!(critical_errors[0].1.code.as_str(), "E030");
    }

    #[test]
    fn test_cargo_style_formatting() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("test.json");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::classification::UNSUPPORTED_OPERATOR, "unsupported op")
                .with_position(crate::utils::Position::new(2, 4)),
        );

        let formatted = format_cargo_style_errors(&collector);
        assert!(formatted.contains("Checking test.json"));
        assert!(formatted.contains("error[E022]"));
        assert!(formatted.contains("test.json:2:4"));
        assert!(formatted.contains("Total errors: 1"));
    }

    #[test]
    fn test_capacity_limits() {
        let collector = ErrorCollector::new();

        let (current, max, _) = collector.get_capacity_info();
        assert_eq!(current, 0);
        assert_eq!(max, LOG_BUFFER_SIZE);
    }
}
