//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Classification error codes
pub mod classification {
    use super::Code;

    pub const UNSUPPORTED_TOKEN: Code = Code::new("E020");
    pub const UNSUPPORTED_KEYWORD: Code = Code::new("E021");
    pub const UNSUPPORTED_OPERATOR: Code = Code::new("E022");
}

/// Literal context and decoding error codes
pub mod literal {
    use super::Code;

    pub const UNBALANCED_CONTEXT: Code = Code::new("E030");
    pub const UNKNOWN_DELIMITER: Code = Code::new("E031");
    pub const INVALID_ESCAPE: Code = Code::new("E032");
    pub const CONTEXT_TOO_DEEP: Code = Code::new("E033");
    pub const CONTENT_TOO_LARGE: Code = Code::new("E034");
}

/// Raw stream parsing error codes
pub mod raw_stream {
    use super::Code;

    pub const INVALID_JSON: Code = Code::new("E040");
    pub const EMPTY_STREAM: Code = Code::new("E041");
    pub const MALFORMED_RECORD: Code = Code::new("E042");
    pub const TOO_MANY_TOKENS: Code = Code::new("E043");
    pub const TOKEN_TEXT_TOO_LARGE: Code = Code::new("E044");
}

/// Warning codes
pub mod warnings {
    use super::Code;

    pub const DANGLING_LITERAL_CONTEXT: Code = Code::new("W010");
    pub const INVALID_ENCODING_CONTENT: Code = Code::new("W011");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Raw stream success codes
    pub const STREAM_PARSING_COMPLETE: Code = Code::new("I020");

    // Normalization success codes
    pub const NORMALIZATION_COMPLETE: Code = Code::new("I030");

    // Pipeline success codes
    pub const PIPELINE_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Token dump file not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Token dump does not have .json extension",
                "Rename file with .json extension or verify file type",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Token dump exceeds maximum size limit",
                "Reduce dump size or lex the source in smaller units",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Token dump is empty when content expected",
                "Provide a dump with content or check lexer output",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing token dump",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in token dump",
                "Re-serialize the lexer output as UTF-8 JSON",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path provided",
                "Provide a valid file path",
            ),
        );

        // Classification errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Classification",
                Severity::High,
                false,
                true,
                "Raw category/text pair outside the closed classification tables",
                "Extend the category mapping table with the new raw category",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Classification",
                Severity::High,
                false,
                true,
                "Keyword spelling missing from the keyword table",
                "Extend the keyword table with the new reserved word",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Classification",
                Severity::High,
                false,
                true,
                "Operator spelling missing from the operator table",
                "Extend the operator table with the new spelling",
            ),
        );

        // Literal context and decoding errors
        registry.insert(
            "E030",
            ErrorMetadata::new(
                "E030",
                "Literal",
                Severity::Critical,
                false,
                true,
                "Literal end marker or content with no open context",
                "Verify the raw stream is complete and the classifier tables are coherent",
            ),
        );
        registry.insert(
            "E031",
            ErrorMetadata::new(
                "E031",
                "Literal",
                Severity::High,
                false,
                true,
                "No decoding policy for the literal delimiter spelling",
                "Add the delimiter style to the decoder policy table",
            ),
        );
        registry.insert(
            "E032",
            ErrorMetadata::new(
                "E032",
                "Literal",
                Severity::Medium,
                false,
                true,
                "Malformed escape sequence in string content",
                "Check the lexer output for truncated or corrupt content tokens",
            ),
        );
        registry.insert(
            "E033",
            ErrorMetadata::new(
                "E033",
                "Literal",
                Severity::Medium,
                false,
                true,
                "Literal context nesting exceeds maximum depth",
                "Reduce interpolation nesting or raise the compile-time bound",
            ),
        );
        registry.insert(
            "E034",
            ErrorMetadata::new(
                "E034",
                "Literal",
                Severity::Medium,
                false,
                true,
                "Decoded string content exceeds maximum size",
                "Split the literal or raise the compile-time bound",
            ),
        );

        // Raw stream errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "RawStream",
                Severity::Medium,
                false,
                true,
                "Token dump is not valid JSON",
                "Re-serialize the lexer output",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "RawStream",
                Severity::Medium,
                true,
                false,
                "Token dump contains no records",
                "Provide lexer output for a non-empty source file",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "RawStream",
                Severity::Medium,
                false,
                true,
                "Token record does not match the (position, category, text) shape",
                "Check the serializer producing the dump",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "RawStream",
                Severity::High,
                false,
                true,
                "Dump contains too many token records",
                "Reduce input size or raise the compile-time bound",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "RawStream",
                Severity::Medium,
                false,
                true,
                "Single token text exceeds maximum size",
                "Check the lexer output for runaway literals",
            ),
        );

        // Success codes referenced by startup validation
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File processing completed successfully",
                "Continue to next processing stage",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_error_codes_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_EXTENSION,
            file_processing::FILE_TOO_LARGE,
            file_processing::EMPTY_FILE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            classification::UNSUPPORTED_TOKEN,
            classification::UNSUPPORTED_KEYWORD,
            classification::UNSUPPORTED_OPERATOR,
            literal::UNBALANCED_CONTEXT,
            literal::UNKNOWN_DELIMITER,
            literal::INVALID_ESCAPE,
            literal::CONTEXT_TOO_DEEP,
            literal::CONTENT_TOO_LARGE,
            raw_stream::INVALID_JSON,
            raw_stream::EMPTY_STREAM,
            raw_stream::MALFORMED_RECORD,
            raw_stream::TOO_MANY_TOKENS,
            raw_stream::TOKEN_TEXT_TOO_LARGE,
        ];

        for code in &codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
            assert_ne!(get_description(code.as_str()), "Unknown error");
        }
    }

    #[test]
    fn test_classification_codes_are_fatal() {
        assert!(requires_halt(classification::UNSUPPORTED_TOKEN.as_str()));
        assert!(requires_halt(classification::UNSUPPORTED_OPERATOR.as_str()));
        assert!(!is_recoverable(classification::UNSUPPORTED_KEYWORD.as_str()));
    }

    #[test]
    fn test_unbalanced_context_is_critical() {
        assert_eq!(
            get_severity(literal::UNBALANCED_CONTEXT.as_str()),
            Severity::Critical
        );
        assert_eq!(get_category(literal::UNBALANCED_CONTEXT.as_str()), "Literal");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }
}
