//! Normalization module
//!
//! Converts the filtered raw token sequence into the canonical vocabulary in
//! a single pass: classification, literal context tracking, and content
//! decoding. This is the core of the tool; everything around it is transport.

pub mod normalizer;

use crate::config::compile_time::normalize::*;
use crate::config::runtime::NormalizePreferences;
use crate::tokens::{CanonicalToken, RawToken};

pub use normalizer::{NormalizeError, NormalizeMetrics, Normalizer};

// ============================================================================
// MODULE API
// ============================================================================

/// Normalize a raw token sequence with default preferences
pub fn normalize_stream(raw_tokens: &[RawToken]) -> Result<Vec<CanonicalToken>, NormalizeError> {
    let mut normalizer = Normalizer::new();
    normalizer.normalize(raw_tokens)
}

/// Normalize with custom runtime preferences
pub fn normalize_stream_with_preferences(
    raw_tokens: &[RawToken],
    preferences: NormalizePreferences,
) -> Result<Vec<CanonicalToken>, NormalizeError> {
    let mut normalizer = Normalizer::with_preferences(preferences);
    normalizer.normalize(raw_tokens)
}

/// Create a new normalizer with default preferences
pub fn create_normalizer() -> Normalizer {
    Normalizer::new()
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Validate error code registration and table coherence at startup
pub fn init_normalize_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::classification::UNSUPPORTED_TOKEN,
        crate::logging::codes::classification::UNSUPPORTED_KEYWORD,
        crate::logging::codes::classification::UNSUPPORTED_OPERATOR,
        crate::logging::codes::literal::UNBALANCED_CONTEXT,
        crate::logging::codes::literal::UNKNOWN_DELIMITER,
        crate::logging::codes::literal::INVALID_ESCAPE,
        crate::logging::codes::literal::CONTEXT_TOO_DEEP,
        crate::logging::codes::literal::CONTENT_TOO_LARGE,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Normalization error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Normalization limits initialized",
        "max_context_depth" => MAX_CONTEXT_DEPTH,
        "max_decoded_content_size" => MAX_DECODED_CONTENT_SIZE
    );

    Ok(())
}

/// Validate the classification tables are coherent
///
/// Every spelling in every closed table must classify, and the keyword table
/// must round-trip between source spellings and variants.
pub fn validate_tables() -> Result<(), String> {
    for word in crate::classify::keywords::reserved_words() {
        let keyword = crate::classify::keywords::Keyword::from_source(word)
            .ok_or_else(|| format!("Keyword table rejects reserved word {:?}", word))?;
        if keyword.source_str() != *word {
            return Err(format!(
                "Keyword table round-trip failure: {:?} -> {:?}",
                word,
                keyword.source_str()
            ));
        }
    }

    for spelling in crate::classify::operators::operator_spellings() {
        if crate::classify::operators::classify_operator(spelling).is_none() {
            return Err(format!("Operator table rejects spelling {:?}", spelling));
        }
    }

    for category in crate::classify::categories::mapped_categories() {
        if crate::classify::categories::classify_category(category).is_none() {
            return Err(format!("Category table rejects category {:?}", category));
        }
    }

    if MAX_CONTEXT_DEPTH == 0 {
        return Err("MAX_CONTEXT_DEPTH cannot be zero".to_string());
    }

    Ok(())
}

/// Current compile-time normalization limits (for reporting/debugging)
#[derive(Debug, Clone)]
pub struct NormalizeLimits {
    pub max_context_depth: usize,
    pub max_decoded_content_size: usize,
}

/// Get the compile-time normalization limits
pub fn get_limits() -> NormalizeLimits {
    NormalizeLimits {
        max_context_depth: MAX_CONTEXT_DEPTH,
        max_decoded_content_size: MAX_DECODED_CONTENT_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_module_api() {
        let stream = vec![RawToken::new(Position::new(1, 0), "on_int", "42")];
        let tokens = normalize_stream(&stream).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].render(), "tINTEGER [52, 50] 1:0");
    }

    #[test]
    fn test_init_logging() {
        assert!(init_normalize_logging().is_ok());
    }

    #[test]
    fn test_validate_tables() {
        assert!(validate_tables().is_ok());
    }

    #[test]
    fn test_limits() {
        let limits = get_limits();
        assert!(limits.max_context_depth > 0);
        assert!(limits.max_decoded_content_size > 0);
    }
}
