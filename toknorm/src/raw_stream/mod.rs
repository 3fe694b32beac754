//! Raw stream module: deserializes upstream lexer dumps into raw tokens
//!
//! The lexer itself is a black box; the only contract is the serialized
//! record shape parsed here. Everything downstream works on [`RawToken`]s.

mod reader;

pub use reader::{parse_raw_stream, RawStreamError};

use crate::tokens::RawToken;

/// Parse a token dump, logging validation of stream-level invariants
pub fn parse_stream(source: &str) -> Result<Vec<RawToken>, RawStreamError> {
    reader::parse_raw_stream(source)
}

/// Initialize raw stream logging validation (for system startup)
pub fn init_raw_stream_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::raw_stream::INVALID_JSON,
        crate::logging::codes::raw_stream::EMPTY_STREAM,
        crate::logging::codes::raw_stream::MALFORMED_RECORD,
        crate::logging::codes::raw_stream::TOO_MANY_TOKENS,
        crate::logging::codes::raw_stream::TOKEN_TEXT_TOO_LARGE,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Raw stream error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_api() {
        let tokens = parse_stream(r#"[[[1, 0], "on_int", "42"]]"#).unwrap();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_raw_stream_logging().is_ok());
    }
}
