//! Raw token dump parsing
//!
//! The upstream lexer serializes its token stream as a JSON array of
//! `[[line, column], category, text]` records. Ripper-style dumps append a
//! fourth lexer-state element; it carries no lexical information and is
//! accepted and ignored.
use crate::config::compile_time::raw_stream::{MAX_RAW_TOKEN_COUNT, MAX_TOKEN_TEXT_SIZE};
use crate::log_debug;
use crate::logging::codes;
use crate::tokens::RawToken;
use crate::utils::Position;
use serde_json::Value;

/// Raw stream parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawStreamError {
    #[error("token dump is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("token dump must be a JSON array of records")]
    NotAnArray,

    #[error("token dump contains no records")]
    EmptyStream,

    #[error("malformed record #{index}: {message}")]
    MalformedRecord { index: usize, message: String },

    #[error("too many token records: {count} (max {MAX_RAW_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("record #{index} token text too large: {size} bytes (max {MAX_TOKEN_TEXT_SIZE})")]
    TokenTextTooLarge { index: usize, size: usize },
}

impl RawStreamError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RawStreamError::InvalidJson { .. } => codes::raw_stream::INVALID_JSON,
            RawStreamError::NotAnArray => codes::raw_stream::INVALID_JSON,
            RawStreamError::EmptyStream => codes::raw_stream::EMPTY_STREAM,
            RawStreamError::MalformedRecord { .. } => codes::raw_stream::MALFORMED_RECORD,
            RawStreamError::TooManyTokens { .. } => codes::raw_stream::TOO_MANY_TOKENS,
            RawStreamError::TokenTextTooLarge { .. } => codes::raw_stream::TOKEN_TEXT_TOO_LARGE,
        }
    }
}

/// Parse a serialized token dump into raw tokens
pub fn parse_raw_stream(source: &str) -> Result<Vec<RawToken>, RawStreamError> {
    let value: Value =
        serde_json::from_str(source).map_err(|e| RawStreamError::InvalidJson {
            message: e.to_string(),
        })?;

    let records = value.as_array().ok_or(RawStreamError::NotAnArray)?;

    if records.is_empty() {
        return Err(RawStreamError::EmptyStream);
    }
    if records.len() > MAX_RAW_TOKEN_COUNT {
        return Err(RawStreamError::TooManyTokens {
            count: records.len(),
        });
    }

    let mut tokens = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        tokens.push(parse_record(index, record)?);
    }

    log_debug!("Raw stream parsed",
        "records" => tokens.len()
    );

    Ok(tokens)
}

/// Parse one `[[line, column], category, text]` record
fn parse_record(index: usize, record: &Value) -> Result<RawToken, RawStreamError> {
    let fields = record
        .as_array()
        .ok_or_else(|| malformed(index, "record is not an array"))?;

    // Ripper emits a trailing lexer-state element; tolerate and ignore it
    if fields.len() != 3 && fields.len() != 4 {
        return Err(malformed(
            index,
            &format!("expected 3 or 4 elements, found {}", fields.len()),
        ));
    }

    let position = parse_position(index, &fields[0])?;

    let category = fields[1]
        .as_str()
        .ok_or_else(|| malformed(index, "category is not a string"))?;
    if category.is_empty() {
        return Err(malformed(index, "category is empty"));
    }

    let text = fields[2]
        .as_str()
        .ok_or_else(|| malformed(index, "text is not a string"))?;
    if text.len() > MAX_TOKEN_TEXT_SIZE {
        return Err(RawStreamError::TokenTextTooLarge {
            index,
            size: text.len(),
        });
    }

    Ok(RawToken::new(position, category, text))
}

/// Parse the `[line, column]` position pair
fn parse_position(index: usize, value: &Value) -> Result<Position, RawStreamError> {
    let pair = value
        .as_array()
        .ok_or_else(|| malformed(index, "position is not a [line, column] pair"))?;

    if pair.len() != 2 {
        return Err(malformed(index, "position is not a [line, column] pair"));
    }

    let line = pair[0]
        .as_u64()
        .ok_or_else(|| malformed(index, "line is not a non-negative integer"))?;
    let column = pair[1]
        .as_u64()
        .ok_or_else(|| malformed(index, "column is not a non-negative integer"))?;

    if line == 0 {
        return Err(malformed(index, "line numbering is 1-based"));
    }
    if line > u64::from(u32::MAX) || column > u64::from(u32::MAX) {
        return Err(malformed(index, "position out of range"));
    }

    Ok(Position::new(line as u32, column as u32))
}

fn malformed(index: usize, message: &str) -> RawStreamError {
    RawStreamError::MalformedRecord {
        index,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_minimal_stream() {
        let tokens = parse_raw_stream(r#"[[[1, 0], "on_ident", "x"]]"#).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].position, Position::new(1, 0));
        assert_eq!(tokens[0].category, "on_ident");
        assert_eq!(tokens[0].text, "x");
    }

    #[test]
    fn test_parse_stream_with_state_element() {
        // Ripper-style 4-element records: trailing state is ignored
        let tokens = parse_raw_stream(
            r#"[[[1, 0], "on_ident", "x", "EXPR_CMDARG"], [[1, 2], "on_op", "=", "EXPR_BEG"]]"#,
        )
        .unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "=");
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_raw_stream("not json").unwrap_err();
        assert_matches!(err, RawStreamError::InvalidJson { .. });
        assert_eq!(err.error_code().as_str(), "E040");
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = parse_raw_stream(r#"{"tokens": []}"#).unwrap_err();
        assert_matches!(err, RawStreamError::NotAnArray);
    }

    #[test]
    fn test_empty_stream() {
        let err = parse_raw_stream("[]").unwrap_err();
        assert_matches!(err, RawStreamError::EmptyStream);
        assert_eq!(err.error_code().as_str(), "E041");
    }

    #[test]
    fn test_malformed_records() {
        let err = parse_raw_stream(r#"[[[1, 0], "on_ident"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { index: 0, .. });

        let err = parse_raw_stream(r#"[[[1, 0], 42, "x"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { index: 0, .. });

        let err = parse_raw_stream(r#"[[[1, 0], "on_ident", "x"], ["bad"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { index: 1, .. });
    }

    #[test]
    fn test_malformed_positions() {
        let err = parse_raw_stream(r#"[[[0, 0], "on_ident", "x"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { index: 0, ref message }
            if message.contains("1-based"));

        let err = parse_raw_stream(r#"[[[1], "on_ident", "x"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { .. });

        let err = parse_raw_stream(r#"[[[1, -2], "on_ident", "x"]]"#).unwrap_err();
        assert_matches!(err, RawStreamError::MalformedRecord { .. });
    }

    #[test]
    fn test_ripper_shaped_stream() {
        // The exact shape Ripper.lex produces for `x = "hi\n"`
        let source = r#"[
            [[1, 0], "on_ident", "x"],
            [[1, 1], "on_sp", " "],
            [[1, 2], "on_op", "="],
            [[1, 3], "on_sp", " "],
            [[1, 4], "on_tstring_beg", "\""],
            [[1, 5], "on_tstring_content", "hi\\n"],
            [[1, 9], "on_tstring_end", "\""]
        ]"#;
        let tokens = parse_raw_stream(source).unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[5].text, "hi\\n");
        assert!(tokens[1].is_ignorable());
    }
}
