//! Content decoding policy
//!
//! Raw content text is decoded according to the delimiter of the enclosing
//! literal context: single-quoted bodies pass through verbatim, double-quoted
//! and regexp bodies are escape-decoded into literal byte values. Any other
//! delimiter spelling is a decoder error, not a silent passthrough; new
//! delimiter styles must be added to the policy table explicitly.
//!
//! The escape decoder recognizes the closed set of escape classes the
//! upstream lexer produces: named escapes, octal, hex, short/long unicode,
//! and control/meta chords. Decoded output is a byte sequence; hex escapes
//! may produce bytes that are not valid UTF-8.
use super::tracker::LiteralContext;
use crate::config::compile_time::normalize::MAX_DECODED_CONTENT_SIZE;
use crate::logging::codes;

/// Content decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown literal delimiter {delimiter:?}")]
    UnknownLiteralDelimiter { delimiter: String },

    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },

    #[error("decoded content too large: {size} bytes (max {MAX_DECODED_CONTENT_SIZE})")]
    ContentTooLarge { size: usize },
}

impl DecodeError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DecodeError::UnknownLiteralDelimiter { .. } => codes::literal::UNKNOWN_DELIMITER,
            DecodeError::InvalidEscape { .. } => codes::literal::INVALID_ESCAPE,
            DecodeError::ContentTooLarge { .. } => codes::literal::CONTENT_TOO_LARGE,
        }
    }
}

/// Decode raw content text under the given literal context
pub fn decode(context: &LiteralContext, raw: &str) -> Result<Vec<u8>, DecodeError> {
    if raw.len() > MAX_DECODED_CONTENT_SIZE {
        return Err(DecodeError::ContentTooLarge { size: raw.len() });
    }

    match context.delimiter.as_str() {
        // Single-quoted bodies carry no escapes; the two representable
        // escapes (quote and backslash) were already resolved upstream
        "'" => Ok(raw.as_bytes().to_vec()),
        "\"" | "/" => unescape(raw),
        other => Err(DecodeError::UnknownLiteralDelimiter {
            delimiter: other.to_string(),
        }),
    }
}

/// Decode backslash escape sequences into literal bytes
fn unescape(raw: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        if i >= bytes.len() {
            return Err(invalid_escape(raw, start, i));
        }

        match bytes[i] {
            // Escaped line break is a continuation and produces no bytes
            b'\n' => {
                i += 1;
            }

            b'u' => {
                i += 1;
                decode_unicode(raw, bytes, start, &mut i, &mut out)?;
            }

            // Escaped non-ASCII character decodes to itself
            b if b >= 0x80 => {
                let ch_len = utf8_len(b);
                if i + ch_len > bytes.len() {
                    return Err(invalid_escape(raw, start, bytes.len()));
                }
                out.extend_from_slice(&bytes[i..i + ch_len]);
                i += ch_len;
            }

            _ => {
                let byte = read_escape_byte(raw, bytes, start, &mut i)?;
                out.push(byte);
            }
        }
    }

    if out.len() > MAX_DECODED_CONTENT_SIZE {
        return Err(DecodeError::ContentTooLarge { size: out.len() });
    }

    Ok(out)
}

/// Read one single-byte escape, with `i` positioned on the escape character
///
/// Handles named escapes, octal, hex, and control/meta chords, including
/// chained operands like `\M-\C-a`.
fn read_escape_byte(
    raw: &str,
    bytes: &[u8],
    start: usize,
    i: &mut usize,
) -> Result<u8, DecodeError> {
    if *i >= bytes.len() {
        return Err(invalid_escape(raw, start, *i));
    }

    let b = bytes[*i];
    match b {
        b'n' => {
            *i += 1;
            Ok(b'\n')
        }
        b't' => {
            *i += 1;
            Ok(b'\t')
        }
        b'r' => {
            *i += 1;
            Ok(b'\r')
        }
        b'f' => {
            *i += 1;
            Ok(0x0C)
        }
        b'v' => {
            *i += 1;
            Ok(0x0B)
        }
        b'a' => {
            *i += 1;
            Ok(0x07)
        }
        b'b' => {
            *i += 1;
            Ok(0x08)
        }
        b'e' => {
            *i += 1;
            Ok(0x1B)
        }
        b's' => {
            *i += 1;
            Ok(b' ')
        }

        b'0'..=b'7' => {
            let mut value: u32 = 0;
            let mut digits = 0;
            while *i < bytes.len() && digits < 3 && (b'0'..=b'7').contains(&bytes[*i]) {
                value = value * 8 + u32::from(bytes[*i] - b'0');
                *i += 1;
                digits += 1;
            }
            Ok((value & 0xFF) as u8)
        }

        b'x' => {
            *i += 1;
            let mut value: u32 = 0;
            let mut digits = 0;
            while *i < bytes.len() && digits < 2 {
                match hex_digit(bytes[*i]) {
                    Some(d) => {
                        value = value * 16 + d;
                        *i += 1;
                        digits += 1;
                    }
                    None => break,
                }
            }
            if digits == 0 {
                return Err(invalid_escape(raw, start, *i));
            }
            Ok(value as u8)
        }

        b'c' => {
            *i += 1;
            let operand = read_chord_operand(raw, bytes, start, i)?;
            Ok(control_byte(operand))
        }

        b'C' => {
            *i += 1;
            if *i >= bytes.len() || bytes[*i] != b'-' {
                return Err(invalid_escape(raw, start, *i));
            }
            *i += 1;
            let operand = read_chord_operand(raw, bytes, start, i)?;
            Ok(control_byte(operand))
        }

        b'M' => {
            *i += 1;
            if *i >= bytes.len() || bytes[*i] != b'-' {
                return Err(invalid_escape(raw, start, *i));
            }
            *i += 1;
            let operand = read_chord_operand(raw, bytes, start, i)?;
            Ok(operand | 0x80)
        }

        // Any other escaped ASCII character decodes to itself
        b if b < 0x80 => {
            *i += 1;
            Ok(b)
        }

        _ => Err(invalid_escape(raw, start, *i)),
    }
}

/// Read the operand of a control/meta chord: a plain ASCII character or a
/// nested backslash escape
fn read_chord_operand(
    raw: &str,
    bytes: &[u8],
    start: usize,
    i: &mut usize,
) -> Result<u8, DecodeError> {
    if *i >= bytes.len() {
        return Err(invalid_escape(raw, start, *i));
    }

    if bytes[*i] == b'\\' {
        *i += 1;
        return read_escape_byte(raw, bytes, start, i);
    }

    let b = bytes[*i];
    if b >= 0x80 {
        return Err(invalid_escape(raw, start, *i + 1));
    }
    *i += 1;
    Ok(b)
}

/// Apply the control transformation (`\c?` is delete)
fn control_byte(operand: u8) -> u8 {
    if operand == b'?' {
        0x7F
    } else {
        operand & 0x9F
    }
}

/// Decode `\uXXXX` or `\u{H...}`, with `i` positioned after the `u`
fn decode_unicode(
    raw: &str,
    bytes: &[u8],
    start: usize,
    i: &mut usize,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    if *i < bytes.len() && bytes[*i] == b'{' {
        *i += 1;
        let mut codepoints = 0;

        loop {
            while *i < bytes.len() && (bytes[*i] == b' ' || bytes[*i] == b'\t') {
                *i += 1;
            }
            if *i >= bytes.len() {
                return Err(invalid_escape(raw, start, *i));
            }
            if bytes[*i] == b'}' {
                *i += 1;
                break;
            }

            let mut value: u32 = 0;
            let mut digits = 0;
            while *i < bytes.len() && digits <= 6 {
                match hex_digit(bytes[*i]) {
                    Some(d) => {
                        value = value * 16 + d;
                        *i += 1;
                        digits += 1;
                    }
                    None => break,
                }
            }
            if digits == 0 || digits > 6 {
                return Err(invalid_escape(raw, start, *i));
            }

            push_codepoint(raw, start, *i, value, out)?;
            codepoints += 1;
        }

        if codepoints == 0 {
            return Err(invalid_escape(raw, start, *i));
        }
        Ok(())
    } else {
        let mut value: u32 = 0;
        for _ in 0..4 {
            if *i >= bytes.len() {
                return Err(invalid_escape(raw, start, *i));
            }
            match hex_digit(bytes[*i]) {
                Some(d) => {
                    value = value * 16 + d;
                    *i += 1;
                }
                None => return Err(invalid_escape(raw, start, *i + 1)),
            }
        }
        push_codepoint(raw, start, *i, value, out)
    }
}

/// Encode one codepoint as UTF-8, rejecting surrogates and out-of-range values
fn push_codepoint(
    raw: &str,
    start: usize,
    end: usize,
    value: u32,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    match char::from_u32(value) {
        Some(ch) => {
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            Ok(())
        }
        None => Err(invalid_escape(raw, start, end)),
    }
}

fn hex_digit(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

fn utf8_len(lead: u8) -> usize {
    if lead >= 0xF0 {
        4
    } else if lead >= 0xE0 {
        3
    } else {
        2
    }
}

fn invalid_escape(raw: &str, start: usize, end: usize) -> DecodeError {
    let end = end.min(raw.len());
    let sequence = raw
        .get(start..end)
        .unwrap_or(&raw[start..])
        .to_string();
    DecodeError::InvalidEscape { sequence }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn ctx(delimiter: &str) -> LiteralContext {
        LiteralContext::new(delimiter, Position::new(1, 0))
    }

    #[test]
    fn test_single_quote_is_identity() {
        assert_eq!(decode(&ctx("'"), "hi\\n").unwrap(), b"hi\\n".to_vec());
        assert_eq!(decode(&ctx("'"), "").unwrap(), Vec::<u8>::new());
        assert_eq!(decode(&ctx("'"), "a b c").unwrap(), b"a b c".to_vec());
    }

    #[test]
    fn test_named_escapes() {
        assert_eq!(decode(&ctx("\""), "hi\\n").unwrap(), vec![104, 105, 10]);
        assert_eq!(decode(&ctx("\""), "\\t").unwrap(), vec![9]);
        assert_eq!(decode(&ctx("\""), "\\r\\f\\v").unwrap(), vec![13, 12, 11]);
        assert_eq!(decode(&ctx("\""), "\\a\\b\\e\\s").unwrap(), vec![7, 8, 27, 32]);
    }

    #[test]
    fn test_escaped_punctuation_decodes_to_itself() {
        assert_eq!(decode(&ctx("\""), "\\\"").unwrap(), vec![b'"']);
        assert_eq!(decode(&ctx("\""), "\\\\").unwrap(), vec![b'\\']);
        assert_eq!(decode(&ctx("\""), "\\#").unwrap(), vec![b'#']);
        assert_eq!(decode(&ctx("\""), "\\q").unwrap(), vec![b'q']);
    }

    #[test]
    fn test_line_continuation_produces_nothing() {
        assert_eq!(decode(&ctx("\""), "a\\\nb").unwrap(), vec![b'a', b'b']);
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(decode(&ctx("\""), "\\0").unwrap(), vec![0]);
        assert_eq!(decode(&ctx("\""), "\\101").unwrap(), vec![65]);
        assert_eq!(decode(&ctx("\""), "\\7\\77").unwrap(), vec![7, 63]);
        // A fourth digit is ordinary content
        assert_eq!(decode(&ctx("\""), "\\1018").unwrap(), vec![65, b'8']);
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(decode(&ctx("\""), "\\x41").unwrap(), vec![0x41]);
        assert_eq!(decode(&ctx("\""), "\\xA").unwrap(), vec![0x0A]);
        assert_eq!(decode(&ctx("\""), "\\xFF").unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_short_unicode_escape() {
        assert_eq!(
            decode(&ctx("\""), "\\u00e9").unwrap(),
            "é".as_bytes().to_vec()
        );
        assert_eq!(decode(&ctx("\""), "\\u0041").unwrap(), vec![b'A']);
    }

    #[test]
    fn test_long_unicode_escape() {
        assert_eq!(
            decode(&ctx("\""), "\\u{1F600}").unwrap(),
            "\u{1F600}".as_bytes().to_vec()
        );
        assert_eq!(
            decode(&ctx("\""), "\\u{48 49}").unwrap(),
            vec![b'H', b'I']
        );
    }

    #[test]
    fn test_control_and_meta_chords() {
        assert_eq!(decode(&ctx("\""), "\\ca").unwrap(), vec![1]);
        assert_eq!(decode(&ctx("\""), "\\C-a").unwrap(), vec![1]);
        assert_eq!(decode(&ctx("\""), "\\c?").unwrap(), vec![0x7F]);
        assert_eq!(decode(&ctx("\""), "\\M-a").unwrap(), vec![0xE1]);
        assert_eq!(decode(&ctx("\""), "\\M-\\C-a").unwrap(), vec![0x81]);
    }

    #[test]
    fn test_regexp_uses_escape_decoding() {
        assert_eq!(decode(&ctx("/"), "a\\n").unwrap(), vec![b'a', 10]);
    }

    #[test]
    fn test_unknown_delimiter_is_an_error() {
        for opener in ["%q(", "<<~EOS", "`", "%w["] {
            let err = decode(&ctx(opener), "content").unwrap_err();
            assert_matches!(
                err,
                DecodeError::UnknownLiteralDelimiter { ref delimiter } if delimiter == opener
            );
            assert_eq!(err.error_code().as_str(), "E031");
        }
    }

    #[test]
    fn test_malformed_escapes() {
        assert_matches!(
            decode(&ctx("\""), "\\x").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "\\u12").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "\\u{}").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "\\u{110000}").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "\\u{D800}").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "trailing\\").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
        assert_matches!(
            decode(&ctx("\""), "\\C_a").unwrap_err(),
            DecodeError::InvalidEscape { .. }
        );
    }

    #[test]
    fn test_invalid_escape_carries_sequence() {
        let err = decode(&ctx("\""), "ab\\xzz").unwrap_err();
        assert_matches!(err, DecodeError::InvalidEscape { ref sequence } if sequence == "\\x");
        assert_eq!(err.error_code().as_str(), "E032");
    }

    #[test]
    fn test_multibyte_content_passes_through() {
        assert_eq!(
            decode(&ctx("\""), "héllo").unwrap(),
            "héllo".as_bytes().to_vec()
        );
        assert_eq!(
            decode(&ctx("\""), "\\é").unwrap(),
            "é".as_bytes().to_vec()
        );
    }
}
