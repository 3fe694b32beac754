//! Raw tokens as emitted by the upstream Ruby lexer
//!
//! A raw token is one `(start_position, category, text)` triple from a
//! Ripper-style event stream. The category vocabulary is owned by the
//! upstream lexer; this side only recognizes the closed subset the
//! classification tables were built against.
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw category denoting keywords; text is resolved against the keyword table
pub const KEYWORD_CATEGORY: &str = "on_kw";

/// Raw category denoting operators; text is resolved against the operator table
pub const OPERATOR_CATEGORY: &str = "on_op";

/// Categories carrying no lexical information; dropped before classification
pub const IGNORED_CATEGORIES: &[&str] = &[
    "on_sp",
    "on_ignored_sp",
    "on_ignored_nl",
    "on_comment",
    "on_words_sep",
];

/// One lexical unit as reported by the upstream lexer, before reclassification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    /// Start position in the lexed source
    pub position: Position,
    /// Raw event category (e.g. "on_ident", "on_op", "on_tstring_content")
    pub category: String,
    /// Raw token text exactly as lexed
    pub text: String,
}

impl RawToken {
    /// Create a raw token
    pub fn new(position: Position, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            position,
            category: category.into(),
            text: text.into(),
        }
    }

    /// Check if this token carries a keyword spelling
    pub fn is_keyword(&self) -> bool {
        self.category == KEYWORD_CATEGORY
    }

    /// Check if this token carries an operator spelling
    pub fn is_operator(&self) -> bool {
        self.category == OPERATOR_CATEGORY
    }

    /// Check if this token should be dropped before classification
    pub fn is_ignorable(&self) -> bool {
        IGNORED_CATEGORIES.contains(&self.category.as_str())
    }

    /// Check if this token survives filtering
    pub fn is_significant(&self) -> bool {
        !self.is_ignorable()
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {}", self.category, self.text, self.position)
    }
}
