//! Token reclassification
//!
//! Pure lookup from raw category + raw text to a canonical kind, consulted in
//! priority order: keyword table, operator table, general category table.
//! The tables are closed; anything outside them is a hard classification
//! failure carrying the offending input, never a silent default. The correct
//! remediation for such a failure is extending the tables, not recovering.

pub mod categories;
pub mod keywords;
pub mod operators;

pub use keywords::Keyword;

use crate::logging::codes;
use crate::tokens::{CanonicalKind, KEYWORD_CATEGORY, OPERATOR_CATEGORY};

/// Classification errors: raw input outside the closed lookup tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("unsupported keyword '{keyword}'")]
    UnsupportedKeyword { keyword: String },

    #[error("unsupported operator '{operator}'")]
    UnsupportedOperator { operator: String },

    #[error("unsupported token {category} '{text}'")]
    UnsupportedToken { category: String, text: String },
}

impl ClassifyError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ClassifyError::UnsupportedKeyword { .. } => codes::classification::UNSUPPORTED_KEYWORD,
            ClassifyError::UnsupportedOperator { .. } => {
                codes::classification::UNSUPPORTED_OPERATOR
            }
            ClassifyError::UnsupportedToken { .. } => codes::classification::UNSUPPORTED_TOKEN,
        }
    }
}

/// Map a raw category and raw text onto a canonical kind
///
/// Total over the accepted domain: every pair either classifies or fails with
/// the table that rejected it. No side effects.
pub fn classify(category: &str, text: &str) -> Result<CanonicalKind, ClassifyError> {
    if category == KEYWORD_CATEGORY {
        return keywords::Keyword::from_source(text)
            .map(CanonicalKind::Keyword)
            .ok_or_else(|| ClassifyError::UnsupportedKeyword {
                keyword: text.to_string(),
            });
    }

    if category == OPERATOR_CATEGORY {
        return operators::classify_operator(text).ok_or_else(|| {
            ClassifyError::UnsupportedOperator {
                operator: text.to_string(),
            }
        });
    }

    categories::classify_category(category).ok_or_else(|| ClassifyError::UnsupportedToken {
        category: category.to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_keyword_classification() {
        assert_eq!(
            classify("on_kw", "class"),
            Ok(CanonicalKind::Keyword(Keyword::Class))
        );
        assert_eq!(
            classify("on_kw", "BEGIN"),
            Ok(CanonicalKind::Keyword(Keyword::UpcaseBegin))
        );
    }

    #[test]
    fn test_operator_classification() {
        assert_eq!(classify("on_op", "="), Ok(CanonicalKind::Assign));
        assert_eq!(classify("on_op", "<=>"), Ok(CanonicalKind::Compare));
        assert_eq!(classify("on_op", "+="), Ok(CanonicalKind::OperatorAssign));
    }

    #[test]
    fn test_category_classification() {
        assert_eq!(classify("on_ident", "x"), Ok(CanonicalKind::Identifier));
        assert_eq!(
            classify("on_tstring_content", "hi"),
            Ok(CanonicalKind::StringContent)
        );
    }

    #[test]
    fn test_unsupported_keyword() {
        let err = classify("on_kw", "frobnicate").unwrap_err();
        assert_matches!(err, ClassifyError::UnsupportedKeyword { ref keyword } if keyword == "frobnicate");
        assert_eq!(err.error_code().as_str(), "E021");
    }

    #[test]
    fn test_unsupported_operator_carries_spelling() {
        let err = classify("on_op", "@").unwrap_err();
        assert_matches!(err, ClassifyError::UnsupportedOperator { ref operator } if operator == "@");
        assert_eq!(err.error_code().as_str(), "E022");
    }

    #[test]
    fn test_unsupported_category_carries_both() {
        let err = classify("on_mystery", "???").unwrap_err();
        assert_matches!(
            err,
            ClassifyError::UnsupportedToken { ref category, ref text }
                if category == "on_mystery" && text == "???"
        );
        assert_eq!(err.error_code().as_str(), "E020");
    }

    #[test]
    fn test_keyword_table_takes_priority() {
        // A keyword-category token never falls through to the general table,
        // even for spellings that happen to be unmapped there
        assert_matches!(
            classify("on_kw", "on_ident"),
            Err(ClassifyError::UnsupportedKeyword { .. })
        );
    }

    #[test]
    fn test_totality_over_tables() {
        for word in keywords::reserved_words() {
            assert!(classify("on_kw", word).is_ok());
        }
        for spelling in operators::operator_spellings() {
            assert!(classify("on_op", spelling).is_ok());
        }
        for category in categories::mapped_categories() {
            assert!(classify(category, "").is_ok());
        }
    }
}
