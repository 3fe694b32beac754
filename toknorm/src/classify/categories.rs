//! General raw-category mapping table
//!
//! Consulted for every category other than the keyword and operator
//! categories. Heredoc begin/end collapse onto the string begin/end kinds and
//! the embedded-document events collapse onto the comment kind; downstream
//! consumers do not distinguish them.
use crate::tokens::CanonicalKind;

/// Map a raw category to its canonical kind
pub fn classify_category(category: &str) -> Option<CanonicalKind> {
    match category {
        "on_int" => Some(CanonicalKind::Integer),
        "on_float" => Some(CanonicalKind::Float),
        "on_rational" => Some(CanonicalKind::Rational),
        "on_imaginary" => Some(CanonicalKind::Imaginary),
        "on_CHAR" => Some(CanonicalKind::Character),

        "on_ident" => Some(CanonicalKind::Identifier),
        "on_const" => Some(CanonicalKind::Constant),
        "on_ivar" => Some(CanonicalKind::InstanceVariable),
        "on_cvar" => Some(CanonicalKind::ClassVariable),
        "on_gvar" => Some(CanonicalKind::GlobalVariable),
        "on_label" => Some(CanonicalKind::Label),
        "on_backref" => Some(CanonicalKind::BackRef),

        "on_tstring_beg" => Some(CanonicalKind::StringBegin),
        "on_tstring_content" => Some(CanonicalKind::StringContent),
        "on_tstring_end" => Some(CanonicalKind::StringEnd),
        "on_heredoc_beg" => Some(CanonicalKind::StringBegin),
        "on_heredoc_end" => Some(CanonicalKind::StringEnd),
        "on_regexp_beg" => Some(CanonicalKind::RegexpBegin),
        "on_regexp_end" => Some(CanonicalKind::RegexpEnd),
        "on_backtick" => Some(CanonicalKind::XstringBegin),
        "on_symbeg" => Some(CanonicalKind::SymbolBegin),
        "on_words_beg" => Some(CanonicalKind::WordsBegin),
        "on_qwords_beg" => Some(CanonicalKind::QwordsBegin),
        "on_symbols_beg" => Some(CanonicalKind::SymbolsBegin),
        "on_qsymbols_beg" => Some(CanonicalKind::QsymbolsBegin),

        "on_embexpr_beg" => Some(CanonicalKind::EmbexprBegin),
        "on_embexpr_end" => Some(CanonicalKind::EmbexprEnd),
        "on_embvar" => Some(CanonicalKind::EmbeddedVariable),

        "on_tlambda" => Some(CanonicalKind::Lambda),
        "on_tlambeg" => Some(CanonicalKind::LambdaBegin),

        "on_comma" => Some(CanonicalKind::Comma),
        "on_semicolon" => Some(CanonicalKind::Semicolon),
        "on_period" => Some(CanonicalKind::Dot),
        "on_lbracket" => Some(CanonicalKind::LeftBracket),
        "on_rbracket" => Some(CanonicalKind::RightBracket),
        "on_lparen" => Some(CanonicalKind::LeftParen),
        "on_rparen" => Some(CanonicalKind::RightParen),
        "on_lbrace" => Some(CanonicalKind::LeftBrace),
        "on_rbrace" => Some(CanonicalKind::RightBrace),

        "on_embdoc_beg" => Some(CanonicalKind::Comment),
        "on_embdoc" => Some(CanonicalKind::Comment),
        "on_embdoc_end" => Some(CanonicalKind::Comment),
        "on___end__" => Some(CanonicalKind::EndOfData),
        "on_nl" => Some(CanonicalKind::Newline),

        _ => None,
    }
}

/// Every raw category the general mapping table accepts
pub fn mapped_categories() -> &'static [&'static str] {
    &[
        "on_int",
        "on_float",
        "on_rational",
        "on_imaginary",
        "on_CHAR",
        "on_ident",
        "on_const",
        "on_ivar",
        "on_cvar",
        "on_gvar",
        "on_label",
        "on_backref",
        "on_tstring_beg",
        "on_tstring_content",
        "on_tstring_end",
        "on_heredoc_beg",
        "on_heredoc_end",
        "on_regexp_beg",
        "on_regexp_end",
        "on_backtick",
        "on_symbeg",
        "on_words_beg",
        "on_qwords_beg",
        "on_symbols_beg",
        "on_qsymbols_beg",
        "on_embexpr_beg",
        "on_embexpr_end",
        "on_embvar",
        "on_tlambda",
        "on_tlambeg",
        "on_comma",
        "on_semicolon",
        "on_period",
        "on_lbracket",
        "on_rbracket",
        "on_lparen",
        "on_rparen",
        "on_lbrace",
        "on_rbrace",
        "on_embdoc_beg",
        "on_embdoc",
        "on_embdoc_end",
        "on___end__",
        "on_nl",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mapped_category_classifies() {
        for category in mapped_categories() {
            assert!(
                classify_category(category).is_some(),
                "category {} did not classify",
                category
            );
        }
    }

    #[test]
    fn test_heredoc_collapses_onto_string_markers() {
        assert_eq!(
            classify_category("on_heredoc_beg"),
            classify_category("on_tstring_beg")
        );
        assert_eq!(
            classify_category("on_heredoc_end"),
            classify_category("on_tstring_end")
        );
    }

    #[test]
    fn test_embdoc_collapses_onto_comment() {
        assert_eq!(classify_category("on_embdoc_beg"), Some(CanonicalKind::Comment));
        assert_eq!(classify_category("on_embdoc"), Some(CanonicalKind::Comment));
        assert_eq!(classify_category("on_embdoc_end"), Some(CanonicalKind::Comment));
    }

    #[test]
    fn test_unmapped_categories_rejected() {
        assert_eq!(classify_category("on_kw"), None);
        assert_eq!(classify_category("on_op"), None);
        assert_eq!(classify_category("on_sp"), None);
        assert_eq!(classify_category("on_mystery"), None);
    }
}
