//! Canonical token vocabulary
//!
//! The closed enumeration every accepted raw token is normalized onto, plus
//! the emitted token record. Canonical names follow the reference vocabulary
//! (`tIDENTIFIER`, `tSTRING_BEG`, `tOP_ASGN`, ...) so the rendered stream is
//! directly comparable across lexer implementations.
use crate::classify::keywords::Keyword;
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical token kinds
///
/// Every compound assignment spelling collapses onto [`Self::OperatorAssign`];
/// heredoc begin/end collapse onto [`Self::StringBegin`]/[`Self::StringEnd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalKind {
    // === KEYWORDS ===
    /// Reserved word, one variant per spelling
    Keyword(Keyword),

    // === NAMES AND LITERAL VALUES ===
    Identifier,
    Constant,
    InstanceVariable,
    ClassVariable,
    GlobalVariable,
    Label,
    BackRef,
    Integer,
    Float,
    Rational,
    Imaginary,
    Character,

    // === LITERAL DELIMITERS ===
    StringBegin,
    StringEnd,
    RegexpBegin,
    RegexpEnd,
    XstringBegin,
    SymbolBegin,
    WordsBegin,
    QwordsBegin,
    SymbolsBegin,
    QsymbolsBegin,

    // === LITERAL BODY AND INTERPOLATION ===
    StringContent,
    EmbexprBegin,
    EmbexprEnd,
    EmbeddedVariable,

    // === COMPARISON OPERATORS ===
    Equal,              // ==
    NotEqual,           // !=
    CaseEqual,          // ===
    Compare,            // <=>
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
    MatchOp,            // =~
    NotMatchOp,         // !~

    // === ARITHMETIC AND BITWISE OPERATORS ===
    Plus,       // +
    Minus,      // -
    Star,       // *
    Divide,     // /
    Percent,    // %
    Power,      // **
    UnaryPlus,  // +@
    UnaryMinus, // -@
    Ampersand,  // &
    Pipe,       // |
    Caret,      // ^
    Tilde,      // ~ and ~@
    LeftShift,  // <<
    RightShift, // >>
    Bang,       // ! and !@

    // === LOGICAL OPERATORS ===
    AndOp, // &&
    OrOp,  // ||

    // === ASSIGNMENT ===
    Assign, // =
    /// Shared kind for every compound assignment spelling (+=, -=, ||=, ...)
    OperatorAssign,

    // === CALL AND INDEX SUGAR ===
    ArrayRef,       // []
    ArraySet,       // []=
    SafeNavigation, // &.
    BackRef2,       // ` as an operator
    Lambda,         // -> (also the dedicated lambda arrow category)
    LambdaBegin,    // lambda body opening brace

    // === RANGES ===
    Dot2, // ..
    Dot3, // ...

    // === PUNCTUATION ===
    Comma,
    Semicolon,
    Dot,
    Colon,
    DoubleColon,
    QuestionMark,
    Assoc, // =>
    LeftBracket,
    LeftBracketIndex,
    RightBracket,
    LeftParen,
    LeftParenCall,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftCurly,
    RightCurly,

    // === STRUCTURE ===
    Newline,
    Comment,
    EndOfData, // __END__ marker
}

impl CanonicalKind {
    /// Get the canonical token name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword(keyword) => keyword.as_str(),

            Self::Identifier => "tIDENTIFIER",
            Self::Constant => "tCONSTANT",
            Self::InstanceVariable => "tIVAR",
            Self::ClassVariable => "tCVAR",
            Self::GlobalVariable => "tGVAR",
            Self::Label => "tLABEL",
            Self::BackRef => "tBACKREF",
            Self::Integer => "tINTEGER",
            Self::Float => "tFLOAT",
            Self::Rational => "tRATIONAL",
            Self::Imaginary => "tIMAGINARY",
            Self::Character => "tCHAR",

            Self::StringBegin => "tSTRING_BEG",
            Self::StringEnd => "tSTRING_END",
            Self::RegexpBegin => "tREGEXP_BEG",
            Self::RegexpEnd => "tREGEXP_END",
            Self::XstringBegin => "tXSTRING_BEG",
            Self::SymbolBegin => "tSYMBEG",
            Self::WordsBegin => "tWORDS_BEG",
            Self::QwordsBegin => "tQWORDS_BEG",
            Self::SymbolsBegin => "tSYMBOLS_BEG",
            Self::QsymbolsBegin => "tQSYMBOLS_BEG",

            Self::StringContent => "tSTRING_CONTENT",
            Self::EmbexprBegin => "tSTRING_DBEG",
            Self::EmbexprEnd => "tSTRING_DEND",
            Self::EmbeddedVariable => "tSTRING_DVAR",

            Self::Equal => "tEQ",
            Self::NotEqual => "tNEQ",
            Self::CaseEqual => "tEQQ",
            Self::Compare => "tCMP",
            Self::GreaterThan => "tGT",
            Self::GreaterThanOrEqual => "tGEQ",
            Self::LessThan => "tLT",
            Self::LessThanOrEqual => "tLEQ",
            Self::MatchOp => "tMATCH",
            Self::NotMatchOp => "tNMATCH",

            Self::Plus => "tPLUS",
            Self::Minus => "tMINUS",
            Self::Star => "tSTAR2",
            Self::Divide => "tDIVIDE",
            Self::Percent => "tPERCENT",
            Self::Power => "tPOW",
            Self::UnaryPlus => "tUPLUS",
            Self::UnaryMinus => "tUMINUS",
            Self::Ampersand => "tAMPER2",
            Self::Pipe => "tPIPE",
            Self::Caret => "tCARET",
            Self::Tilde => "tTILDE",
            Self::LeftShift => "tLSHFT",
            Self::RightShift => "tRSHFT",
            Self::Bang => "tBANG",

            Self::AndOp => "tANDOP",
            Self::OrOp => "tOROP",

            Self::Assign => "tEQL",
            Self::OperatorAssign => "tOP_ASGN",

            Self::ArrayRef => "tAREF",
            Self::ArraySet => "tASET",
            Self::SafeNavigation => "tANDDOT",
            Self::BackRef2 => "tBACK_REF2",
            Self::Lambda => "tLAMBDA",
            Self::LambdaBegin => "tLAMBEG",

            Self::Dot2 => "tDOT2",
            Self::Dot3 => "tDOT3",

            Self::Comma => "tCOMMA",
            Self::Semicolon => "tSEMI",
            Self::Dot => "tDOT",
            Self::Colon => "tCOLON",
            Self::DoubleColon => "tCOLON2",
            Self::QuestionMark => "tEH",
            Self::Assoc => "tASSOC",
            Self::LeftBracket => "tLBRACK",
            Self::LeftBracketIndex => "tLBRACK2",
            Self::RightBracket => "tRBRACK",
            Self::LeftParen => "tLPAREN",
            Self::LeftParenCall => "tLPAREN2",
            Self::RightParen => "tRPAREN",
            Self::LeftBrace => "tLBRACE",
            Self::RightBrace => "tRBRACE",
            Self::LeftCurly => "tLCURLY",
            Self::RightCurly => "tRCURLY",

            Self::Newline => "tNL",
            Self::Comment => "tCOMMENT",
            Self::EndOfData => "t__END__",
        }
    }

    /// Check if this kind opens a literal context
    pub fn is_literal_begin(&self) -> bool {
        matches!(self, Self::StringBegin | Self::RegexpBegin)
    }

    /// Check if this kind closes a literal context
    pub fn is_literal_end(&self) -> bool {
        matches!(self, Self::StringEnd | Self::RegexpEnd)
    }

    /// Check if this kind is literal body text requiring decoding
    pub fn is_content(&self) -> bool {
        matches!(self, Self::StringContent)
    }

    /// Check if this kind carries a byte value in the canonical output
    pub fn carries_value(&self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Constant
                | Self::InstanceVariable
                | Self::ClassVariable
                | Self::GlobalVariable
                | Self::Label
                | Self::BackRef
                | Self::Integer
                | Self::Float
                | Self::Rational
                | Self::Imaginary
                | Self::Character
                | Self::StringContent
                | Self::Comment
        )
    }

    /// Get the classification of this kind
    pub fn kind_class(&self) -> KindClass {
        match self {
            Self::Keyword(_) => KindClass::Keyword,

            Self::Identifier
            | Self::Constant
            | Self::InstanceVariable
            | Self::ClassVariable
            | Self::GlobalVariable
            | Self::Label
            | Self::BackRef => KindClass::Name,

            Self::Integer | Self::Float | Self::Rational | Self::Imaginary | Self::Character => {
                KindClass::Literal
            }

            Self::StringBegin
            | Self::StringEnd
            | Self::RegexpBegin
            | Self::RegexpEnd
            | Self::XstringBegin
            | Self::SymbolBegin
            | Self::WordsBegin
            | Self::QwordsBegin
            | Self::SymbolsBegin
            | Self::QsymbolsBegin => KindClass::Delimiter,

            Self::StringContent
            | Self::EmbexprBegin
            | Self::EmbexprEnd
            | Self::EmbeddedVariable => KindClass::Content,

            Self::Equal
            | Self::NotEqual
            | Self::CaseEqual
            | Self::Compare
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::MatchOp
            | Self::NotMatchOp
            | Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Divide
            | Self::Percent
            | Self::Power
            | Self::UnaryPlus
            | Self::UnaryMinus
            | Self::Ampersand
            | Self::Pipe
            | Self::Caret
            | Self::Tilde
            | Self::LeftShift
            | Self::RightShift
            | Self::Bang
            | Self::AndOp
            | Self::OrOp
            | Self::Assign
            | Self::OperatorAssign
            | Self::ArrayRef
            | Self::ArraySet
            | Self::SafeNavigation
            | Self::BackRef2
            | Self::Lambda
            | Self::LambdaBegin
            | Self::Dot2
            | Self::Dot3 => KindClass::Operator,

            Self::Comma
            | Self::Semicolon
            | Self::Dot
            | Self::Colon
            | Self::DoubleColon
            | Self::QuestionMark
            | Self::Assoc
            | Self::LeftBracket
            | Self::LeftBracketIndex
            | Self::RightBracket
            | Self::LeftParen
            | Self::LeftParenCall
            | Self::RightParen
            | Self::LeftBrace
            | Self::RightBrace
            | Self::LeftCurly
            | Self::RightCurly => KindClass::Punctuation,

            Self::Newline | Self::Comment | Self::EndOfData => KindClass::Structure,
        }
    }
}

impl fmt::Display for CanonicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind classification for metrics and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindClass {
    /// Reserved words
    Keyword,
    /// Operators, ranges and call/index sugar
    Operator,
    /// Numeric and character literals
    Literal,
    /// Identifiers, constants and variables
    Name,
    /// Literal open/close markers
    Delimiter,
    /// Literal body text and interpolation markers
    Content,
    /// Structural punctuation
    Punctuation,
    /// Newlines, comments, end-of-data
    Structure,
}

/// One emitted canonical token
///
/// Constructed once per surviving raw token, emitted in order, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalToken {
    /// Canonical kind
    pub kind: CanonicalKind,
    /// Decoded byte value, present only for value-bearing kinds
    pub value: Option<Vec<u8>>,
    /// Start position inherited from the raw token
    pub position: Position,
    /// False when the value is not valid UTF-8 (kept, flagged, not rejected)
    pub valid_encoding: bool,
}

impl CanonicalToken {
    /// Create a token with a byte value
    pub fn with_value(kind: CanonicalKind, value: Vec<u8>, position: Position) -> Self {
        let valid_encoding = std::str::from_utf8(&value).is_ok();
        Self {
            kind,
            value: Some(value),
            position,
            valid_encoding,
        }
    }

    /// Create a value-less token
    pub fn bare(kind: CanonicalKind, position: Position) -> Self {
        Self {
            kind,
            value: None,
            position,
            valid_encoding: true,
        }
    }

    /// Render the token in the canonical text form:
    /// `<name> [b0, b1, ...] <line>:<column>` with the value omitted for
    /// value-less kinds. Values print as explicit byte values so output is
    /// byte-exact even for non-UTF-8 content.
    pub fn render(&self) -> String {
        match &self.value {
            Some(bytes) => format!(
                "{} {} {}",
                self.kind.as_str(),
                render_bytes(bytes),
                self.position
            ),
            None => format!("{} {}", self.kind.as_str(), self.position),
        }
    }
}

impl fmt::Display for CanonicalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Render a byte sequence as `[b0, b1, ...]`
fn render_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4 + 2);
    out.push('[');
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&byte.to_string());
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::keywords::Keyword;

    #[test]
    fn test_canonical_names() {
        assert_eq!(CanonicalKind::Identifier.as_str(), "tIDENTIFIER");
        assert_eq!(CanonicalKind::OperatorAssign.as_str(), "tOP_ASGN");
        assert_eq!(CanonicalKind::EmbexprBegin.as_str(), "tSTRING_DBEG");
        assert_eq!(CanonicalKind::Keyword(Keyword::Def).as_str(), "kDEF");
        assert_eq!(CanonicalKind::EndOfData.as_str(), "t__END__");
    }

    #[test]
    fn test_literal_markers() {
        assert!(CanonicalKind::StringBegin.is_literal_begin());
        assert!(CanonicalKind::RegexpBegin.is_literal_begin());
        assert!(CanonicalKind::StringEnd.is_literal_end());
        assert!(CanonicalKind::RegexpEnd.is_literal_end());
        assert!(CanonicalKind::StringContent.is_content());

        // Backtick and symbol openers do not open a tracked context
        assert!(!CanonicalKind::XstringBegin.is_literal_begin());
        assert!(!CanonicalKind::SymbolBegin.is_literal_begin());
        assert!(!CanonicalKind::EmbexprBegin.is_literal_begin());
    }

    #[test]
    fn test_value_bearing_kinds() {
        assert!(CanonicalKind::Identifier.carries_value());
        assert!(CanonicalKind::StringContent.carries_value());
        assert!(CanonicalKind::Integer.carries_value());
        assert!(!CanonicalKind::StringBegin.carries_value());
        assert!(!CanonicalKind::Assign.carries_value());
        assert!(!CanonicalKind::Keyword(Keyword::If).carries_value());
    }

    #[test]
    fn test_kind_classes() {
        assert_eq!(
            CanonicalKind::OperatorAssign.kind_class(),
            KindClass::Operator
        );
        assert_eq!(CanonicalKind::Constant.kind_class(), KindClass::Name);
        assert_eq!(CanonicalKind::StringBegin.kind_class(), KindClass::Delimiter);
        assert_eq!(CanonicalKind::Comma.kind_class(), KindClass::Punctuation);
        assert_eq!(CanonicalKind::Newline.kind_class(), KindClass::Structure);
    }

    #[test]
    fn test_render_with_value() {
        let token = CanonicalToken::with_value(
            CanonicalKind::StringContent,
            vec![104, 105, 10],
            Position::new(1, 4),
        );
        assert_eq!(token.render(), "tSTRING_CONTENT [104, 105, 10] 1:4");
        assert!(token.valid_encoding);
    }

    #[test]
    fn test_render_bare() {
        let token = CanonicalToken::bare(CanonicalKind::StringBegin, Position::new(1, 3));
        assert_eq!(token.render(), "tSTRING_BEG 1:3");
    }

    #[test]
    fn test_invalid_encoding_flag() {
        let token = CanonicalToken::with_value(
            CanonicalKind::StringContent,
            vec![0xFF],
            Position::new(2, 0),
        );
        assert!(!token.valid_encoding);
        assert_eq!(token.render(), "tSTRING_CONTENT [255] 2:0");
    }
}
