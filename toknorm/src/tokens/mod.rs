//! Token system for the toknorm pipeline
//!
//! Two vocabularies live here. [`RawToken`] is a lexical unit exactly as the
//! upstream Ruby lexer reported it: an open-ended category string plus raw
//! text. [`CanonicalToken`] is the normalized unit this tool emits: a closed
//! [`CanonicalKind`], an optional decoded byte value, and the original start
//! position. The classifier (see [`crate::classify`]) is the only path from
//! one vocabulary to the other.

pub mod canonical;
pub mod raw;

// Re-export key types for convenience
pub use canonical::{CanonicalKind, CanonicalToken, KindClass};
pub use raw::{RawToken, IGNORED_CATEGORIES, KEYWORD_CATEGORY, OPERATOR_CATEGORY};

// Re-export position from utils
pub use crate::utils::Position;
