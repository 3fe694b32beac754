//! Core normalization engine
//!
//! One pass over the filtered raw token sequence: classify, route through the
//! literal context stack, decode content, emit canonical tokens. Fail-fast:
//! the first stage error aborts the current input and no partial output is
//! returned.

use crate::classify::{self, ClassifyError};
use crate::config::compile_time::raw_stream::MAX_RAW_TOKEN_COUNT;
use crate::config::runtime::NormalizePreferences;
use crate::literal::{decode, DecodeError, LiteralTracker, StackEffect, TrackerError};
use crate::logging::codes;
use crate::tokens::{CanonicalKind, CanonicalToken, KindClass, RawToken};
use crate::{log_debug, log_error, log_success, log_warning};

/// Normalization errors aggregated across the classifier, tracker and decoder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("literal context tracking failed: {0}")]
    Tracker(#[from] TrackerError),

    #[error("content decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("too many tokens: {count} (max {MAX_RAW_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl NormalizeError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            NormalizeError::Classify(e) => e.error_code(),
            NormalizeError::Tracker(e) => e.error_code(),
            NormalizeError::Decode(e) => e.error_code(),
            NormalizeError::TooManyTokens { .. } => codes::raw_stream::TOO_MANY_TOKENS,
        }
    }
}

/// Essential normalization metrics with runtime preferences
#[derive(Debug, Default, Clone)]
pub struct NormalizeMetrics {
    pub total_tokens: usize,
    pub skipped_tokens: usize,
    pub keyword_tokens: usize,
    pub operator_tokens: usize,
    pub name_tokens: usize,
    pub literal_tokens: usize,
    pub content_tokens: usize,
    pub invalid_encoding_tokens: usize,
    pub max_context_depth: usize,

    // Runtime preference-controlled metrics
    pub kind_usage_patterns: std::collections::HashMap<&'static str, usize>,
}

impl NormalizeMetrics {
    pub(crate) fn record_kind(&mut self, kind: CanonicalKind, preferences: &NormalizePreferences) {
        self.total_tokens += 1;

        if preferences.collect_detailed_metrics {
            match kind.kind_class() {
                KindClass::Keyword => self.keyword_tokens += 1,
                KindClass::Operator => self.operator_tokens += 1,
                KindClass::Name => self.name_tokens += 1,
                KindClass::Literal => self.literal_tokens += 1,
                KindClass::Content => self.content_tokens += 1,
                _ => {}
            }
        }

        if preferences.track_kind_patterns {
            *self.kind_usage_patterns.entry(kind.as_str()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_skip(&mut self) {
        self.skipped_tokens += 1;
    }

    pub(crate) fn record_context_depth(&mut self, depth: usize) {
        self.max_context_depth = self.max_context_depth.max(depth);
    }

    pub(crate) fn record_invalid_encoding(&mut self) {
        self.invalid_encoding_tokens += 1;
    }
}

/// Core normalizer with global logging integration
///
/// Owns the literal context stack for exactly one input; a fresh pass resets
/// all state.
pub struct Normalizer {
    tracker: LiteralTracker,
    metrics: NormalizeMetrics,
    preferences: NormalizePreferences,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            tracker: LiteralTracker::new(),
            metrics: NormalizeMetrics::default(),
            preferences: NormalizePreferences::default(),
        }
    }

    pub fn with_preferences(preferences: NormalizePreferences) -> Self {
        Self {
            tracker: LiteralTracker::new(),
            metrics: NormalizeMetrics::default(),
            preferences,
        }
    }

    pub fn metrics(&self) -> &NormalizeMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &NormalizePreferences {
        &self.preferences
    }

    /// Check that every literal opened during the last pass was closed
    pub fn is_balanced(&self) -> bool {
        self.tracker.is_balanced()
    }

    /// Normalize a raw token sequence into canonical tokens
    pub fn normalize(&mut self, raw_tokens: &[RawToken]) -> Result<Vec<CanonicalToken>, NormalizeError> {
        // Reset state for this pass
        self.tracker = LiteralTracker::new();
        self.metrics = NormalizeMetrics::default();

        if raw_tokens.len() > MAX_RAW_TOKEN_COUNT {
            let error = NormalizeError::TooManyTokens {
                count: raw_tokens.len(),
            };
            log_error!(error.error_code(), "Token limit exceeded",
                "token_count" => raw_tokens.len(),
                "limit" => MAX_RAW_TOKEN_COUNT
            );
            return Err(error);
        }

        log_debug!("Starting normalization",
            "raw_tokens" => raw_tokens.len()
        );

        let mut tokens = Vec::with_capacity(raw_tokens.len());

        for raw in raw_tokens {
            if raw.is_ignorable() {
                self.metrics.record_skip();
                continue;
            }

            let token = self.normalize_one(raw).map_err(|error| {
                log_error!(error.error_code(), "Normalization failed",
                    position = raw.position,
                    "category" => raw.category.as_str(),
                    "text" => raw.text.as_str()
                );
                error
            })?;

            tokens.push(token);
        }

        if !self.tracker.is_balanced() {
            // A dangling begin is tolerated (truncated input); an end without
            // a begin is not, and failed above
            let open = self.tracker.open_contexts();
            log_warning!("Literal context still open at end of stream",
                "depth" => open.len(),
                "innermost_delimiter" => format!("{:?}", open.last().map(|c| c.delimiter.as_str()).unwrap_or(""))
            );
        }

        log_success!(codes::success::NORMALIZATION_COMPLETE,
            "Normalization completed",
            "canonical_tokens" => tokens.len(),
            "skipped_tokens" => self.metrics.skipped_tokens,
            "max_context_depth" => self.metrics.max_context_depth
        );

        Ok(tokens)
    }

    /// Classify, track and decode a single significant raw token
    fn normalize_one(&mut self, raw: &RawToken) -> Result<CanonicalToken, NormalizeError> {
        let kind = classify::classify(&raw.category, &raw.text)?;

        let effect = self.tracker.observe(kind, &raw.text, raw.position)?;
        self.metrics.record_context_depth(self.tracker.depth());

        if self.preferences.log_context_transitions && effect != StackEffect::None {
            log_debug!("Literal context transition",
                "effect" => format!("{:?}", effect),
                "depth" => self.tracker.depth(),
                "delimiter" => raw.text.as_str()
            );
        }

        let token = if kind.is_content() {
            let context = self.tracker.require_current(kind, raw.position)?;
            let decoded = decode(context, &raw.text).map_err(|e| self.decode_error(e))?;
            CanonicalToken::with_value(kind, decoded, raw.position)
        } else if kind.carries_value() {
            CanonicalToken::with_value(kind, raw.text.clone().into_bytes(), raw.position)
        } else {
            CanonicalToken::bare(kind, raw.position)
        };

        if !token.valid_encoding {
            self.metrics.record_invalid_encoding();
        }

        self.metrics.record_kind(kind, &self.preferences);

        Ok(token)
    }

    fn decode_error(&self, error: DecodeError) -> NormalizeError {
        if self.preferences.log_context_transitions {
            log_debug!("Decoder rejected content",
                "depth" => self.tracker.depth()
            );
        }
        NormalizeError::Decode(error)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
