//! Nested literal context tracking
//!
//! String interpolation reopens nested begin/end pairs for embedded
//! expressions and heredocs interleave with enclosing strings, so open
//! literals are tracked as a depth-bounded stack rather than flags. The top
//! of the stack selects the decoding policy for content tokens. An end
//! marker on an empty stack means the classifier and the raw stream have
//! desynchronized; that is fatal for the current input.
use crate::config::compile_time::normalize::MAX_CONTEXT_DEPTH;
use crate::logging::codes;
use crate::tokens::CanonicalKind;
use crate::utils::Position;

/// One open string/regexp literal, identified by its opening delimiter text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralContext {
    /// Opening delimiter exactly as lexed (e.g. `"`, `'`, `/`, `<<~EOS`)
    pub delimiter: String,
    /// Where the literal was opened
    pub opened_at: Position,
}

impl LiteralContext {
    pub fn new(delimiter: impl Into<String>, opened_at: Position) -> Self {
        Self {
            delimiter: delimiter.into(),
            opened_at,
        }
    }
}

/// Literal context stack errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("literal {kind} at {position} with no open context")]
    UnbalancedLiteralContext { kind: String, position: Position },

    #[error("literal context nesting too deep: {depth} (max {MAX_CONTEXT_DEPTH}) at {position}")]
    ContextTooDeep { depth: usize, position: Position },
}

impl TrackerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            TrackerError::UnbalancedLiteralContext { .. } => codes::literal::UNBALANCED_CONTEXT,
            TrackerError::ContextTooDeep { .. } => codes::literal::CONTEXT_TOO_DEEP,
        }
    }
}

/// Result of observing one canonical kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEffect {
    /// A new context was pushed
    Pushed,
    /// The top context was popped
    Popped,
    /// The kind does not touch the stack
    None,
}

/// Stack of open literal contexts, owned by one normalization pass
#[derive(Debug, Default)]
pub struct LiteralTracker {
    stack: Vec<LiteralContext>,
}

impl LiteralTracker {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Route one classified token through the stack
    ///
    /// Begin kinds push a context carrying the raw delimiter text, end kinds
    /// pop; everything else passes through untouched. An end kind on an
    /// empty stack is fatal.
    pub fn observe(
        &mut self,
        kind: CanonicalKind,
        text: &str,
        position: Position,
    ) -> Result<StackEffect, TrackerError> {
        if kind.is_literal_begin() {
            if self.stack.len() >= MAX_CONTEXT_DEPTH {
                return Err(TrackerError::ContextTooDeep {
                    depth: self.stack.len() + 1,
                    position,
                });
            }
            self.stack.push(LiteralContext::new(text, position));
            return Ok(StackEffect::Pushed);
        }

        if kind.is_literal_end() {
            return match self.stack.pop() {
                Some(_) => Ok(StackEffect::Popped),
                None => Err(TrackerError::UnbalancedLiteralContext {
                    kind: kind.as_str().to_string(),
                    position,
                }),
            };
        }

        Ok(StackEffect::None)
    }

    /// The context governing content decoding right now
    pub fn current(&self) -> Option<&LiteralContext> {
        self.stack.last()
    }

    /// Like [`Self::current`] but fatal when no context is open
    ///
    /// Content outside any literal context indicates the same desync as an
    /// unmatched end marker.
    pub fn require_current(
        &self,
        kind: CanonicalKind,
        position: Position,
    ) -> Result<&LiteralContext, TrackerError> {
        self.current()
            .ok_or(TrackerError::UnbalancedLiteralContext {
                kind: kind.as_str().to_string(),
                position,
            })
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check that every opened literal has been closed
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Contexts still open, innermost last (for end-of-stream diagnostics)
    pub fn open_contexts(&self) -> &[LiteralContext] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pos(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn test_push_and_pop() {
        let mut tracker = LiteralTracker::new();

        let effect = tracker
            .observe(CanonicalKind::StringBegin, "\"", pos(1, 0))
            .unwrap();
        assert_eq!(effect, StackEffect::Pushed);
        assert_eq!(tracker.depth(), 1);
        assert_eq!(tracker.current().unwrap().delimiter, "\"");

        let effect = tracker
            .observe(CanonicalKind::StringEnd, "\"", pos(1, 5))
            .unwrap();
        assert_eq!(effect, StackEffect::Popped);
        assert!(tracker.is_balanced());
    }

    #[test]
    fn test_nested_contexts() {
        let mut tracker = LiteralTracker::new();

        // "a#{"b"}c" reopens a string inside the interpolation
        tracker
            .observe(CanonicalKind::StringBegin, "\"", pos(1, 0))
            .unwrap();
        tracker
            .observe(CanonicalKind::EmbexprBegin, "#{", pos(1, 2))
            .unwrap();
        tracker
            .observe(CanonicalKind::StringBegin, "'", pos(1, 4))
            .unwrap();

        assert_eq!(tracker.depth(), 2);
        assert_eq!(tracker.current().unwrap().delimiter, "'");

        tracker
            .observe(CanonicalKind::StringEnd, "'", pos(1, 6))
            .unwrap();
        assert_eq!(tracker.current().unwrap().delimiter, "\"");

        tracker
            .observe(CanonicalKind::StringEnd, "\"", pos(1, 9))
            .unwrap();
        assert!(tracker.is_balanced());
    }

    #[test]
    fn test_interpolation_markers_do_not_touch_stack() {
        let mut tracker = LiteralTracker::new();
        tracker
            .observe(CanonicalKind::StringBegin, "\"", pos(1, 0))
            .unwrap();

        let effect = tracker
            .observe(CanonicalKind::EmbexprBegin, "#{", pos(1, 2))
            .unwrap();
        assert_eq!(effect, StackEffect::None);
        let effect = tracker
            .observe(CanonicalKind::EmbexprEnd, "}", pos(1, 5))
            .unwrap();
        assert_eq!(effect, StackEffect::None);
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_end_on_empty_stack_is_fatal() {
        let mut tracker = LiteralTracker::new();
        let err = tracker
            .observe(CanonicalKind::StringEnd, "\"", pos(2, 3))
            .unwrap_err();

        assert_matches!(
            err,
            TrackerError::UnbalancedLiteralContext { ref kind, position }
                if kind == "tSTRING_END" && position == pos(2, 3)
        );
        assert_eq!(err.error_code().as_str(), "E030");
    }

    #[test]
    fn test_regexp_contexts() {
        let mut tracker = LiteralTracker::new();
        tracker
            .observe(CanonicalKind::RegexpBegin, "/", pos(1, 0))
            .unwrap();
        assert_eq!(tracker.current().unwrap().delimiter, "/");
        tracker
            .observe(CanonicalKind::RegexpEnd, "/", pos(1, 4))
            .unwrap();
        assert!(tracker.is_balanced());
    }

    #[test]
    fn test_require_current_on_empty_stack() {
        let tracker = LiteralTracker::new();
        let err = tracker
            .require_current(CanonicalKind::StringContent, pos(1, 1))
            .unwrap_err();
        assert_matches!(err, TrackerError::UnbalancedLiteralContext { .. });
    }

    #[test]
    fn test_dangling_begin_leaves_stack_open() {
        let mut tracker = LiteralTracker::new();
        tracker
            .observe(CanonicalKind::StringBegin, "\"", pos(1, 0))
            .unwrap();

        // No crash; the dangling context is observable for diagnostics
        assert!(!tracker.is_balanced());
        assert_eq!(tracker.open_contexts().len(), 1);
        assert_eq!(tracker.open_contexts()[0].opened_at, pos(1, 0));
    }

    #[test]
    fn test_depth_limit() {
        let mut tracker = LiteralTracker::new();
        for i in 0..MAX_CONTEXT_DEPTH {
            tracker
                .observe(CanonicalKind::StringBegin, "\"", pos(1, i as u32))
                .unwrap();
        }

        let err = tracker
            .observe(CanonicalKind::StringBegin, "\"", pos(2, 0))
            .unwrap_err();
        assert_matches!(err, TrackerError::ContextTooDeep { .. });
        assert_eq!(err.error_code().as_str(), "E033");
    }
}
