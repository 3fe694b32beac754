//! Literal context tracking and content decoding
//!
//! Two halves of one concern. The tracker maintains the stack of open
//! string/regexp contexts across arbitrarily nested interpolations and
//! heredocs; the decoder turns raw content text into literal bytes under the
//! policy selected by the top of that stack. State corruption here produces
//! wrong bytes rather than a crash, which is why stack discipline is enforced
//! with fatal errors instead of resynchronization.

pub mod decoder;
pub mod tracker;

pub use decoder::{decode, DecodeError};
pub use tracker::{LiteralContext, LiteralTracker, StackEffect, TrackerError};
