// Internal modules
pub mod classify;
pub mod config;
pub mod file_processor;
pub mod literal;
#[macro_use]
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod raw_stream;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{PipelineError, PipelineResult};
pub use tokens::{CanonicalKind, CanonicalToken, RawToken};

// Re-export pipeline output for machine consumers
pub use pipeline::output::PipelineOutput;
