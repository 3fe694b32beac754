//! Configuration module for toknorm
//!
//! Security boundaries are compile-time constants; user-facing behavior is
//! controlled through runtime preferences read from the environment.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
