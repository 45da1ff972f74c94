//! # Annotation Repositories
//!
//! Each repository is a façade over exactly one storage key holding one
//! versioned JSON envelope. Every mutating operation reads the full
//! envelope, mutates it in memory, and rewrites the whole thing before
//! returning; the full-envelope rewrite is the sole consistency mechanism.
//!
//! On read, an envelope that fails to parse is treated as corrupt and
//! discarded: the repository resets to empty rather than erroring.

pub mod favorites;
pub mod notes;

/// Schema version written into every persisted envelope.
pub const ENVELOPE_VERSION: &str = "1.0";
