//! Error types surfaced across the crate's boundary (the workload parser).
//!
//! The scheduling core itself never returns a `Result`: a violated invariant
//! there is a programmer error (caught by `assert!`/`debug_assert!`), not a
//! recoverable condition. Only input parsing, which deals with untrusted
//! text, has a typed error.

use thiserror::Error;

/// Everything that can go wrong while parsing a workload file.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("line {line}: malformed input ({reason})")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: value out of range ({reason})")]
    OutOfRange { line: usize, reason: String },

    #[error("workload file is missing its two parameter lines")]
    MissingParameters,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
