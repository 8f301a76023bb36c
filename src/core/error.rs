// src/core/error.rs

//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier for one lane (parallel track) of a derived circuit.
/// Lanes map one-to-one onto qubit/bit positions of whatever backend
/// eventually consumes the instruction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(pub usize);

impl Lane {
    /// Returns the raw lane index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Errors raised by the pipeline.
///
/// Grid rejections (shape, range, adjacency) are *not* errors: they are
/// reported through [`AcceptanceReport`](crate::validation::AcceptanceReport).
/// These variants cover malformed raw input, unusable policies and callers
/// breaking the derivation preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromaError {
    /// The raw candidate id is neither a decimal digit string nor a `0b` binary literal.
    #[error("Invalid Candidate: {message}")]
    InvalidCandidate {
        /// InvalidCandidate failure message
        message: String,
    },

    /// A policy violates its own consistency rules (zero width, empty gate table, ...).
    #[error("Invalid Policy: {message}")]
    InvalidPolicy {
        /// InvalidPolicy failure message
        message: String,
    },

    /// The derivation engine was handed a grid that cannot satisfy its preconditions.
    #[error("Precondition Violation: {message}")]
    PreconditionViolation {
        /// PreconditionViolation failure message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChromaError::InvalidPolicy { message: "segment_width must be positive".to_string() };
        assert_eq!(err.to_string(), "Invalid Policy: segment_width must be positive");
    }

    #[test]
    fn test_lane_display() {
        assert_eq!(Lane(3).to_string(), "q3");
        assert_eq!(Lane(3).index(), 3);
    }
}
