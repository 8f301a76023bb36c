// src/lib.rs

//! `chromaq` - Deterministic circuit derivation from color-index grids
//!
//! A candidate id (an arbitrarily large non-negative integer) is cut into
//! fixed-width decimal tokens, laid out as a square grid of color indexes,
//! and validated: the token count must be a perfect square, every token must
//! be in range, and no two orthogonal neighbors may share a token. Accepted
//! grids drive the derivation of a quantum circuit and its classical shadow.

pub mod core;
pub mod operations;
pub mod decoding;
pub mod validation;
pub mod circuits;
pub mod derivation;
pub mod sampling;
pub mod artifacts;

// Re-export the most common types for easier top-level use
pub use core::{ChromaError, Lane, Policy};
pub use operations::{Gate, GateKind, Instruction};
pub use decoding::{decode_tokens, normalize_candidate};
pub use validation::{verify, verify_candidate, to_color, AcceptanceReport};
pub use circuits::{Circuit, CircuitBackend, CircuitBuilder, compose_side_by_side, compose_text_side_by_side};
pub use derivation::{Deriver, DerivationOptions, DerivationResult};
pub use sampling::sample_candidate;

// Example 1: End-to-end acceptance and derivation
// Decodes a 2x2 grid, accepts it and derives both circuits.
/// ```
/// use chromaq::{verify_candidate, Deriver, DerivationOptions, Policy, ChromaError};
///
/// # fn main() -> Result<(), ChromaError> {
/// let policy = Policy::default();
///
/// // Tokens [10, 20, 30, 40], each a 7-digit segment
/// let report = verify_candidate("0000010000002000000300000040", false, &policy);
/// assert!(report.is_ok());
/// assert_eq!(report.side(), 2);
///
/// let options = DerivationOptions { max_lanes: 2, max_layers: 2, reversible_only: false };
/// let result = Deriver::new(policy).derive(report.tokens(), report.side(), options)?;
///
/// // 10 -> rz, 20 -> rx, 30 -> t, 40 -> s
/// assert_eq!(result.quantum().operations().count(), 4);
/// assert_eq!(result.quantum().barrier_count(), 2);
/// assert!(result.classical().is_empty());
/// println!("{}", result.quantum());
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Rejection
// A malformed trailing fragment is dropped, leaving a non-square token count.
/// ```
/// use chromaq::{verify_candidate, Policy};
///
/// let report = verify_candidate("000001000000200000030abc", false, &Policy::default());
/// assert!(!report.is_ok());
/// assert_eq!(report.tokens(), [10, 20, 30]);
/// assert_eq!(report.reason(), "Token count 3 is not a perfect square.");
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
