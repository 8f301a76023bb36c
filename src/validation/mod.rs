// src/validation/mod.rs

//! Validates decoded token grids against the acceptance policy.
//!
//! Three checks run in a fixed order and the first failure wins:
//! shape (perfect-square token count), range, then orthogonal adjacency.
//! Failures are never errors; they come back as a rejected
//! [`AcceptanceReport`] carrying the reason.

mod color;
mod report;

pub use color::to_color;
pub use report::{AcceptanceReport, REASON_ACCEPTED, REASON_ADJACENCY, REASON_OUT_OF_RANGE};

use crate::core::Policy;
use crate::decoding::decode_tokens;
use tracing::debug;

// --- Helper Functions ---

/// Returns `true` if `n` is a positive perfect square.
///
/// Zero is *not* accepted: an empty token list must fail the shape check.
pub fn is_perfect_square(n: usize) -> bool {
    if n == 0 {
        return false;
    }
    let r = n.isqrt();
    r * r == n
}

/// Returns `true` if any two orthogonally adjacent cells of the `m × m`
/// row-major grid hold equal tokens.
///
/// Each cell is compared with its right and down neighbor, so every pair is
/// visited once. With `wrap` (and `m > 1`) the grid is a torus: the last
/// column meets the first column of the same row and the last row meets the
/// first row of the same column.
///
/// Token counts that are not a perfect square are reported as conflicting.
pub fn has_adjacent_conflict(tokens: &[u64], wrap: bool) -> bool {
    if !is_perfect_square(tokens.len()) {
        return true;
    }
    let m = tokens.len().isqrt();
    let at = |r: usize, c: usize| tokens[r * m + c];

    for r in 0..m {
        for c in 0..m {
            let current = at(r, c);

            // right
            if c + 1 < m {
                if current == at(r, c + 1) {
                    return true;
                }
            } else if wrap && m > 1 && current == at(r, 0) {
                return true;
            }

            // down
            if r + 1 < m {
                if current == at(r + 1, c) {
                    return true;
                }
            } else if wrap && m > 1 && current == at(0, c) {
                return true;
            }
        }
    }
    false
}

/// Returns `true` if every token lies in the policy's closed range.
pub fn are_valid_tokens(tokens: &[u64], policy: &Policy) -> bool {
    tokens.iter().all(|&token| policy.in_range(token))
}

// --- Public Validation Functions ---

/// Validates an already-decoded token list.
///
/// # Arguments
/// * `tokens` - Row-major grid tokens.
/// * `wrap` - Treat the grid as toroidal for the adjacency check.
/// * `policy` - Supplies the token range.
///
/// # Returns
/// An [`AcceptanceReport`]. `side()` is `0` when the shape check fails and
/// `floor(sqrt(len))` otherwise, even for range or adjacency rejections.
pub fn verify(tokens: Vec<u64>, wrap: bool, policy: &Policy) -> AcceptanceReport {
    let count = tokens.len();
    if !is_perfect_square(count) {
        debug!(count, "rejected: token count is not a perfect square");
        return AcceptanceReport::rejected(format!("Token count {} is not a perfect square.", count), 0, tokens);
    }

    let m = count.isqrt();
    if !are_valid_tokens(&tokens, policy) {
        debug!(m, "rejected: token out of range");
        return AcceptanceReport::rejected(REASON_OUT_OF_RANGE, m, tokens);
    }
    if has_adjacent_conflict(&tokens, wrap) {
        debug!(m, wrap, "rejected: adjacency conflict");
        return AcceptanceReport::rejected(REASON_ADJACENCY, m, tokens);
    }

    let colors = tokens.iter().map(|&token| to_color(token)).collect();
    debug!(m, wrap, "accepted");
    AcceptanceReport::accepted(m, tokens, colors)
}

/// Decodes a canonical decimal candidate with the policy's segment width and validates it.
///
/// # Examples
/// ```
/// use chromaq::{verify_candidate, Policy};
///
/// // Tokens [10, 20, 30, 40] as four 7-digit segments
/// let report = verify_candidate("0000010000002000000300000040", false, &Policy::default());
/// assert!(report.is_ok());
/// assert_eq!(report.side(), 2);
/// ```
pub fn verify_candidate(digits: &str, wrap: bool, policy: &Policy) -> AcceptanceReport {
    verify(decode_tokens(digits, policy.segment_width), wrap, policy)
}
