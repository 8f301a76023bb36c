// src/sampling/mod.rs

//! Random generation of candidate ids that pass validation.

use crate::core::{ChromaError, Policy};
use crate::validation::has_adjacent_conflict;
use tracing::debug;

/// Draws a uniformly-ish distributed value in `lo..=hi`.
fn random_in(lo: u64, hi: u64) -> u64 {
    let r = rand::random::<u64>();
    match (hi - lo).checked_add(1) {
        Some(span) => lo + r % span,
        None => r,
    }
}

/// Produces a random candidate id whose `side × side` grid is accepted under `policy`.
///
/// Every token is rendered as exactly `segment_width` digits. The first
/// token never starts with a zero, so the id survives
/// [`normalize_candidate`](crate::normalize_candidate) unchanged and decodes
/// back into the same grid.
///
/// # Returns
/// * `Err(ChromaError::PreconditionViolation)` if `side` is zero.
/// * `Err(ChromaError::InvalidPolicy)` if the policy range is too narrow to
///   avoid neighbor conflicts (fewer than five representable tokens) or has
///   no token with a non-zero leading digit.
pub fn sample_candidate(side: usize, wrap: bool, policy: &Policy) -> Result<String, ChromaError> {
    if side == 0 {
        return Err(ChromaError::PreconditionViolation { message: "grid side must be positive".to_string() });
    }
    policy.validate()?;

    let width = policy.segment_width;
    let exponent = u32::try_from(width).unwrap_or(u32::MAX);
    let widest = 10u64.checked_pow(exponent).map_or(u64::MAX, |p| p - 1);
    let lo = policy.min_token;
    let hi = policy.max_token.min(widest);
    let lead_lo = 10u64.checked_pow(exponent - 1).unwrap_or(u64::MAX).max(lo);

    // Each cell has at most four neighbors to avoid.
    if hi < lo || hi - lo < 4 || lead_lo > hi {
        return Err(ChromaError::InvalidPolicy {
            message: format!("token range [{}..{}] is too narrow to sample {}-digit grids", lo, hi, width),
        });
    }

    let mut tokens: Vec<u64> = Vec::with_capacity(side * side);
    for r in 0..side {
        for c in 0..side {
            let (cell_lo, must_avoid) = if r == 0 && c == 0 {
                (lead_lo, Vec::new())
            } else {
                (lo, neighbors_so_far(&tokens, side, r, c, wrap))
            };
            let token = loop {
                let candidate = random_in(cell_lo, hi);
                if !must_avoid.contains(&candidate) {
                    break candidate;
                }
            };
            tokens.push(token);
        }
    }
    debug_assert!(!has_adjacent_conflict(&tokens, wrap));

    let digits: String = tokens.iter().map(|t| format!("{:0width$}", t, width = width)).collect();
    debug!(side, wrap, digits = digits.len(), "sampled candidate");
    Ok(digits)
}

/// Tokens already placed that will be orthogonal neighbors of cell `(r, c)`.
fn neighbors_so_far(tokens: &[u64], m: usize, r: usize, c: usize, wrap: bool) -> Vec<u64> {
    let mut out = Vec::with_capacity(4);
    if c > 0 {
        out.push(tokens[r * m + c - 1]);
    }
    if r > 0 {
        out.push(tokens[(r - 1) * m + c]);
    }
    if wrap && m > 1 {
        if c == m - 1 {
            out.push(tokens[r * m]);
        }
        if r == m - 1 {
            out.push(tokens[c]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::normalize_candidate;
    use crate::validation::verify_candidate;

    #[test]
    fn test_sampled_candidates_are_accepted() -> Result<(), ChromaError> {
        let policy = Policy::default();
        for side in 1..6 {
            for wrap in [false, true] {
                let digits = sample_candidate(side, wrap, &policy)?;
                assert_eq!(digits.len(), side * side * 7);
                assert_eq!(normalize_candidate(&digits)?, digits);
                let report = verify_candidate(&digits, wrap, &policy);
                assert!(report.is_ok(), "side={} wrap={} reason={}", side, wrap, report.reason());
                assert_eq!(report.side(), side);
            }
        }
        Ok(())
    }

    #[test]
    fn test_narrow_policy_wraps_tightly() -> Result<(), ChromaError> {
        // Exactly five tokens available: conflicts are always avoidable
        let policy = Policy { segment_width: 1, min_token: 1, max_token: 5, ..Policy::default() };
        for _ in 0..50 {
            let digits = sample_candidate(4, true, &policy)?;
            assert!(verify_candidate(&digits, true, &policy).is_ok());
        }
        Ok(())
    }

    #[test]
    fn test_unsamplable_policies() {
        let too_narrow = Policy { min_token: 1, max_token: 4, ..Policy::default() };
        assert!(matches!(sample_candidate(2, false, &too_narrow), Err(ChromaError::InvalidPolicy { .. })));

        // No 2-digit token in range
        let no_lead = Policy { segment_width: 2, min_token: 1, max_token: 9, ..Policy::default() };
        assert!(matches!(sample_candidate(2, false, &no_lead), Err(ChromaError::InvalidPolicy { .. })));

        assert!(matches!(
            sample_candidate(0, false, &Policy::default()),
            Err(ChromaError::PreconditionViolation { .. })
        ));
    }
}
