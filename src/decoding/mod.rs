// src/decoding/mod.rs

//! Turns raw candidate ids into token sequences.
//!
//! Two steps live here: normalizing what a user typed into a canonical
//! decimal digit string, and slicing that string into fixed-width tokens.

use crate::core::ChromaError;
use num_bigint::BigUint;
use num_traits::{Num, Zero};
use tracing::debug;

/// Splits `digits` left to right into segments of `width` characters and
/// parses each segment as an unsigned integer.
///
/// The final segment may be shorter than `width` and is parsed like any
/// other. No padding is applied.
///
/// # Leniency
/// A segment that fails to parse is *dropped*: it is neither replaced nor
/// reported. Callers rely on a malformed fragment simply being absent from
/// the token count (which then usually fails the perfect-square check).
///
/// # Arguments
/// * `digits` - Decimal digit string. Empty input yields no tokens.
/// * `width` - Segment width; must be positive (see [`Policy::validate`](crate::Policy::validate)).
///
/// # Examples
/// ```
/// use chromaq::decoding::decode_tokens;
///
/// assert_eq!(decode_tokens("00000010000002", 7), vec![1, 2]);
/// assert_eq!(decode_tokens("123456789", 7), vec![1234567, 89]);
/// ```
pub fn decode_tokens(digits: &str, width: usize) -> Vec<u64> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = digits.chars().collect();
    let tokens: Vec<u64> = chars
        .chunks(width)
        .filter_map(|segment| segment.iter().collect::<String>().parse::<u64>().ok())
        .collect();
    debug!(digits = chars.len(), width, tokens = tokens.len(), "decoded candidate");
    tokens
}

/// Normalizes raw user input into the canonical decimal digit string.
///
/// * `0b...` / `0B...` is read as an arbitrarily large binary integer and
///   re-rendered in decimal.
/// * Otherwise the input must consist of ASCII digits only; leading zeros
///   are stripped and an all-zero input becomes `"0"`.
///
/// # Returns
/// * `Err(ChromaError::InvalidCandidate)` for anything else.
pub fn normalize_candidate(raw: &str) -> Result<String, ChromaError> {
    let raw = raw.trim();
    if let Some(bits) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
        let value = BigUint::from_str_radix(bits, 2).map_err(|_| ChromaError::InvalidCandidate {
            message: format!("'{}' is not a valid binary literal", raw),
        })?;
        return Ok(value.to_str_radix(10));
    }

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChromaError::InvalidCandidate {
            message: format!("'{}' is not a valid integer string", raw),
        });
    }

    let stripped = raw.trim_start_matches('0');
    if stripped.is_empty() {
        return Ok(BigUint::zero().to_string());
    }
    Ok(stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(decode_tokens("", 7).is_empty());
    }

    #[test]
    fn test_short_trailing_segment_is_parsed() {
        assert_eq!(decode_tokens("1000000200", 7), vec![1000000, 200]);
        assert_eq!(decode_tokens("42", 7), vec![42]);
    }

    #[test]
    fn test_malformed_segments_are_dropped() {
        // Middle segment contains a letter, trailing fragment is junk
        assert_eq!(decode_tokens("0000010abcdefg0000003", 7), vec![10, 3]);
        assert_eq!(decode_tokens("1234567x", 7), vec![1234567]);
        assert_eq!(decode_tokens("-------", 7), Vec::<u64>::new());
    }

    #[test]
    fn test_non_ascii_does_not_split_code_points() {
        // "12é" is dropped as a whole segment
        assert_eq!(decode_tokens("12é4567891", 3), vec![456, 789, 1]);
    }

    #[test]
    fn test_normalize_decimal() {
        assert_eq!(normalize_candidate("000123").unwrap(), "123");
        assert_eq!(normalize_candidate("  42 ").unwrap(), "42");
        assert_eq!(normalize_candidate("0000").unwrap(), "0");
    }

    #[test]
    fn test_normalize_binary() {
        assert_eq!(normalize_candidate("0b1010").unwrap(), "10");
        assert_eq!(normalize_candidate("0B0").unwrap(), "0");
        // 2^80 overflows every primitive integer
        let big = format!("0b1{}", "0".repeat(80));
        assert_eq!(normalize_candidate(&big).unwrap(), "1208925819614629174706176");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(normalize_candidate("12a"), Err(ChromaError::InvalidCandidate { .. })));
        assert!(matches!(normalize_candidate("-5"), Err(ChromaError::InvalidCandidate { .. })));
        assert!(matches!(normalize_candidate(""), Err(ChromaError::InvalidCandidate { .. })));
        assert!(matches!(normalize_candidate("0b102"), Err(ChromaError::InvalidCandidate { .. })));
    }
}
