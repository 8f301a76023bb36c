// src/validation/color.rs

/// Renders a token as a `#rrggbb` color.
///
/// `token - 1` is printed as six lowercase hex digits, so `1 → #000000` and
/// `16^6 → #ffffff`. Only called on tokens that already passed the range
/// check; a zero token saturates to `#000000` rather than underflowing.
pub fn to_color(token: u64) -> String {
    format!("#{:06x}", token.saturating_sub(1))
}
