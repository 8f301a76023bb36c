//! Fixed policy constants of the acceptance pipeline.

/// Constants governing decoding, validation and angle derivation.
pub mod chroma_constants {
    /// Number of decimal digits consumed per token.
    pub const SEGMENT_WIDTH: usize = 7;
    /// Smallest acceptable token (maps to `#000000`).
    pub const MIN_TOKEN: u64 = 1;
    /// Largest acceptable token, `16^6` (maps to `#ffffff`).
    pub const MAX_TOKEN: u64 = 16_777_216;
    /// Number of discrete rotation angles; the step is `2π / ANGLE_STEPS`.
    pub const ANGLE_STEPS: u64 = 32;
    /// Used for rotation angles
    pub const PI: f64 = std::f64::consts::PI;
}
