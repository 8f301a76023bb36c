// src/core/policy.rs

//! Injectable configuration for the decode/validate/derive pipeline.

use super::constants::chroma_constants::{ANGLE_STEPS, MAX_TOKEN, MIN_TOKEN, PI, SEGMENT_WIDTH};
use super::error::ChromaError;
use crate::operations::{Gate, DEFAULT_GATE_TABLE};
use serde::Deserialize;

/// The set of constants every pipeline stage consults.
///
/// `Policy::default()` is the production policy. Alternate policies exist so
/// tests (and curious users, via `--policy`) can exercise the pipeline with
/// different widths, bounds or gate tables without touching globals.
///
/// # Examples
///
/// ```
/// use chromaq::Policy;
///
/// let policy = Policy::from_toml_str("segment_width = 3\nmax_token = 999").unwrap();
/// assert_eq!(policy.segment_width, 3);
/// assert_eq!(policy.min_token, 1); // Missing keys keep their defaults
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Digits per token segment.
    pub segment_width: usize,
    /// Inclusive lower bound of the accepted token range.
    pub min_token: u64,
    /// Inclusive upper bound of the accepted token range.
    pub max_token: u64,
    /// Ordered op table indexed by `token mod gate_table.len()`.
    pub gate_table: Vec<Gate>,
    /// Number of discrete rotation angles in one full turn.
    pub angle_steps: u64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            segment_width: SEGMENT_WIDTH,
            min_token: MIN_TOKEN,
            max_token: MAX_TOKEN,
            gate_table: DEFAULT_GATE_TABLE.to_vec(),
            angle_steps: ANGLE_STEPS,
        }
    }
}

impl Policy {
    /// Parses a (possibly partial) TOML policy document and validates it.
    ///
    /// # Returns
    /// * `Ok(Policy)` with defaults filled in for missing keys.
    /// * `Err(ChromaError::InvalidPolicy)` if the TOML is malformed or the values are inconsistent.
    pub fn from_toml_str(source: &str) -> Result<Self, ChromaError> {
        let policy: Policy = toml::from_str(source).map_err(|e| ChromaError::InvalidPolicy {
            message: format!("Could not parse policy TOML: {}", e),
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the internal consistency of the policy.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if self.segment_width == 0 {
            return Err(ChromaError::InvalidPolicy { message: "segment_width must be positive".to_string() });
        }
        if self.min_token > self.max_token {
            return Err(ChromaError::InvalidPolicy {
                message: format!("min_token {} exceeds max_token {}", self.min_token, self.max_token),
            });
        }
        if self.gate_table.is_empty() {
            return Err(ChromaError::InvalidPolicy { message: "gate_table must not be empty".to_string() });
        }
        if self.angle_steps == 0 {
            return Err(ChromaError::InvalidPolicy { message: "angle_steps must be positive".to_string() });
        }
        Ok(())
    }

    /// Selects the table gate for `token`.
    pub fn gate_for(&self, token: u64) -> Gate {
        // Table length is tiny, the cast back to usize cannot truncate.
        let index = (token % self.gate_table.len() as u64) as usize;
        self.gate_table[index]
    }

    /// Deterministic discrete rotation angle for `token`.
    ///
    /// `((token mod angle_steps) + 1) * (2π / angle_steps)`. Never zero.
    /// With the default 32 steps this is `k * π/16` for `k` in `1..=32`.
    pub fn angle_for(&self, token: u64) -> f64 {
        let k = (token % self.angle_steps) + 1;
        k as f64 * (2.0 * PI / self.angle_steps as f64)
    }

    /// Whether `token` lies in the closed `[min_token, max_token]` range.
    pub fn in_range(&self, token: u64) -> bool {
        (self.min_token..=self.max_token).contains(&token)
    }
}
