// src/validation/report.rs

use std::fmt;

/// Reason reported for an accepted grid.
pub const REASON_ACCEPTED: &str = "Accepted.";
/// Reason reported when a token falls outside the policy range.
pub const REASON_OUT_OF_RANGE: &str = "One or more tokens are outside [1..16^6].";
/// Reason reported when two orthogonal neighbors hold the same token.
pub const REASON_ADJACENCY: &str = "Adjacency conflict: at least one orthogonal neighbor pair is equal.";

/// The immutable verdict of one validation call.
///
/// Fields are private: a report is created once by the validator and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptanceReport {
    ok: bool,
    reason: String,
    m: usize,
    tokens: Vec<u64>,
    colors: Vec<String>,
}

impl AcceptanceReport {
    /// Builds a rejection. Colors are always empty. (Internal visibility)
    pub(crate) fn rejected(reason: impl Into<String>, m: usize, tokens: Vec<u64>) -> Self {
        Self { ok: false, reason: reason.into(), m, tokens, colors: Vec::new() }
    }

    /// Builds an acceptance carrying one color per token. (Internal visibility)
    pub(crate) fn accepted(m: usize, tokens: Vec<u64>, colors: Vec<String>) -> Self {
        Self { ok: true, reason: REASON_ACCEPTED.to_string(), m, tokens, colors }
    }

    /// Whether the grid passed every check.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Human-readable diagnostic, `"Accepted."` on success.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Grid side length. `0` when the shape check failed.
    pub fn side(&self) -> usize {
        self.m
    }

    /// The decoded tokens, row-major.
    pub fn tokens(&self) -> &[u64] {
        &self.tokens
    }

    /// `#rrggbb` per token; empty unless accepted.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl fmt::Display for AcceptanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Acceptance check: {}", self.reason)?;
        if !self.ok {
            return Ok(());
        }
        writeln!(f, "Grid: {} x {}  (tokens={})", self.m, self.m, self.tokens.len())?;
        for row in self.colors.chunks(self.m.max(1)) {
            writeln!(f, "  {}", row.join(" "))?;
        }
        Ok(())
    }
}
