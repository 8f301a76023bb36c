// src/derivation/mod.rs

//! Derives a quantum circuit and its classical shadow from an accepted grid.
//!
//! The engine walks the top-left `layers × lanes` block of the grid row by
//! row. Each token picks a gate from the policy's op table (or, in
//! reversible-only mode, is forced onto `x`/`cx`), and the gate's
//! capabilities decide which of the two sequences receive it.

mod results;

pub use results::DerivationResult;

use crate::circuits::{Circuit, CircuitBackend};
use crate::core::{ChromaError, Lane, Policy};
use crate::operations::{Gate, GateKind};
use tracing::{debug, trace};

/// Name given to the derived quantum circuit.
pub const QUANTUM_CIRCUIT_NAME: &str = "derived_quantum";
/// Name given to the derived classical-shadow circuit.
pub const CLASSICAL_CIRCUIT_NAME: &str = "classical_shadow";

/// Bounds and mode for one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationOptions {
    /// Upper bound on lanes; the engine uses `min(m, max_lanes)`.
    pub max_lanes: usize,
    /// Upper bound on layers; the engine uses `min(m, max_layers)`.
    pub max_layers: usize,
    /// Force every emitted instruction to have an identical shadow counterpart.
    pub reversible_only: bool,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self { max_lanes: 8, max_layers: 16, reversible_only: false }
    }
}

/// Deterministic grid-to-circuit derivation under a [`Policy`].
///
/// Holds no state between calls; deriving twice from the same inputs yields
/// structurally identical results.
///
/// # Examples
///
/// ```
/// use chromaq::{Deriver, DerivationOptions, Policy};
///
/// let deriver = Deriver::new(Policy::default());
/// let options = DerivationOptions { max_lanes: 2, max_layers: 2, reversible_only: true };
/// let result = deriver.derive(&[10, 21, 31, 40], 2, options).unwrap();
///
/// // Even tokens flip in place, odd tokens entangle with the other lane.
/// assert_eq!(result.quantum().to_sequence_line(), "x(0) cx(1,0) cx(0,1) x(1)");
/// assert_eq!(result.classical().to_sequence_line(), result.quantum().to_sequence_line());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deriver {
    policy: Policy,
}

impl Deriver {
    /// Creates a deriver for `policy`. The policy is validated on every derivation.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// Returns the policy supplying the gate table and angle steps.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Derives both circuits from a grid of side `m`.
    ///
    /// The grid must already have been accepted by
    /// [`verify`](crate::validation::verify); no check is re-run here.
    ///
    /// # Returns
    /// * `Ok(DerivationResult)` with the two circuits and the clamped bounds.
    /// * `Err(ChromaError::InvalidPolicy)` if the policy fails [`Policy::validate`].
    /// * `Err(ChromaError::PreconditionViolation)` if `tokens` holds fewer than `m * m` entries.
    pub fn derive(&self, tokens: &[u64], m: usize, options: DerivationOptions) -> Result<DerivationResult, ChromaError> {
        let lanes = m.min(options.max_lanes);
        let layers = m.min(options.max_layers);
        let mut quantum = Circuit::new(QUANTUM_CIRCUIT_NAME, lanes);
        let mut classical = Circuit::new(CLASSICAL_CIRCUIT_NAME, lanes);

        self.derive_into(tokens, m, options, &mut quantum, &mut classical)?;
        debug!(
            lanes,
            layers,
            quantum_ops = quantum.operations().count(),
            classical_ops = classical.len(),
            "derived circuits"
        );
        Ok(DerivationResult::new(quantum, classical, lanes, layers))
    }

    /// Streams the derivation into two arbitrary backends.
    ///
    /// Returns the clamped `(lanes, layers)` pair.
    pub fn derive_into<Q, C>(
        &self,
        tokens: &[u64],
        m: usize,
        options: DerivationOptions,
        quantum: &mut Q,
        classical: &mut C,
    ) -> Result<(usize, usize), ChromaError>
    where
        Q: CircuitBackend,
        C: CircuitBackend,
    {
        self.policy.validate()?;
        let required = m.checked_mul(m).ok_or_else(|| ChromaError::PreconditionViolation {
            message: format!("grid side {} overflows", m),
        })?;
        if tokens.len() < required {
            return Err(ChromaError::PreconditionViolation {
                message: format!("grid of side {} needs {} tokens, got {}", m, required, tokens.len()),
            });
        }

        let lanes = m.min(options.max_lanes);
        let layers = m.min(options.max_layers);

        for r in 0..layers {
            for c in 0..lanes {
                let token = tokens[r * m + c];
                let gate = self.select_gate(token, lanes, options.reversible_only);
                trace!(row = r, lane = c, token, gate = gate.name(), "cell");
                self.emit(gate, token, Lane(c), lanes, quantum, classical);
            }
            // Layer boundary, quantum side only
            quantum.barrier();
        }
        Ok((lanes, layers))
    }

    /// Picks the gate for a token, applying the reversible-only override.
    fn select_gate(&self, token: u64, lanes: usize, reversible_only: bool) -> Gate {
        if reversible_only {
            return if lanes > 1 && token % 2 == 1 { Gate::Cx } else { Gate::X };
        }
        self.policy.gate_for(token)
    }

    fn emit<Q, C>(&self, gate: Gate, token: u64, lane: Lane, lanes: usize, quantum: &mut Q, classical: &mut C)
    where
        Q: CircuitBackend,
        C: CircuitBackend,
    {
        match gate.kind() {
            GateKind::Single => {
                quantum.single(gate, lane);
                if gate.has_shadow_equivalent() {
                    classical.single(gate, lane);
                }
            }
            GateKind::TwoLane if lanes == 1 => {
                // No second lane to target: degrade to a plain flip
                quantum.single(Gate::X, lane);
                classical.single(Gate::X, lane);
            }
            GateKind::TwoLane => {
                let target = two_lane_target(lane, token, lanes);
                quantum.controlled(lane, target);
                if gate.has_shadow_equivalent() {
                    classical.controlled(lane, target);
                }
            }
            GateKind::Rotation => {
                quantum.rotation(gate, self.policy.angle_for(token), lane);
            }
        }
    }
}

/// Target lane for a two-lane op controlled by `control`.
///
/// `(control + 1 + token mod (lanes - 1)) mod lanes`: the shift lies in
/// `1..lanes`, so the target never equals the control. Requires `lanes > 1`.
pub fn two_lane_target(control: Lane, token: u64, lanes: usize) -> Lane {
    let span = (lanes - 1) as u64;
    let shift = 1 + (token % span) as usize;
    Lane((control.0 + shift) % lanes)
}
