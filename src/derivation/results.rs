// src/derivation/results.rs

use crate::circuits::Circuit;
use std::fmt;

/// The two instruction sequences derived from one accepted grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationResult {
    /// Every derived instruction, plus one barrier per layer.
    quantum: Circuit,
    /// Only the instructions with a classical-shadow equivalent. No barriers.
    classical: Circuit,
    /// Lane count actually used, `min(m, max_lanes)`.
    lanes: usize,
    /// Layer count actually used, `min(m, max_layers)`.
    layers: usize,
}

impl DerivationResult {
    /// (Internal visibility)
    pub(crate) fn new(quantum: Circuit, classical: Circuit, lanes: usize, layers: usize) -> Self {
        Self { quantum, classical, lanes, layers }
    }

    /// Returns the quantum circuit, barriers included.
    pub fn quantum(&self) -> &Circuit {
        &self.quantum
    }

    /// Returns the classical-shadow circuit.
    pub fn classical(&self) -> &Circuit {
        &self.classical
    }

    /// Returns the number of lanes used.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Returns the number of layers used.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Consumes the result, returning `(quantum, classical)`.
    pub fn into_circuits(self) -> (Circuit, Circuit) {
        (self.quantum, self.classical)
    }
}

impl fmt::Display for DerivationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Derivation Results:")?;
        writeln!(f, "  Lanes: {}  Layers: {}", self.lanes, self.layers)?;
        writeln!(f, "  Quantum:   {}", self.quantum.to_sequence_line())?;
        writeln!(f, "  Classical: {}", self.classical.to_sequence_line())
    }
}
