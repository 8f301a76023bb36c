// src/operations/mod.rs

//! Defines the symbolic gate set and the instructions the derivation engine emits.
//!
//! Gates are a closed, table-driven set. Each gate carries two capabilities
//! the engine dispatches on: its [`GateKind`] (how many lanes it touches and
//! whether it is parametrized) and whether it has an equivalent in the
//! classical shadow.

use crate::core::Lane;
use serde::Deserialize;
use std::fmt;

/// Structural class of a [`Gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Fixed single-lane operation (`x`, `y`, `z`, `h`, `s`, `sdg`, `t`, `tdg`).
    Single,
    /// Parametrized single-lane rotation (`rx`, `ry`, `rz`).
    Rotation,
    /// Controlled operation across two lanes (`cx`).
    TwoLane,
}

/// The symbolic operations a grid token can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Bit flip. The only single-lane gate with a classical-shadow counterpart.
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    Rx,
    Ry,
    Rz,
    /// Controlled flip.
    Cx,
}

/// Production op table. Ordinal position is significant: `token mod 12`
/// indexes straight into it.
pub const DEFAULT_GATE_TABLE: [Gate; 12] = [
    Gate::X,
    Gate::Y,
    Gate::Z,
    Gate::H,
    Gate::S,
    Gate::Sdg,
    Gate::T,
    Gate::Tdg,
    Gate::Rx,
    Gate::Ry,
    Gate::Rz,
    Gate::Cx,
];

impl Gate {
    /// Lowercase mnemonic used by the sequence serializer.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::Rx => "rx",
            Gate::Ry => "ry",
            Gate::Rz => "rz",
            Gate::Cx => "cx",
        }
    }

    /// Symbol drawn in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::Sdg => "S†",
            Gate::T => "T",
            Gate::Tdg => "T†",
            Gate::Rx => "Rx",
            Gate::Ry => "Ry",
            Gate::Rz => "Rz",
            Gate::Cx => "@",
        }
    }

    /// How many lanes the gate touches and whether it takes an angle.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Rx | Gate::Ry | Gate::Rz => GateKind::Rotation,
            Gate::Cx => GateKind::TwoLane,
            _ => GateKind::Single,
        }
    }

    /// Whether the gate survives into the classical shadow.
    ///
    /// The shadow tracks reversible bit-flip state only, so `x` and `cx`
    /// have counterparts there; every phase or basis-changing gate and every
    /// rotation does not.
    pub fn has_shadow_equivalent(&self) -> bool {
        matches!(self, Gate::X | Gate::Cx)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a derived instruction sequence.
///
/// Instructions are owned by the [`Circuit`](crate::circuits::Circuit) that
/// holds them and are never shared between sequences; the classical shadow
/// receives its own clones.
#[derive(Debug, Clone, PartialEq)] // f64 angle rules out Eq
pub enum Instruction {
    /// Fixed single-lane gate (`GateKind::Single`).
    Single {
        gate: Gate,
        lane: Lane,
    },
    /// Controlled flip from `control` onto `target`. The two lanes always differ.
    Controlled {
        control: Lane,
        target: Lane,
    },
    /// Parametrized rotation by `angle` radians (`GateKind::Rotation`).
    Rotation {
        gate: Gate,
        angle: f64,
        lane: Lane,
    },
    /// Layer boundary marker. No operational effect.
    Barrier,
}

impl Instruction {
    /// Returns the lanes directly named by the instruction, control first.
    pub fn involved_lanes(&self) -> Vec<Lane> {
        match self {
            Instruction::Single { lane, .. } => vec![*lane],
            Instruction::Controlled { control, target } => vec![*control, *target],
            Instruction::Rotation { lane, .. } => vec![*lane],
            Instruction::Barrier => Vec::new(),
        }
    }

    /// The gate this instruction applies, if any.
    pub fn gate(&self) -> Option<Gate> {
        match self {
            Instruction::Single { gate, .. } | Instruction::Rotation { gate, .. } => Some(*gate),
            Instruction::Controlled { .. } => Some(Gate::Cx),
            Instruction::Barrier => None,
        }
    }

    /// Returns `true` for layer barriers.
    pub fn is_barrier(&self) -> bool {
        matches!(self, Instruction::Barrier)
    }

    /// Serialized token form: `name(lane)`, `name(angle,lane)` or `cx(control,target)`.
    /// Barriers have no textual form.
    pub fn sequence_token(&self) -> Option<String> {
        match self {
            Instruction::Single { gate, lane } => Some(format!("{}({})", gate, lane.0)),
            Instruction::Controlled { control, target } => Some(format!("cx({},{})", control.0, target.0)),
            Instruction::Rotation { gate, angle, lane } => Some(format!("{}({},{})", gate, angle, lane.0)),
            Instruction::Barrier => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_flip_gates_have_shadow() {
        let with_shadow: Vec<Gate> = DEFAULT_GATE_TABLE.iter().copied().filter(|g| g.has_shadow_equivalent()).collect();
        assert_eq!(with_shadow, vec![Gate::X, Gate::Cx]);
    }

    #[test]
    fn test_gate_kinds() {
        let rotations = DEFAULT_GATE_TABLE.iter().filter(|g| g.kind() == GateKind::Rotation).count();
        let singles = DEFAULT_GATE_TABLE.iter().filter(|g| g.kind() == GateKind::Single).count();
        assert_eq!(rotations, 3);
        assert_eq!(singles, 8);
        assert_eq!(Gate::Cx.kind(), GateKind::TwoLane);
    }

    #[test]
    fn test_sequence_tokens() {
        let single = Instruction::Single { gate: Gate::Sdg, lane: Lane(2) };
        let cx = Instruction::Controlled { control: Lane(0), target: Lane(3) };
        let rot = Instruction::Rotation { gate: Gate::Ry, angle: PI_OVER_2, lane: Lane(1) };
        assert_eq!(single.sequence_token().as_deref(), Some("sdg(2)"));
        assert_eq!(cx.sequence_token().as_deref(), Some("cx(0,3)"));
        assert_eq!(rot.sequence_token().as_deref(), Some("ry(1.5707963267948966,1)"));
        assert_eq!(Instruction::Barrier.sequence_token(), None);
        assert_eq!(cx.involved_lanes(), vec![Lane(0), Lane(3)]);
    }

    const PI_OVER_2: f64 = std::f64::consts::FRAC_PI_2;
}
