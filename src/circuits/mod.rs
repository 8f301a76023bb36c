// src/circuits/mod.rs

//! Defines structures for representing, building and rendering ordered
//! instruction sequences (`chromaq::operations::Instruction`).
//!
//! [`Circuit`] is the in-crate circuit backend: a named, lane-bounded list of
//! instructions that can be serialized to a single text line, drawn as an
//! ASCII diagram, or rasterized with [`Circuit::to_image`]. The [`CircuitBackend`] trait is the seam other backends
//! plug into.

mod compose;
mod raster;

pub use compose::{compose_side_by_side, compose_text_side_by_side, BACKGROUND, TEXT_BACKGROUND};
pub use raster::{kind_color, CANVAS, CELL, MARGIN};

use crate::core::Lane;
use crate::operations::{Gate, Instruction};
use std::fmt;

/// Receives instructions one kind at a time, in sequence order.
///
/// Analogy: the builder surface of `qiskit.QuantumCircuit` (`x(q)`,
/// `cx(c, t)`, `rx(theta, q)`, `barrier()`).
pub trait CircuitBackend {
    /// Applies a fixed single-lane gate.
    fn single(&mut self, gate: Gate, lane: Lane);
    /// Applies a controlled flip. `control != target`.
    fn controlled(&mut self, control: Lane, target: Lane);
    /// Applies a parametrized rotation by `angle` radians.
    fn rotation(&mut self, gate: Gate, angle: f64, lane: Lane);
    /// Marks a layer boundary.
    fn barrier(&mut self);

    /// Dispatches one instruction to the matching method.
    fn apply(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Single { gate, lane } => self.single(*gate, *lane),
            Instruction::Controlled { control, target } => self.controlled(*control, *target),
            Instruction::Rotation { gate, angle, lane } => self.rotation(*gate, *angle, *lane),
            Instruction::Barrier => self.barrier(),
        }
    }
}

/// An ordered sequence of instructions over a fixed number of lanes.
///
/// Analogy: Similar to `qiskit.QuantumCircuit(n, name=...)`.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// Label shown in the rendered diagram header.
    name: String,

    /// Number of lanes. Grows if an instruction names a lane beyond it.
    lanes: usize,

    /// The ordered sequence of instructions. Order is significant.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Creates a new, empty circuit over `lanes` lanes.
    pub fn new(name: impl Into<String>, lanes: usize) -> Self {
        Self {
            name: name.into(),
            lanes,
            instructions: Vec::new(),
        }
    }

    /// Adds a single instruction to the end of the sequence.
    ///
    /// Lanes named by the instruction that lie outside the current lane
    /// count extend it.
    pub fn add_instruction(&mut self, instruction: Instruction) {
        for lane in instruction.involved_lanes() {
            self.lanes = self.lanes.max(lane.0 + 1);
        }
        self.instructions.push(instruction);
    }

    /// Adds multiple instructions from an iterator to the end of the sequence.
    pub fn add_instructions<I>(&mut self, instructions: I)
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in instructions {
            self.add_instruction(instruction);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of lanes the circuit spans.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Returns the ordered instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the total number of instructions, barriers included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the circuit contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterates over the instructions that are not barriers.
    pub fn operations(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().filter(|instruction| !instruction.is_barrier())
    }

    /// Number of barriers (layer markers) in the sequence.
    pub fn barrier_count(&self) -> usize {
        self.instructions.iter().filter(|instruction| instruction.is_barrier()).count()
    }

    /// Serializes the sequence to one line of space-separated tokens,
    /// barriers excluded.
    ///
    /// # Examples
    /// ```
    /// use chromaq::{Circuit, CircuitBackend, Gate, Lane};
    ///
    /// let mut circuit = Circuit::new("demo", 2);
    /// circuit.single(Gate::H, Lane(0));
    /// circuit.barrier();
    /// circuit.controlled(Lane(0), Lane(1));
    /// assert_eq!(circuit.to_sequence_line(), "h(0) cx(0,1)");
    /// ```
    pub fn to_sequence_line(&self) -> String {
        self.instructions
            .iter()
            .filter_map(Instruction::sequence_token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Feeds every instruction, in order, into another backend.
    pub fn replay_into<B: CircuitBackend>(&self, backend: &mut B) {
        for instruction in &self.instructions {
            backend.apply(instruction);
        }
    }
}

impl CircuitBackend for Circuit {
    fn single(&mut self, gate: Gate, lane: Lane) {
        self.add_instruction(Instruction::Single { gate, lane });
    }

    fn controlled(&mut self, control: Lane, target: Lane) {
        self.add_instruction(Instruction::Controlled { control, target });
    }

    fn rotation(&mut self, gate: Gate, angle: f64, lane: Lane) {
        self.add_instruction(Instruction::Rotation { gate, angle, lane });
    }

    fn barrier(&mut self) {
        self.add_instruction(Instruction::Barrier);
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder for an empty circuit over `lanes` lanes.
    pub fn new(name: impl Into<String>, lanes: usize) -> Self {
        Self {
            circuit: Circuit::new(name, lanes),
        }
    }

    /// Adds a single instruction to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, instruction: Instruction) -> Self {
        self.circuit.add_instruction(instruction);
        self
    }

    /// Adds multiple instructions from an iterator to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_ops<I>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = Instruction>,
    {
        self.circuit.add_instructions(instructions);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chromaq::Circuit[{}: {} instructions on {} lanes]", self.name, self.len(), self.lanes)?;
        if self.lanes == 0 || self.instructions.is_empty() {
            return Ok(());
        }

        // --- Setup ---
        let num_steps = self.instructions.len();
        let num_lanes = self.lanes;
        let labels: Vec<String> = (0..num_lanes).map(|l| format!("{}: ", Lane(l))).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        // Grid dimensions and padding
        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const BARRIER: char = '┊';
        const H_WIRE: char = '─';

        // op_grid[lane][step] stores the gate/wire segment string
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_steps]; num_lanes];
        // v_connect[lane][step] stores the vertical connector char below this lane at this step
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_steps]; num_lanes];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        // --- Populate Grids ---
        for (t, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                Instruction::Single { gate, lane } | Instruction::Rotation { gate, lane, .. } => {
                    op_grid[lane.0][t] = format_gate(gate.symbol());
                }
                Instruction::Controlled { control, target } => {
                    op_grid[control.0][t] = format_gate("@");
                    op_grid[target.0][t] = format_gate("X");

                    let r_min = control.0.min(target.0);
                    let r_max = control.0.max(target.0);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
                Instruction::Barrier => {
                    for row_vec in op_grid.iter_mut() {
                        row_vec[t] = format_gate(&BARRIER.to_string());
                    }
                    for row_vec in v_connect.iter_mut().take(num_lanes - 1) {
                        row_vec[t] = BARRIER;
                    }
                }
            }
        }

        // --- Format Output String ---
        let label_padding = " ".repeat(label_width);
        for lane in 0..num_lanes {
            write!(f, "{:<width$}", labels[lane], width = label_width)?;
            writeln!(f, "{}", op_grid[lane].join(""))?;

            // Vertical connector row between lanes
            if lane < num_lanes - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_steps {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[lane][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
