// src/circuits/raster.rs

//! Rasterizes a circuit into an RGBA image.
//!
//! Layout mirrors the text diagram: one horizontal wire per lane and one
//! square cell column per instruction, barriers included. Gates are drawn as
//! filled boxes colored by kind, `cx` as a control dot joined to a target box.

use super::Circuit;
use crate::operations::{GateKind, Instruction};
use image::{Rgba, RgbaImage};

/// Edge length of one instruction cell, in pixels.
pub const CELL: u32 = 24;
/// Blank border around the drawing.
pub const MARGIN: u32 = 12;

/// Canvas color of a single rendered circuit.
pub const CANVAS: Rgba<u8> = Rgba([255, 255, 255, 255]);
const WIRE: Rgba<u8> = Rgba([60, 60, 60, 255]);
const BARRIER: Rgba<u8> = Rgba([170, 170, 170, 255]);
const SINGLE: Rgba<u8> = Rgba([33, 150, 243, 255]);
const ROTATION: Rgba<u8> = Rgba([156, 39, 176, 255]);
const TWO_LANE: Rgba<u8> = Rgba([0, 137, 123, 255]);

const BOX: u32 = CELL - 8;
const DOT: u32 = 8;

/// Fill color for a gate box of the given kind.
pub fn kind_color(kind: GateKind) -> Rgba<u8> {
    match kind {
        GateKind::Single => SINGLE,
        GateKind::Rotation => ROTATION,
        GateKind::TwoLane => TWO_LANE,
    }
}

impl Circuit {
    /// Renders the circuit as an image on a [`CANVAS`] background.
    ///
    /// The image is `2 * MARGIN + columns * CELL` wide and
    /// `2 * MARGIN + lanes * CELL` tall, with at least one column and one
    /// lane so that an empty circuit still yields a visible canvas.
    pub fn to_image(&self) -> RgbaImage {
        let columns = self.instructions.len().max(1) as u32;
        let rows = self.lanes.max(1) as u32;
        let mut img = RgbaImage::from_pixel(2 * MARGIN + columns * CELL, 2 * MARGIN + rows * CELL, CANVAS);

        for lane in 0..self.lanes as u32 {
            fill_rect(&mut img, MARGIN, wire_y(lane), columns * CELL, 1, WIRE);
        }

        for (column, instruction) in self.instructions.iter().enumerate() {
            let x = MARGIN + column as u32 * CELL + CELL / 2;
            match instruction {
                Instruction::Single { gate, lane } | Instruction::Rotation { gate, lane, .. } => {
                    draw_box(&mut img, x, wire_y(lane.0 as u32), kind_color(gate.kind()));
                }
                Instruction::Controlled { control, target } => {
                    let (cy, ty) = (wire_y(control.0 as u32), wire_y(target.0 as u32));
                    fill_rect(&mut img, x, cy.min(ty), 1, cy.abs_diff(ty) + 1, TWO_LANE);
                    fill_rect(&mut img, x - DOT / 2, cy - DOT / 2, DOT, DOT, TWO_LANE);
                    draw_box(&mut img, x, ty, TWO_LANE);
                }
                Instruction::Barrier => {
                    // Dashed, full height
                    let mut y = MARGIN;
                    while y < MARGIN + rows * CELL {
                        fill_rect(&mut img, x, y, 1, 3, BARRIER);
                        y += 6;
                    }
                }
            }
        }
        img
    }
}

fn wire_y(lane: u32) -> u32 {
    MARGIN + lane * CELL + CELL / 2
}

fn draw_box(img: &mut RgbaImage, center_x: u32, center_y: u32, color: Rgba<u8>) {
    fill_rect(img, center_x - BOX / 2, center_y - BOX / 2, BOX, BOX, color);
}

/// Fills a rectangle, clipped to the image bounds.
fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}
