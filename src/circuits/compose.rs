// src/circuits/compose.rs

//! Side-by-side composition of two rendered diagrams.
//!
//! Images go onto a fixed dark canvas; text diagrams get the same layout
//! with a blank fill.

use image::{Rgba, RgbaImage, imageops};

/// Canvas color of a composite image.
pub const BACKGROUND: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Fill used wherever neither text rendering has content.
pub const TEXT_BACKGROUND: char = ' ';

/// Places `left` at the origin and `right` immediately to its right.
///
/// The result is `left.width() + right.width()` wide and as tall as the
/// taller input. Both are top-aligned; uncovered pixels keep [`BACKGROUND`].
///
/// # Examples
/// ```
/// use chromaq::circuits::{compose_side_by_side, BACKGROUND};
/// use image::{Rgba, RgbaImage};
///
/// let left = RgbaImage::from_pixel(3, 1, Rgba([255, 0, 0, 255]));
/// let right = RgbaImage::from_pixel(2, 4, Rgba([0, 0, 255, 255]));
/// let combined = compose_side_by_side(&left, &right);
///
/// assert_eq!(combined.dimensions(), (5, 4));
/// assert_eq!(*combined.get_pixel(0, 3), BACKGROUND);
/// ```
pub fn compose_side_by_side(left: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());

    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    imageops::overlay(&mut canvas, left, 0, 0);
    imageops::overlay(&mut canvas, right, i64::from(left.width()), 0);
    canvas
}

/// Text counterpart of [`compose_side_by_side`].
///
/// Every row is padded with [`TEXT_BACKGROUND`] to the full combined width,
/// so the output is a solid rectangle of text.
///
/// # Examples
/// ```
/// use chromaq::circuits::compose_text_side_by_side;
///
/// let combined = compose_text_side_by_side("ab\nc", "XY\nZ\nW");
/// assert_eq!(combined, "abXY\nc Z \n  W \n");
/// ```
pub fn compose_text_side_by_side(left: &str, right: &str) -> String {
    let left_lines: Vec<&str> = left.lines().collect();
    let right_lines: Vec<&str> = right.lines().collect();

    let width_of = |lines: &[&str]| lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let left_width = width_of(&left_lines);
    let right_width = width_of(&right_lines);
    let height = left_lines.len().max(right_lines.len());

    let mut out = String::new();
    for row in 0..height {
        push_padded(&mut out, left_lines.get(row).copied().unwrap_or(""), left_width);
        push_padded(&mut out, right_lines.get(row).copied().unwrap_or(""), right_width);
        out.push('\n');
    }
    out
}

fn push_padded(out: &mut String, line: &str, width: usize) {
    out.push_str(line);
    let fill = width.saturating_sub(line.chars().count());
    out.extend(std::iter::repeat_n(TEXT_BACKGROUND, fill));
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_composite_size_and_placement() {
        let left = RgbaImage::from_pixel(4, 6, RED);
        let right = RgbaImage::from_pixel(3, 2, BLUE);
        let combined = compose_side_by_side(&left, &right);

        assert_eq!(combined.width(), 4 + 3);
        assert_eq!(combined.height(), 6);
        assert_eq!(*combined.get_pixel(0, 0), RED);
        assert_eq!(*combined.get_pixel(3, 5), RED);
        assert_eq!(*combined.get_pixel(4, 0), BLUE);
        assert_eq!(*combined.get_pixel(6, 1), BLUE);
        // Below the shorter right image
        assert_eq!(*combined.get_pixel(4, 2), BACKGROUND);
        assert_eq!(*combined.get_pixel(6, 5), BACKGROUND);
    }

    #[test]
    fn test_right_taller_leaves_dark_fill_under_left() {
        let left = RgbaImage::from_pixel(2, 1, RED);
        let right = RgbaImage::from_pixel(2, 3, BLUE);
        let combined = compose_side_by_side(&left, &right);

        assert_eq!(combined.dimensions(), (4, 3));
        assert_eq!(*combined.get_pixel(1, 2), Rgba([20, 20, 20, 255]));
        assert_eq!(*combined.get_pixel(2, 2), BLUE);
    }

    #[test]
    fn test_text_left_taller() {
        let combined = compose_text_side_by_side("1\n22\n333", "R");
        assert_eq!(combined, "1  R\n22  \n333 \n");
    }

    #[test]
    fn test_text_empty_sides() {
        assert_eq!(compose_text_side_by_side("", ""), "");
        assert_eq!(compose_text_side_by_side("", "ab\nc"), "ab\nc \n");
        assert_eq!(compose_text_side_by_side("ab", ""), "ab\n");
    }

    #[test]
    fn test_text_every_row_has_combined_width() {
        let combined = compose_text_side_by_side("q0: ──X──\nq1: ─", "q0: ─\nq1: ──X──\nq2: ─");
        let widths: Vec<usize> = combined.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths, vec![18, 18, 18]);
    }
}
