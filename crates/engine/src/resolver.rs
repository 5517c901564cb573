//! Pointer to anchor-cell resolution.
//!
//! The dragged piece is centered on the pointer: the anchor is the pointer's
//! cell coordinate minus half the piece's extent, rounded half up. A pointer
//! more than one cell off the board resolves to nothing; anything closer is
//! clamped so the whole bounding box stays on the board.

use crate::core::CellPos;
use crate::types::GRID_SIZE;

/// Pointer position relative to the grid's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rendered size of the whole grid in pointer units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub width: f32,
    pub height: f32,
}

impl GridGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn cell_width(&self) -> f32 {
        self.width / GRID_SIZE as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.height / GRID_SIZE as f32
    }
}

fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Clamp an anchor so a `piece_w` x `piece_h` box fits on the board.
pub fn clamp_anchor(row: i32, col: i32, piece_w: u8, piece_h: u8) -> CellPos {
    let size = GRID_SIZE as i32;
    let max_row = (size - piece_h as i32).max(0);
    let max_col = (size - piece_w as i32).max(0);
    CellPos::new(row.clamp(0, max_row) as u8, col.clamp(0, max_col) as u8)
}

/// Resolve a pointer to the anchor cell for a piece of the given size.
pub fn pointer_to_cell(
    pointer: PointerPos,
    geometry: GridGeometry,
    piece_w: u8,
    piece_h: u8,
) -> Option<CellPos> {
    if !(geometry.width > 0.0 && geometry.height > 0.0) {
        return None;
    }
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return None;
    }

    let col = round_half_up(pointer.x / geometry.cell_width() - piece_w as f32 / 2.0);
    let row = round_half_up(pointer.y / geometry.cell_height() - piece_h as f32 / 2.0);

    let limit = GRID_SIZE as i32 + 1;
    if row < -1 || row >= limit || col < -1 || col >= limit {
        return None;
    }
    Some(clamp_anchor(row, col, piece_w, piece_h))
}
