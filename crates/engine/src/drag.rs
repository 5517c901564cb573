//! Pointer drag sessions.
//!
//! A drag picks up one tray slot, follows the pointer with a drop target and
//! either proposes a placement on release or is dropped without touching the
//! game. The preview asks the core whether the target is legal; the session
//! itself never decides.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::core::{can_place, CellPos, GameState, Piece, PlaceOutcome};
use crate::resolver::{pointer_to_cell, GridGeometry, PointerPos};
use crate::types::{PieceColor, GRID_SIZE, MAX_SHAPE_SIDE};

const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIDE as usize * MAX_SHAPE_SIDE as usize;

/// Where a piece would land and whether it may
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub slot: usize,
    pub anchor: CellPos,
    pub color: PieceColor,
    /// Board cells the piece would cover (off-board cells are dropped)
    pub cells: ArrayVec<CellPos, MAX_PIECE_CELLS>,
    pub valid: bool,
}

impl Preview {
    pub fn at(state: &GameState, slot: usize, piece: &Piece, anchor: CellPos) -> Self {
        let mut cells = ArrayVec::new();
        for (r, c) in piece.cells() {
            let row = anchor.row + r;
            let col = anchor.col + c;
            if row < GRID_SIZE && col < GRID_SIZE {
                cells.push(CellPos::new(row, col));
            }
        }
        Self {
            slot,
            anchor,
            color: piece.color,
            cells,
            valid: can_place(state.grid(), piece, anchor.row as i8, anchor.col as i8),
        }
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains(&pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSession {
    slot: Option<usize>,
    target: Option<CellPos>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up the piece in `slot`. Refused once the game is over or when the
    /// slot is empty.
    pub fn begin(&mut self, state: &GameState, slot: usize) -> bool {
        if state.is_terminal() || state.tray().get(slot).is_none() {
            trace!(slot, "drag refused");
            return false;
        }
        self.slot = Some(slot);
        self.target = None;
        true
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub fn target(&self) -> Option<CellPos> {
        self.target
    }

    /// Follow the pointer; returns the new drop target.
    pub fn hover(
        &mut self,
        state: &GameState,
        pointer: PointerPos,
        geometry: GridGeometry,
    ) -> Option<CellPos> {
        let slot = self.slot?;
        let Some(piece) = state.tray().get(slot) else {
            self.cancel();
            return None;
        };
        self.target = pointer_to_cell(pointer, geometry, piece.width(), piece.height());
        self.target
    }

    pub fn preview(&self, state: &GameState) -> Option<Preview> {
        let slot = self.slot?;
        let anchor = self.target?;
        let piece = state.tray().get(slot)?;
        Some(Preview::at(state, slot, piece, anchor))
    }

    /// Drop the piece without placing it.
    pub fn cancel(&mut self) {
        self.slot = None;
        self.target = None;
    }

    /// End the drag, placing the piece if the current target is legal.
    pub fn release(&mut self, state: &mut GameState) -> Option<PlaceOutcome> {
        let slot = self.slot.take()?;
        let anchor = self.target.take()?;
        let piece = state.tray().get(slot)?;
        if !can_place(state.grid(), piece, anchor.row as i8, anchor.col as i8) {
            trace!(slot, row = anchor.row, col = anchor.col, "drop on illegal target");
            return None;
        }
        state.place(slot, anchor.row as i8, anchor.col as i8)
    }
}
