//! Keyboard cursor: a selected tray slot plus an anchor cell.

use tracing::trace;

use crate::core::{CellPos, GameState, PlaceOutcome};
use crate::drag::Preview;
use crate::resolver::clamp_anchor;
use crate::types::{GameAction, TRAY_SLOTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    slot: usize,
    row: u8,
    col: u8,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            slot: 0,
            row: 3,
            col: 3,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn anchor(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }

    /// Keep the selected piece fully on the board.
    pub fn clamp(&mut self, state: &GameState) {
        let (w, h) = state
            .tray()
            .get(self.slot)
            .map(|p| (p.width(), p.height()))
            .unwrap_or((1, 1));
        let pos = clamp_anchor(self.row as i32, self.col as i32, w, h);
        self.row = pos.row;
        self.col = pos.col;
    }

    pub fn move_by(&mut self, state: &GameState, drow: i32, dcol: i32) {
        let (w, h) = state
            .tray()
            .get(self.slot)
            .map(|p| (p.width(), p.height()))
            .unwrap_or((1, 1));
        let pos = clamp_anchor(self.row as i32 + drow, self.col as i32 + dcol, w, h);
        self.row = pos.row;
        self.col = pos.col;
    }

    /// Select `slot` if it holds a piece.
    pub fn select(&mut self, state: &GameState, slot: usize) -> bool {
        if state.tray().get(slot).is_none() {
            return false;
        }
        self.slot = slot;
        self.clamp(state);
        true
    }

    /// Move the selection to the next non-empty slot, wrapping around.
    pub fn next_slot(&mut self, state: &GameState) {
        for step in 1..=TRAY_SLOTS {
            let slot = (self.slot + step) % TRAY_SLOTS;
            if self.select(state, slot) {
                return;
            }
        }
    }

    /// Select the first non-empty slot if the current one was used up.
    fn ensure_selection(&mut self, state: &GameState) {
        if state.tray().get(self.slot).is_none() {
            if let Some((slot, _)) = state.tray().pieces().next() {
                self.slot = slot;
            }
        }
        self.clamp(state);
    }

    pub fn preview(&self, state: &GameState) -> Option<Preview> {
        if state.is_terminal() {
            return None;
        }
        let piece = state.tray().get(self.slot)?;
        Some(Preview::at(state, self.slot, piece, self.anchor()))
    }

    /// Propose the selected piece at the cursor.
    pub fn place(&mut self, state: &mut GameState) -> Option<PlaceOutcome> {
        let outcome = state.place(self.slot, self.row as i8, self.col as i8);
        if outcome.is_none() {
            trace!(slot = self.slot, row = self.row, col = self.col, "cursor placement rejected");
        }
        self.ensure_selection(state);
        outcome
    }

    /// Apply one keyboard action. Restart resets the game and the cursor.
    pub fn apply(&mut self, state: &mut GameState, action: GameAction) -> Option<PlaceOutcome> {
        match action {
            GameAction::MoveUp => self.move_by(state, -1, 0),
            GameAction::MoveDown => self.move_by(state, 1, 0),
            GameAction::MoveLeft => self.move_by(state, 0, -1),
            GameAction::MoveRight => self.move_by(state, 0, 1),
            GameAction::SelectSlot1 | GameAction::SelectSlot2 | GameAction::SelectSlot3 => {
                if let Some(slot) = action.slot() {
                    self.select(state, slot);
                }
            }
            GameAction::NextSlot => self.next_slot(state),
            GameAction::Place => return self.place(state),
            GameAction::Restart => {
                state.reset();
                *self = Self::new();
                self.clamp(state);
            }
        }
        None
    }
}
