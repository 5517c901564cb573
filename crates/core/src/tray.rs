//! Tray module - the three offered pieces
//!
//! Slots are consumed one at a time and stay empty until the whole tray is
//! empty; only then is it refilled with three fresh pieces.

use crate::catalog::Piece;
use crate::types::TRAY_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tray {
    slots: [Option<Piece>; TRAY_SLOTS],
}

impl Tray {
    pub fn new(slots: [Option<Piece>; TRAY_SLOTS]) -> Self {
        Self { slots }
    }

    pub fn full(pieces: [Piece; TRAY_SLOTS]) -> Self {
        Self {
            slots: pieces.map(Some),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Piece in `slot`, if the slot exists and still holds one
    pub fn get(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Remove and return the piece in `slot`
    pub fn take(&mut self, slot: usize) -> Option<Piece> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Replace all slots at once
    pub fn refill(&mut self, pieces: [Piece; TRAY_SLOTS]) {
        self.slots = pieces.map(Some);
    }

    /// True when every slot has been consumed
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of slots still holding a piece
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Non-empty slots with their index
    pub fn pieces(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|piece| (i, piece)))
    }

    pub fn slots(&self) -> &[Option<Piece>; TRAY_SLOTS] {
        &self.slots
    }
}
