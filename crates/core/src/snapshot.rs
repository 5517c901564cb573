use crate::catalog::Piece;
use crate::types::{GRID_SIZE, TRAY_SLOTS};

/// Plain-data copy of a game for renderers and observers.
///
/// Grid cells hold color codes (0 = empty, see `PieceColor::code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub grid: [[u8; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub tray: [Option<Piece>; TRAY_SLOTS],
    pub score: u32,
    pub combo: u32,
    pub high_score: u32,
    pub terminal: bool,
    pub episode_id: u32,
    pub placements: u32,
}

impl GameSnapshot {
    /// Combo multiplier as shown to the player (combo + 1)
    pub fn combo_multiplier(&self) -> u32 {
        self.combo.saturating_add(1)
    }
}
