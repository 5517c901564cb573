//! Clear-flash timing.
//!
//! Cells emptied by a line clear stay highlighted for `CLEAR_FLASH_MS`. The
//! timer runs on a caller-supplied millisecond clock and never touches the
//! game itself.

use crate::core::{CellPos, ClearResult};
use crate::types::{CLEAR_FLASH_MS, GRID_CELLS, GRID_SIZE};

#[derive(Debug, Clone)]
pub struct FlashTimer {
    duration_ms: u64,
    lit: [bool; GRID_CELLS],
    until_ms: u64,
}

impl Default for FlashTimer {
    fn default() -> Self {
        Self::new(CLEAR_FLASH_MS as u64)
    }
}

impl FlashTimer {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            lit: [false; GRID_CELLS],
            until_ms: 0,
        }
    }

    /// Light the cells of `clear`, replacing any flash in progress.
    pub fn trigger(&mut self, clear: &ClearResult, now_ms: u64) {
        if clear.cells.is_empty() {
            return;
        }
        self.lit = [false; GRID_CELLS];
        for pos in &clear.cells {
            self.lit[index(*pos)] = true;
        }
        self.until_ms = now_ms.saturating_add(self.duration_ms);
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms < self.until_ms
    }

    pub fn is_lit(&self, pos: CellPos, now_ms: u64) -> bool {
        self.is_active(now_ms) && pos.row < GRID_SIZE && pos.col < GRID_SIZE && self.lit[index(pos)]
    }

    /// Lit cells as a row-major mask, all false once expired.
    pub fn mask(&self, now_ms: u64) -> [bool; GRID_CELLS] {
        if self.is_active(now_ms) {
            self.lit
        } else {
            [false; GRID_CELLS]
        }
    }

    pub fn cancel(&mut self) {
        self.until_ms = 0;
    }
}

fn index(pos: CellPos) -> usize {
    pos.row as usize * GRID_SIZE as usize + pos.col as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{find_full_lines, Grid};
    use crate::types::PieceColor;

    fn row_clear(row: i8) -> ClearResult {
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.set(row, col, Some(PieceColor::Green));
        }
        find_full_lines(&grid)
    }

    #[test]
    fn test_flash_expires_after_duration() {
        let mut flash = FlashTimer::default();
        flash.trigger(&row_clear(2), 1_000);

        assert!(flash.is_lit(CellPos::new(2, 5), 1_000));
        assert!(flash.is_lit(CellPos::new(2, 5), 1_299));
        assert!(!flash.is_lit(CellPos::new(3, 5), 1_100));
        assert!(!flash.is_lit(CellPos::new(2, 5), 1_300));
        assert!(flash.mask(1_300).iter().all(|lit| !lit));
    }

    #[test]
    fn test_retrigger_replaces_cells() {
        let mut flash = FlashTimer::new(100);
        flash.trigger(&row_clear(0), 0);
        flash.trigger(&row_clear(7), 50);
        assert!(!flash.is_lit(CellPos::new(0, 0), 60));
        assert!(flash.is_lit(CellPos::new(7, 0), 149));
    }

    #[test]
    fn test_empty_clear_does_not_flash() {
        let mut flash = FlashTimer::default();
        flash.trigger(&ClearResult::default(), 0);
        assert!(!flash.is_active(0));
    }
}
