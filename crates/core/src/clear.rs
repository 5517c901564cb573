//! Line-clear resolver
//!
//! Full rows and full columns are found independently on the same grid and
//! then emptied together. A cell where a full row crosses a full column is
//! cleared once but the row and the column both count toward the total.
//! Nothing shifts: cleared cells simply become empty.

use arrayvec::ArrayVec;

use crate::grid::{CellPos, Grid};
use crate::types::{GRID_CELLS, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// What a clear pass removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Full rows, ascending
    pub rows: ArrayVec<u8, SIZE>,
    /// Full columns, ascending
    pub cols: ArrayVec<u8, SIZE>,
    /// Every emptied cell exactly once, row-major
    pub cells: ArrayVec<CellPos, GRID_CELLS>,
}

impl ClearResult {
    /// Rows plus columns; an intersecting row and column both count
    pub fn cleared_count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.rows.contains(&pos.row) || self.cols.contains(&pos.col)
    }
}

/// Find the full rows and columns without touching the grid
pub fn find_full_lines(grid: &Grid) -> ClearResult {
    let mut result = ClearResult::default();
    for i in 0..SIZE {
        if grid.is_row_full(i) {
            result.rows.push(i as u8);
        }
        if grid.is_col_full(i) {
            result.cols.push(i as u8);
        }
    }
    if result.is_empty() {
        return result;
    }

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let pos = CellPos::new(row, col);
            if result.contains(pos) {
                result.cells.push(pos);
            }
        }
    }
    result
}

impl Grid {
    /// Clear every full row and column in place and report what went
    pub fn clear_full_lines(&mut self) -> ClearResult {
        let result = find_full_lines(self);
        for &pos in &result.cells {
            self.clear_cell(pos);
        }
        result
    }
}

/// Resolve clears on a copy of `grid`, returning the cleared grid and the report.
/// With nothing to clear the returned grid equals the input.
pub fn clear_lines(grid: &Grid) -> (Grid, ClearResult) {
    let mut next = *grid;
    let result = next.clear_full_lines();
    (next, result)
}
