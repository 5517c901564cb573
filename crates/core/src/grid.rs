//! Grid module - manages the 8x8 playing field
//!
//! The grid is an 8x8 board where each cell is either empty or filled with the
//! color of the piece that covered it. Storage is a flat array for cache
//! locality and zero-allocation copies.
//! Coordinates: (row, col) where row ranges 0..7 (top to bottom), col ranges 0..7
//! (left to right).

use thiserror::Error;

use crate::catalog::Piece;
use crate::placement::can_place;
use crate::types::{Cell, PieceColor, GRID_CELLS, GRID_SIZE};

/// A cell coordinate known to lie on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Errors raised when building a grid from a text layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown glyph `{glyph}` at row {row}, col {col}")]
    Glyph { row: usize, col: usize, glyph: char },
}

/// The game grid - 8 rows x 8 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    /// Side length of the grid
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= GRID_SIZE as usize {
            return false;
        }
        let start = row * GRID_SIZE as usize;
        let end = start + GRID_SIZE as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= GRID_SIZE as usize {
            return false;
        }
        self.cells
            .iter()
            .skip(col)
            .step_by(GRID_SIZE as usize)
            .all(|cell| cell.is_some())
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Stamp a piece onto the grid with its anchor at (row, col).
    /// Returns false (leaving the grid untouched) if the placement is illegal.
    pub fn stamp(&mut self, piece: &Piece, row: i8, col: i8) -> bool {
        if !can_place(self, piece, row, col) {
            return false;
        }
        for (dr, dc) in piece.cells() {
            self.set(row + dr as i8, col + dc as i8, Some(piece.color));
        }
        true
    }

    /// Empty a single on-board cell
    pub(crate) fn clear_cell(&mut self, pos: CellPos) {
        self.set(pos.row as i8, pos.col as i8, None);
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIZE as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write compact color codes (0 = empty) for snapshots
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_SIZE as usize]; GRID_SIZE as usize]) {
        for (row, cells) in self.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                out[row][col] = cell.map_or(0, |color| color.code());
            }
        }
    }

    /// Build a grid from text rows: `.` is empty, a color glyph is filled.
    ///
    /// ```
    /// use block_blast_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[
    ///     "BB......", "........", "........", "........",
    ///     "........", "........", "........", "......RR",
    /// ]).unwrap();
    /// assert_eq!(grid.occupied_count(), 4);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let size = GRID_SIZE as usize;
        if rows.len() != size {
            return Err(GridError::RowCount {
                expected: size,
                actual: rows.len(),
            });
        }

        let mut grid = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(GridError::RowWidth {
                    row,
                    expected: size,
                    actual: width,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '.' => None,
                    other => Some(
                        PieceColor::from_glyph(other).ok_or(GridError::Glyph { row, col, glyph })?,
                    ),
                };
                grid.cells[row * size + col] = cell;
            }
        }
        Ok(grid)
    }

    /// Render rows as text using the same glyphs `from_rows` accepts
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.map_or('.', |color| color.glyph()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 7), Some(7));
        assert_eq!(Grid::index(1, 0), Some(8));
        assert_eq!(Grid::index(7, 7), Some(63));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 8), None);
        assert_eq!(Grid::index(8, 0), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();

        grid.set(0, 0, Some(PieceColor::Blue));
        grid.set(5, 3, Some(PieceColor::Red));

        assert_eq!(grid.get(0, 0), Some(Some(PieceColor::Blue)));
        assert_eq!(grid.get(5, 3), Some(Some(PieceColor::Red)));

        assert_eq!(grid.cells[0], Some(PieceColor::Blue));
        assert_eq!(grid.cells[5 * 8 + 3], Some(PieceColor::Red));
    }

    #[test]
    fn test_column_full_detection() {
        let mut grid = Grid::new();
        for row in 0..8 {
            grid.set(row, 6, Some(PieceColor::Cyan));
        }
        assert!(grid.is_col_full(6));
        assert!(!grid.is_col_full(5));
        assert!(!grid.is_row_full(0));
        assert!(!grid.is_col_full(8));
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        assert_eq!(
            Grid::from_rows(&["........"]),
            Err(GridError::RowCount {
                expected: 8,
                actual: 1
            })
        );

        let mut rows = ["........"; 8];
        rows[2] = ".......";
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::RowWidth {
                row: 2,
                expected: 8,
                actual: 7
            })
        );

        rows[2] = "...x....";
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::Glyph {
                row: 2,
                col: 3,
                glyph: 'x'
            })
        );
    }

    #[test]
    fn test_u8_grid_uses_color_codes() {
        let mut grid = Grid::new();
        grid.set(7, 0, Some(PieceColor::Green));
        grid.set(0, 7, Some(PieceColor::Orange));

        let mut out = [[0u8; 8]; 8];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[7][0], 1);
        assert_eq!(out[0][7], 8);
        assert_eq!(out[3][3], 0);
    }
}
