//! Placement validator - the single authority on whether a piece fits.

use crate::catalog::Piece;
use crate::grid::Grid;
use crate::types::GRID_SIZE;

/// Check whether `piece` fits with its anchor (top-left of the shape matrix) at
/// (row, col): every block must land on the board and on an empty cell.
pub fn can_place(grid: &Grid, piece: &Piece, row: i8, col: i8) -> bool {
    piece
        .cells()
        .all(|(dr, dc)| grid.is_free(row.saturating_add(dr as i8), col.saturating_add(dc as i8)))
}

/// Check whether `piece` fits anywhere on the grid.
pub fn can_place_anywhere(grid: &Grid, piece: &Piece) -> bool {
    first_fit(grid, piece).is_some()
}

/// First legal anchor in row-major order, if any.
pub fn first_fit(grid: &Grid, piece: &Piece) -> Option<(i8, i8)> {
    let size = GRID_SIZE as i8;
    (0..size)
        .flat_map(|row| (0..size).map(move |col| (row, col)))
        .find(|&(row, col)| can_place(grid, piece, row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn line(len: usize) -> Piece {
        let row = vec![1u8; len];
        Piece::from_matrix(&[row.as_slice()], PieceColor::Blue).unwrap()
    }

    #[test]
    fn test_fits_on_empty_grid() {
        let grid = Grid::new();
        assert!(can_place(&grid, &line(4), 0, 0));
        assert!(can_place(&grid, &line(4), 7, 4));
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let grid = Grid::new();
        assert!(!can_place(&grid, &line(4), 0, 5));
        assert!(!can_place(&grid, &line(1), -1, 0));
        assert!(!can_place(&grid, &line(1), 8, 0));
        assert!(!can_place(&grid, &line(1), 0, -1));
    }

    #[test]
    fn test_rejects_overlap() {
        let mut grid = Grid::new();
        grid.set(3, 3, Some(PieceColor::Red));
        assert!(!can_place(&grid, &line(2), 3, 2));
        assert!(can_place(&grid, &line(2), 3, 4));
    }

    #[test]
    fn test_hollow_cells_may_overlap_filled_cells() {
        // Corner piece [[1,0],[1,1]] leaves (0,1) of its box unused.
        let corner = Piece::from_matrix(&[&[1, 0], &[1, 1]], PieceColor::Green).unwrap();
        let mut grid = Grid::new();
        grid.set(0, 1, Some(PieceColor::Red));
        assert!(can_place(&grid, &corner, 0, 0));
    }

    #[test]
    fn test_can_place_anywhere() {
        let mut grid = Grid::new();
        assert!(can_place_anywhere(&grid, &line(5)));
        for row in 0..8 {
            for col in 0..8 {
                if (row + col) % 2 == 0 {
                    grid.set(row, col, Some(PieceColor::Amber));
                }
            }
        }
        assert!(can_place_anywhere(&grid, &line(1)));
        assert!(!can_place_anywhere(&grid, &line(2)));
        assert_eq!(first_fit(&grid, &line(1)), Some((0, 1)));
    }
}
