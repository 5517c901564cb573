//! Grid, placement and clear tests

use block_blast::core::{
    can_place, can_place_anywhere, clear_lines, first_fit, CellPos, Grid, GridError, Piece,
};
use block_blast::types::{PieceColor, GRID_SIZE};

fn piece(matrix: &[&[u8]]) -> Piece {
    Piece::from_matrix(matrix, PieceColor::Cyan).unwrap()
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.size(), GRID_SIZE);
    for row in 0..8 {
        for col in 0..8 {
            assert_eq!(grid.get(row, col), Some(None), "cell ({row}, {col})");
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, 8), None);
    assert!(!grid.set(8, 0, Some(PieceColor::Red)));
    assert!(!grid.set(0, -1, Some(PieceColor::Red)));
}

#[test]
fn test_grid_rows_round_trip() {
    let rows = [
        "G.......", "........", "..BB....", "........", "........", "........", "........",
        ".......O",
    ];
    let grid = Grid::from_rows(&rows).unwrap();
    assert_eq!(grid.get(2, 3), Some(Some(PieceColor::Blue)));
    assert_eq!(grid.get(7, 7), Some(Some(PieceColor::Orange)));
    assert_eq!(grid.to_rows(), rows.to_vec());
}

#[test]
fn test_grid_rows_rejects_bad_shape() {
    assert!(matches!(Grid::from_rows(&["........"]), Err(GridError::RowCount { .. })));
    let mut rows = vec!["........"; 8];
    rows[3] = ".......";
    assert!(matches!(Grid::from_rows(&rows), Err(GridError::RowWidth { .. })));
}

#[test]
fn test_can_place_bounds_and_overlap() {
    let mut grid = Grid::new();
    let l = piece(&[&[1, 0], &[1, 0], &[1, 1]]);

    assert!(can_place(&grid, &l, 0, 0));
    assert!(can_place(&grid, &l, 5, 6));
    assert!(!can_place(&grid, &l, 6, 6)); // bottom edge
    assert!(!can_place(&grid, &l, 5, 7)); // right edge
    assert!(!can_place(&grid, &l, -1, 0));

    // Only filled sub-cells collide: (0, 1) of the L is empty.
    grid.set(0, 1, Some(PieceColor::Red));
    assert!(can_place(&grid, &l, 0, 0));
    grid.set(2, 1, Some(PieceColor::Red));
    assert!(!can_place(&grid, &l, 0, 0));
}

#[test]
fn test_can_place_anywhere() {
    let full = Grid::from_rows(&["GGGGGGGG"; 8]).unwrap();
    let mono = piece(&[&[1]]);
    assert!(!can_place_anywhere(&full, &mono));
    assert_eq!(first_fit(&full, &mono), None);

    let mut one_hole = full;
    one_hole.set(6, 2, None);
    assert!(can_place_anywhere(&one_hole, &mono));
    assert_eq!(first_fit(&one_hole, &mono), Some((6, 2)));
    assert!(!can_place_anywhere(&one_hole, &piece(&[&[1, 1]])));
}

#[test]
fn test_clear_row_three() {
    let mut rows = vec!["........"; 8];
    rows[3] = "RRRRRRRR";
    rows[4] = "R.......";
    let grid = Grid::from_rows(&rows).unwrap();

    let (next, result) = clear_lines(&grid);
    assert_eq!(result.cleared_count(), 1);
    let expected: Vec<CellPos> = (0..8).map(|c| CellPos::new(3, c)).collect();
    assert_eq!(result.cells.as_slice(), expected.as_slice());
    assert_eq!(next.occupied_count(), 1);
}

#[test]
fn test_intersection_counts_twice_clears_once() {
    let mut rows = vec!["G......."; 8];
    rows[0] = "GGGGGGGG";
    let grid = Grid::from_rows(&rows).unwrap();

    let (next, result) = clear_lines(&grid);
    assert_eq!(result.cleared_count(), 2);
    assert_eq!(result.cells.len(), 15);
    assert_eq!(
        result.cells.iter().filter(|&&p| p == CellPos::new(0, 0)).count(),
        1
    );
    assert!(next.is_empty());
}

#[test]
fn test_no_clear_returns_same_grid() {
    let rows = ["GGGGGGG.", "G.......", "G.......", "G.......", "G.......", "G.......", "G.......", "........"];
    let grid = Grid::from_rows(&rows).unwrap();
    let (next, result) = clear_lines(&grid);
    assert_eq!(next, grid);
    assert!(result.is_empty());
}
