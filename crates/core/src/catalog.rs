//! Catalog module - piece shapes and the color palette
//!
//! Shapes are rotation-free bitmask matrices. Each row is stored as a `u8`
//! where bit `c` marks column `c` as occupied. Bounding boxes are tight: no
//! shape may carry an all-empty row or column, so a shape's width and height
//! are exactly the extent of its blocks.

use thiserror::Error;

use crate::types::{PieceColor, MAX_SHAPE_SIDE};

const SIDE: usize = MAX_SHAPE_SIDE as usize;

/// Shape construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no rows")]
    Empty,
    #[error("shape is {width}x{height}, larger than {max}x{max}")]
    TooLarge { width: usize, height: usize, max: u8 },
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, expected 0 or 1")]
    InvalidValue { row: usize, col: usize, value: u8 },
    #[error("row {0} has no blocks")]
    EmptyRow(usize),
    #[error("column {0} has no blocks")]
    EmptyColumn(usize),
}

/// Catalog construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no shapes")]
    NoShapes,
    #[error("catalog has no colors")]
    NoColors,
    #[error("shape #{index} is malformed: {source}")]
    Shape {
        index: usize,
        #[source]
        source: ShapeError,
    },
}

/// Immutable rectangular bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [u8; SIDE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Build a shape from a 0/1 matrix, validating it
    pub fn from_matrix(matrix: &[&[u8]]) -> Result<Self, ShapeError> {
        let height = matrix.len();
        let Some(first) = matrix.first() else {
            return Err(ShapeError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(ShapeError::Empty);
        }
        if width > SIDE || height > SIDE {
            return Err(ShapeError::TooLarge {
                width,
                height,
                max: MAX_SHAPE_SIDE,
            });
        }

        let mut rows = [0u8; SIDE];
        for (r, line) in matrix.iter().enumerate() {
            if line.len() != width {
                return Err(ShapeError::Ragged {
                    row: r,
                    expected: width,
                    actual: line.len(),
                });
            }
            for (c, &value) in line.iter().enumerate() {
                match value {
                    0 => {}
                    1 => rows[r] |= 1 << c,
                    _ => return Err(ShapeError::InvalidValue { row: r, col: c, value }),
                }
            }
            if rows[r] == 0 {
                return Err(ShapeError::EmptyRow(r));
            }
        }

        let column_mask = rows.iter().fold(0u8, |acc, row| acc | row);
        if let Some(c) = (0..width).find(|&c| column_mask & (1 << c) == 0) {
            return Err(ShapeError::EmptyColumn(c));
        }

        Ok(Self {
            rows,
            width: width as u8,
            height: height as u8,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the offset (r, c) is a block of this shape
    pub fn is_filled(&self, r: u8, c: u8) -> bool {
        r < self.height && c < self.width && self.rows[r as usize] & (1 << c) != 0
    }

    /// Occupied offsets in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width)
                .filter(move |&c| self.is_filled(r, c))
                .map(move |c| (r, c))
        })
    }

    /// Number of occupied sub-cells
    pub fn block_count(&self) -> u32 {
        self.rows[..self.height as usize]
            .iter()
            .map(|row| row.count_ones())
            .sum()
    }
}

/// A tray piece: a shape plus the color it paints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(shape: Shape, color: PieceColor) -> Self {
        Self { shape, color }
    }

    /// Convenience constructor from a matrix
    pub fn from_matrix(matrix: &[&[u8]], color: PieceColor) -> Result<Self, ShapeError> {
        Ok(Self::new(Shape::from_matrix(matrix)?, color))
    }

    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.shape.cells()
    }

    pub fn block_count(&self) -> u32 {
        self.shape.block_count()
    }

    pub fn width(&self) -> u8 {
        self.shape.width()
    }

    pub fn height(&self) -> u8 {
        self.shape.height()
    }
}

/// The standard shape set: lines, squares, L, T, S/Z and corner pieces
pub const STANDARD_SHAPES: [&[&[u8]]; 20] = [
    &[&[1]],
    &[&[1, 1]],
    &[&[1, 1, 1]],
    &[&[1, 1, 1, 1]],
    &[&[1, 1, 1, 1, 1]],
    &[&[1], &[1]],
    &[&[1], &[1], &[1]],
    &[&[1], &[1], &[1], &[1]],
    &[&[1], &[1], &[1], &[1], &[1]],
    &[&[1, 1], &[1, 1]],
    &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1, 1], &[1, 1, 0]],
    &[&[1, 1, 0], &[0, 1, 1]],
    &[&[1, 0], &[1, 1]],
    &[&[0, 1], &[1, 1]],
    &[&[1, 1], &[1, 1], &[1, 1]],
    &[&[1, 1, 1], &[1, 1, 1]],
];

/// Fixed, validated set of shapes and colors to sample from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    shapes: Vec<Shape>,
    colors: Vec<PieceColor>,
}

impl Catalog {
    pub fn new(shapes: Vec<Shape>, colors: Vec<PieceColor>) -> Result<Self, CatalogError> {
        if shapes.is_empty() {
            return Err(CatalogError::NoShapes);
        }
        if colors.is_empty() {
            return Err(CatalogError::NoColors);
        }
        Ok(Self { shapes, colors })
    }

    /// Validate every matrix and build a catalog from them
    pub fn from_matrices(
        matrices: &[&[&[u8]]],
        colors: &[PieceColor],
    ) -> Result<Self, CatalogError> {
        let shapes = matrices
            .iter()
            .enumerate()
            .map(|(index, m)| {
                Shape::from_matrix(m).map_err(|source| CatalogError::Shape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shapes, colors.to_vec())
    }

    /// The standard 20-shape, 8-color catalog.
    ///
    /// Panics if the built-in table is malformed; that is a build defect, caught
    /// at load time rather than during play.
    pub fn standard() -> Self {
        match Self::from_matrices(&STANDARD_SHAPES, &PieceColor::ALL) {
            Ok(catalog) => catalog,
            Err(e) => panic!("standard catalog is malformed: {e}"),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn colors(&self) -> &[PieceColor] {
        &self.colors
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
