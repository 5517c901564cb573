//! Core game logic - pure, deterministic, and testable
//!
//! All rules of the block puzzle live here with no dependency on terminals
//! or I/O. The same seed always deals the same pieces.
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 grid of colored cells
//! - [`catalog`]: shape bitmasks, colored pieces and the standard catalog
//! - [`placement`]: fit checks for a piece at an anchor
//! - [`clear`]: full row/column detection and simultaneous clearing
//! - [`scoring`]: block points and combo-scaled line bonuses
//! - [`tray`]: the three offered pieces
//! - [`rng`]: seeded LCG and piece sampling
//! - [`game_state`]: the placement state machine
//!
//! # Game Rules
//!
//! - A piece is placed whole at a top-left anchor; it may not leave the grid
//!   or overlap an occupied cell
//! - Full rows and columns are found together and emptied together, nothing
//!   shifts afterwards
//! - Each block is worth 10 points; each cleared line 100, scaled by
//!   `1 + combo / 2` where combo counts consecutive clearing placements
//! - The tray is dealt three new pieces only once all three are placed
//! - The game ends when none of the remaining tray pieces fits anywhere
//!
//! # Example
//!
//! ```
//! use block_blast_core::GameState;
//!
//! let mut game = GameState::new(12345, 0);
//! let (slot, row, col) = game
//!     .tray()
//!     .pieces()
//!     .find_map(|(slot, piece)| {
//!         block_blast_core::first_fit(game.grid(), piece).map(|(r, c)| (slot, r, c))
//!     })
//!     .unwrap();
//!
//! let outcome = game.place(slot, row, col).unwrap();
//! assert!(outcome.added_score() >= 10);
//! assert_eq!(game.score(), outcome.added_score());
//! ```

pub mod catalog;
pub mod clear;
pub mod game_state;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tray;

pub use block_blast_types as types;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogError, Piece, Shape, ShapeError, STANDARD_SHAPES};
pub use clear::{clear_lines, find_full_lines, ClearResult};
pub use game_state::{GameParts, GameState, PlaceOutcome, Status};
pub use grid::{CellPos, Grid, GridError};
pub use placement::{can_place, can_place_anywhere, first_fit};
pub use rng::{PieceSampler, SimpleRng};
pub use scoring::{calculate_base_score, calculate_score, next_combo, ScoreResult};
pub use snapshot::GameSnapshot;
pub use tray::Tray;

/// Start a new game.
pub fn new_game(seed: u32, high_score: u32) -> GameState {
    GameState::new(seed, high_score)
}

/// Apply one placement by value.
///
/// A rejected placement hands back the input state unchanged.
pub fn place(mut state: GameState, slot: usize, row: i8, col: i8) -> GameState {
    state.place(slot, row, col);
    state
}

/// Whether no piece left in the tray fits anywhere.
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
