//! Game state module - the placement state machine
//!
//! Ties together the grid, tray, sampler and scoring. The only ways to change
//! a game are [`GameState::place`] and [`GameState::reset`]; every placement
//! runs validation, commit, clear, scoring, tray refill and the terminal check
//! in that order before returning.

use tracing::{debug, trace};

use crate::catalog::{Catalog, Piece};
use crate::clear::ClearResult;
use crate::grid::{CellPos, Grid};
use crate::placement::can_place_anywhere;
use crate::rng::PieceSampler;
use crate::scoring::{calculate_score, next_combo, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::tray::Tray;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Playing,
    /// No tray piece fits anywhere. Only `reset` leaves this state.
    Terminal,
}

/// Everything an accepted placement changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub slot: usize,
    pub anchor: CellPos,
    pub piece: Piece,
    pub clear: ClearResult,
    pub score: ScoreResult,
    /// Combo count after this placement
    pub combo: u32,
    /// The tray ran out and three new pieces were dealt
    pub refilled: bool,
    pub new_high_score: bool,
    /// The game ended with this placement
    pub terminal: bool,
}

impl PlaceOutcome {
    pub fn cleared_count(&self) -> u32 {
        self.clear.cleared_count()
    }

    pub fn added_score(&self) -> u32 {
        self.score.total
    }
}

/// A scripted position to start from (restored sessions, puzzles, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParts {
    pub grid: Grid,
    pub tray: Tray,
    pub score: u32,
    pub combo: u32,
    pub high_score: u32,
    pub seed: u32,
}

impl Default for GameParts {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            tray: Tray::empty(),
            score: 0,
            combo: 0,
            high_score: 0,
            seed: 1,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    tray: Tray,
    sampler: PieceSampler,
    score: u32,
    combo: u32,
    high_score: u32,
    status: Status,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Accepted placements in the current episode.
    placements: u32,
}

impl GameState {
    /// Create a new game with the standard catalog
    pub fn new(seed: u32, high_score: u32) -> Self {
        Self::with_catalog(Catalog::standard(), seed, high_score)
    }

    /// Create a new game drawing from a custom catalog
    pub fn with_catalog(catalog: Catalog, seed: u32, high_score: u32) -> Self {
        let mut sampler = PieceSampler::new(catalog, seed);
        let tray = Tray::full(sampler.draw_tray());
        let mut state = Self {
            grid: Grid::new(),
            tray,
            sampler,
            score: 0,
            combo: 0,
            high_score,
            status: Status::Playing,
            episode_id: 0,
            placements: 0,
        };
        state.update_status();
        state
    }

    /// Start from a scripted position.
    ///
    /// An all-empty tray is dealt fresh pieces; the status is derived from the
    /// position. A high score below the score is raised to match.
    pub fn from_parts(parts: GameParts) -> Self {
        let mut sampler = PieceSampler::new(Catalog::standard(), parts.seed);
        let mut tray = parts.tray;
        if tray.is_empty() {
            tray.refill(sampler.draw_tray());
        }
        let mut state = Self {
            grid: parts.grid,
            tray,
            sampler,
            score: parts.score,
            combo: parts.combo,
            high_score: parts.high_score.max(parts.score),
            status: Status::Playing,
            episode_id: 0,
            placements: 0,
        };
        state.update_status();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status == Status::Terminal
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn catalog(&self) -> &Catalog {
        self.sampler.catalog()
    }

    /// Place the piece in `slot` with its anchor at (row, col).
    ///
    /// Returns `None` and leaves the state untouched when the game is over,
    /// the slot is empty or the piece does not fit there.
    pub fn place(&mut self, slot: usize, row: i8, col: i8) -> Option<PlaceOutcome> {
        if self.status == Status::Terminal {
            trace!(slot, row, col, "placement rejected: game over");
            return None;
        }
        let Some(piece) = self.tray.get(slot).copied() else {
            trace!(slot, "placement rejected: empty slot");
            return None;
        };
        if !self.grid.stamp(&piece, row, col) {
            trace!(slot, row, col, "placement rejected: does not fit");
            return None;
        }
        self.tray.take(slot);

        let clear = self.grid.clear_full_lines();
        let cleared = clear.cleared_count();
        self.combo = next_combo(self.combo, cleared);
        let score = calculate_score(piece.block_count(), cleared, self.combo);
        self.score = self.score.saturating_add(score.total);

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        let refilled = self.tray.is_empty();
        if refilled {
            self.tray.refill(self.sampler.draw_tray());
        }

        self.placements = self.placements.wrapping_add(1);
        self.update_status();

        debug!(
            slot,
            row,
            col,
            blocks = piece.block_count(),
            cleared,
            combo = self.combo,
            added = score.total,
            score = self.score,
            "piece placed"
        );
        if self.is_terminal() {
            debug!(score = self.score, placements = self.placements, "no tray piece fits: game over");
        }

        Some(PlaceOutcome {
            slot,
            anchor: CellPos::new(row as u8, col as u8),
            piece,
            clear,
            score,
            combo: self.combo,
            refilled,
            new_high_score,
            terminal: self.is_terminal(),
        })
    }

    /// Start over: empty grid, fresh tray, zero score and combo.
    /// The high score and the piece stream carry over.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.tray = Tray::full(self.sampler.draw_tray());
        self.score = 0;
        self.combo = 0;
        self.placements = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.status = Status::Playing;
        self.update_status();
        debug!(episode = self.episode_id, "game reset");
    }

    /// Whether no piece left in the tray fits anywhere. An empty tray is never
    /// terminal.
    fn no_piece_fits(&self) -> bool {
        self.tray.remaining() > 0
            && !self
                .tray
                .pieces()
                .any(|(_, piece)| can_place_anywhere(&self.grid, piece))
    }

    fn update_status(&mut self) {
        if self.no_piece_fits() {
            self.status = Status::Terminal;
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.tray = *self.tray.slots();
        out.score = self.score;
        out.combo = self.combo;
        out.high_score = self.high_score;
        out.terminal = self.is_terminal();
        out.episode_id = self.episode_id;
        out.placements = self.placements;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn piece(matrix: &[&[u8]]) -> Piece {
        Piece::from_matrix(matrix, PieceColor::Blue).unwrap()
    }

    fn mono() -> Piece {
        piece(&[&[1]])
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345, 70);

        assert_eq!(state.score(), 0);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.high_score(), 70);
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.episode_id(), 0);
        assert!(state.grid().is_empty());
        assert_eq!(state.tray().remaining(), 3);
    }

    #[test]
    fn test_same_seed_same_tray() {
        let a = GameState::new(9, 0);
        let b = GameState::new(9, 0);
        assert_eq!(a.tray(), b.tray());
    }

    #[test]
    fn test_place_commits_and_consumes_slot() {
        let line = piece(&[&[1, 1, 1, 1]]);
        let mut state = GameState::from_parts(GameParts {
            tray: Tray::new([Some(line), Some(mono()), Some(mono())]),
            ..GameParts::default()
        });

        let outcome = state.place(0, 0, 0).expect("placement should be accepted");
        assert_eq!(outcome.added_score(), 40);
        assert_eq!(outcome.cleared_count(), 0);
        assert!(!outcome.refilled);
        assert_eq!(state.score(), 40);
        assert!(state.tray().get(0).is_none());
        for col in 0..4 {
            assert_eq!(state.grid().get(0, col), Some(Some(PieceColor::Blue)));
        }
        assert_eq!(state.grid().get(0, 4), Some(None));
        assert_eq!(state.placements(), 1);
    }

    #[test]
    fn test_rejections_do_not_change_state() {
        let mut state = GameState::from_parts(GameParts {
            tray: Tray::new([Some(mono()), None, Some(piece(&[&[1, 1]]))]),
            ..GameParts::default()
        });
        let before = state.snapshot();

        assert!(state.place(1, 0, 0).is_none()); // empty slot
        assert!(state.place(5, 0, 0).is_none()); // no such slot
        assert!(state.place(2, 0, 7).is_none()); // off the right edge
        assert!(state.place(0, -1, 0).is_none()); // above the board

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_refill_only_when_tray_empty() {
        let mut state = GameState::from_parts(GameParts {
            tray: Tray::full([mono(), mono(), mono()]),
            seed: 5,
            ..GameParts::default()
        });

        assert!(!state.place(0, 0, 0).unwrap().refilled);
        assert_eq!(state.tray().remaining(), 2);
        assert!(!state.place(2, 0, 2).unwrap().refilled);
        assert_eq!(state.tray().remaining(), 1);
        assert!(state.place(1, 0, 4).unwrap().refilled);
        assert_eq!(state.tray().remaining(), 3);
    }

    #[test]
    fn test_terminal_state_absorbs_placements() {
        // Checkerboard: no two horizontally or vertically adjacent holes.
        let mut grid = Grid::new();
        for row in 0..8i8 {
            for col in 0..8i8 {
                if (row + col) % 2 == 0 {
                    grid.set(row, col, Some(PieceColor::Red));
                }
            }
        }
        let domino = piece(&[&[1, 1]]);
        let mut state = GameState::from_parts(GameParts {
            grid,
            tray: Tray::full([domino; 3]),
            ..GameParts::default()
        });
        assert!(state.is_terminal());
        assert!(state.place(0, 0, 1).is_none());

        state.reset();
        assert_eq!(state.status(), Status::Playing);
        assert!(state.grid().is_empty());
    }

    #[test]
    fn test_reset_keeps_high_score_and_bumps_episode() {
        let mut state = GameState::from_parts(GameParts {
            tray: Tray::full([mono(); 3]),
            ..GameParts::default()
        });
        state.place(0, 3, 3).unwrap();
        assert_eq!(state.high_score(), 10);

        state.reset();
        assert_eq!(state.score(), 0);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.high_score(), 10);
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.tray().remaining(), 3);
        assert_eq!(state.placements(), 0);
    }

    #[test]
    fn test_outcome_reports_anchor_and_slot() {
        let mut state = GameState::from_parts(GameParts {
            tray: Tray::full([mono(); 3]),
            ..GameParts::default()
        });
        let outcome = state.place(1, 7, 7).unwrap();
        assert_eq!(outcome.slot, 1);
        assert_eq!(outcome.anchor, CellPos::new(7, 7));
        assert!(!outcome.terminal);
    }

    #[test]
    fn test_from_parts_raises_high_score_to_score() {
        let state = GameState::from_parts(GameParts {
            score: 500,
            high_score: 100,
            ..GameParts::default()
        });
        assert_eq!(state.high_score(), 500);
        assert_eq!(state.tray().remaining(), 3);
    }
}
