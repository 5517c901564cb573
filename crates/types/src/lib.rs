//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core rules, the terminal
//! renderer and the scripted (headless) host alike.
//!
//! # Board Dimensions
//!
//! The puzzle is played on a fixed square grid:
//!
//! - **Size**: 8 rows by 8 columns (indexed 0-7)
//! - **Tray**: 3 offered pieces, refilled only once all three are placed
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLOCK_POINTS` | 10 | Points per placed block |
//! | `LINE_POINTS` | 100 | Points per cleared row or column |
//! | `COMBO_NUMERATOR / COMBO_DENOMINATOR` | 1/2 | Extra line multiplier per combo step |
//!
//! # Examples
//!
//! ```
//! use block_blast_types::{Command, GameAction, PieceColor, GRID_SIZE, TRAY_SLOTS};
//!
//! assert_eq!(GRID_SIZE, 8);
//! assert_eq!(TRAY_SLOTS, 3);
//!
//! // Colors round-trip through their grid glyph.
//! assert_eq!(PieceColor::from_glyph('b'), Some(PieceColor::Blue));
//!
//! // Terminal actions and scripted commands parse from text.
//! assert_eq!(GameAction::from_str("place"), Some(GameAction::Place));
//! let cmd: Command = "place 0 5 7".parse().unwrap();
//! assert_eq!(cmd, Command::Place { slot: 0, row: 5, col: 7 });
//! ```

use std::str::FromStr;

/// Grid side length in cells (8x8 board)
pub const GRID_SIZE: u8 = 8;

/// Number of cells on the board
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of tray slots offered at once
pub const TRAY_SLOTS: usize = 3;

/// Largest bounding-box side of any catalog shape
pub const MAX_SHAPE_SIDE: u8 = 5;

/// Points awarded per block placed
pub const BLOCK_POINTS: u32 = 10;

/// Points awarded per cleared row or column, before the combo multiplier
pub const LINE_POINTS: u32 = 100;

/// Combo multiplier step: each combo level adds 1/2 to the line multiplier
pub const COMBO_NUMERATOR: u32 = 1;
pub const COMBO_DENOMINATOR: u32 = 2;

/// Duration of the clear flash shown by hosts (milliseconds)
pub const CLEAR_FLASH_MS: u32 = 300;

/// Piece color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Green,
    Amber,
    Blue,
    Red,
    Purple,
    Cyan,
    Pink,
    Orange,
}

impl PieceColor {
    pub const ALL: [PieceColor; 8] = [
        PieceColor::Green,
        PieceColor::Amber,
        PieceColor::Blue,
        PieceColor::Red,
        PieceColor::Purple,
        PieceColor::Cyan,
        PieceColor::Pink,
        PieceColor::Orange,
    ];

    /// Parse color from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" => Some(PieceColor::Green),
            "amber" => Some(PieceColor::Amber),
            "blue" => Some(PieceColor::Blue),
            "red" => Some(PieceColor::Red),
            "purple" => Some(PieceColor::Purple),
            "cyan" => Some(PieceColor::Cyan),
            "pink" => Some(PieceColor::Pink),
            "orange" => Some(PieceColor::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Green => "green",
            PieceColor::Amber => "amber",
            PieceColor::Blue => "blue",
            PieceColor::Red => "red",
            PieceColor::Purple => "purple",
            PieceColor::Cyan => "cyan",
            PieceColor::Pink => "pink",
            PieceColor::Orange => "orange",
        }
    }

    /// Hex RGB code used by graphical hosts
    pub fn hex(&self) -> &'static str {
        match self {
            PieceColor::Green => "#4ade80",
            PieceColor::Amber => "#f59e0b",
            PieceColor::Blue => "#3b82f6",
            PieceColor::Red => "#ef4444",
            PieceColor::Purple => "#a855f7",
            PieceColor::Cyan => "#06b6d4",
            PieceColor::Pink => "#ec4899",
            PieceColor::Orange => "#f97316",
        }
    }

    /// Single-letter glyph used in text grids
    pub fn glyph(&self) -> char {
        match self {
            PieceColor::Green => 'G',
            PieceColor::Amber => 'A',
            PieceColor::Blue => 'B',
            PieceColor::Red => 'R',
            PieceColor::Purple => 'P',
            PieceColor::Cyan => 'C',
            PieceColor::Pink => 'K',
            PieceColor::Orange => 'O',
        }
    }

    /// Parse a grid glyph (case-insensitive). `#` is accepted as green.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'G' | '#' => Some(PieceColor::Green),
            'A' => Some(PieceColor::Amber),
            'B' => Some(PieceColor::Blue),
            'R' => Some(PieceColor::Red),
            'P' => Some(PieceColor::Purple),
            'C' => Some(PieceColor::Cyan),
            'K' => Some(PieceColor::Pink),
            'O' => Some(PieceColor::Orange),
            _ => None,
        }
    }

    /// Compact snapshot code (1-based, 0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceColor::Green => 1,
            PieceColor::Amber => 2,
            PieceColor::Blue => 3,
            PieceColor::Red => 4,
            PieceColor::Purple => 5,
            PieceColor::Cyan => 6,
            PieceColor::Pink => 7,
            PieceColor::Orange => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=8 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with a piece color)
pub type Cell = Option<PieceColor>;

/// Interactive host actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SelectSlot1,
    SelectSlot2,
    SelectSlot3,
    NextSlot,
    Place,
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "slot1" => Some(GameAction::SelectSlot1),
            "slot2" => Some(GameAction::SelectSlot2),
            "slot3" => Some(GameAction::SelectSlot3),
            "nextslot" => Some(GameAction::NextSlot),
            "place" => Some(GameAction::Place),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SelectSlot1 => "slot1",
            GameAction::SelectSlot2 => "slot2",
            GameAction::SelectSlot3 => "slot3",
            GameAction::NextSlot => "nextSlot",
            GameAction::Place => "place",
            GameAction::Restart => "restart",
        }
    }

    /// Tray slot addressed by a slot-select action
    pub fn slot(&self) -> Option<usize> {
        match self {
            GameAction::SelectSlot1 => Some(0),
            GameAction::SelectSlot2 => Some(1),
            GameAction::SelectSlot3 => Some(2),
            _ => None,
        }
    }
}

/// Commands accepted by the scripted (line-protocol) host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place { slot: usize, row: i8, col: i8 },
    Reset,
    Show,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`place` expects <slot> <row> <col>")]
    PlaceArity,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(ParseCommandError::Empty);
        };

        match head.to_lowercase().as_str() {
            "place" | "p" => {
                let args: Vec<&str> = parts.collect();
                let [slot, row, col] = args.as_slice() else {
                    return Err(ParseCommandError::PlaceArity);
                };
                Ok(Command::Place {
                    slot: parse_num(slot)?,
                    row: parse_num(row)?,
                    col: parse_num(col)?,
                })
            }
            "reset" | "restart" => Ok(Command::Reset),
            "show" => Ok(Command::Show),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_num<T: FromStr>(s: &str) -> Result<T, ParseCommandError> {
    s.parse()
        .map_err(|_| ParseCommandError::InvalidNumber(s.to_string()))
}
