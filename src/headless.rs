//! Line-protocol driver for scripts and tests.
//!
//! One command per input line (`place <slot> <row> <col>`, `reset`, `show`),
//! one JSON object per output line. A line that does not parse answers with
//! `{"error": ...}` and the session carries on. Blank lines are ignored.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{GameState, Piece};
use crate::high_score::HighScoreStore;
use crate::types::{Command, ParseCommandError};

/// One offered piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayEntry {
    pub color: &'static str,
    /// Rows of `#` (filled) and `.` (empty)
    pub shape: Vec<String>,
}

impl TrayEntry {
    fn of(piece: &Piece) -> Self {
        let shape = (0..piece.height())
            .map(|r| {
                (0..piece.width())
                    .map(|c| if piece.shape.is_filled(r, c) { '#' } else { '.' })
                    .collect()
            })
            .collect();
        Self {
            color: piece.color.as_str(),
            shape,
        }
    }
}

/// Game state after a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Set for `place`: whether the placement was accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<u32>,
    pub score: u32,
    pub combo: u32,
    pub high_score: u32,
    pub terminal: bool,
    pub episode: u32,
    pub tray: Vec<Option<TrayEntry>>,
    /// Eight rows, `.` for empty and the color glyph for filled cells
    pub grid: Vec<String>,
}

impl Response {
    fn of(state: &GameState) -> Self {
        Self {
            accepted: None,
            cleared: None,
            added: None,
            score: state.score(),
            combo: state.combo(),
            high_score: state.high_score(),
            terminal: state.is_terminal(),
            episode: state.episode_id(),
            tray: state
                .tray()
                .slots()
                .iter()
                .map(|slot| slot.as_ref().map(TrayEntry::of))
                .collect(),
            grid: state.grid().to_rows(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Apply one parsed command.
pub fn apply(state: &mut GameState, command: Command) -> Response {
    match command {
        Command::Place { slot, row, col } => {
            let outcome = state.place(slot, row, col);
            let mut response = Response::of(state);
            response.accepted = Some(outcome.is_some());
            response.cleared = outcome.as_ref().map(|o| o.cleared_count());
            response.added = outcome.as_ref().map(|o| o.added_score());
            response
        }
        Command::Reset => {
            state.reset();
            Response::of(state)
        }
        Command::Show => Response::of(state),
    }
}

/// Parse and apply one input line. `Ok(None)` for blank lines.
pub fn respond(state: &mut GameState, line: &str) -> Result<Option<Response>, ParseCommandError> {
    match line.parse::<Command>() {
        Ok(command) => Ok(Some(apply(state, command))),
        Err(ParseCommandError::Empty) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Drive `state` from `input` until end of input.
pub fn run<R: BufRead, W: Write>(
    state: &mut GameState,
    store: &HighScoreStore,
    input: R,
    mut output: W,
) -> Result<()> {
    info!(high_score = state.high_score(), "headless session started");
    let mut saved = state.high_score();

    for line in input.lines() {
        let line = line.context("reading command")?;
        let json = match respond(state, &line) {
            Ok(None) => continue,
            Ok(Some(response)) => serde_json::to_string(&response)?,
            Err(err) => serde_json::to_string(&ErrorResponse {
                error: err.to_string(),
            })?,
        };
        writeln!(output, "{json}").context("writing response")?;
        output.flush().context("writing response")?;

        if state.high_score() > saved {
            saved = state.high_score();
            info!(high_score = saved, "new high score");
            if let Err(err) = store.save(saved) {
                warn!("could not save high score: {err:#}");
            }
        }
    }

    info!(score = state.score(), "headless session ended");
    Ok(())
}
