//! Command-line and environment configuration.
//!
//! Every flag can also be set through a `BLOCK_BLAST_*` environment variable;
//! an explicit flag wins.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

const APP_DIR: &str = "block-blast";
const HIGH_SCORE_FILE: &str = "high_score.json";
const LOG_FILE: &str = "block-blast.log";

/// Block Blast: drop pieces on an 8x8 grid, clear rows and columns.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "block-blast",
    version,
    about = "Block-placement puzzle in the terminal",
    long_about = "Place the three offered pieces on an 8x8 grid. Full rows and columns clear \
        together; consecutive clearing placements build a combo.\n\n\
        CONTROLS:\n  Arrows/hjkl/wasd  Move   1/2/3  Pick piece   Tab  Next piece\n  \
        Space/Enter       Place  r      Restart      q    Quit\n  \
        Mouse: drag a piece from the tray onto the grid.\n\n\
        With --headless, commands are read from stdin (`place <slot> <row> <col>`, `reset`, `show`) \
        and every response is one JSON line on stdout."
)]
pub struct Cli {
    /// Seed for the piece sequence (defaults to the system clock)
    #[arg(long, env = "BLOCK_BLAST_SEED")]
    pub seed: Option<u32>,

    /// High-score file (JSON)
    #[arg(long, env = "BLOCK_BLAST_HIGH_SCORE_FILE", value_name = "FILE")]
    pub high_score_file: Option<PathBuf>,

    /// Do not read or write the high-score file
    #[arg(long, env = "BLOCK_BLAST_NO_PERSIST")]
    pub no_persist: bool,

    /// Read line commands from stdin and answer in JSON instead of drawing a TUI
    #[arg(long)]
    pub headless: bool,

    /// Log file (the terminal itself is reserved for the game)
    #[arg(long, env = "BLOCK_BLAST_LOG", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    /// `None` disables persistence
    pub high_score_path: Option<PathBuf>,
    pub headless: bool,
    /// `None` disables logging
    pub log_path: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let high_score_path = if self.no_persist {
            None
        } else {
            self.high_score_file.or_else(default_high_score_path)
        };
        Config {
            seed: self.seed.unwrap_or_else(clock_seed),
            high_score_path,
            headless: self.headless,
            log_path: self.log_file.or_else(default_log_path),
        }
    }
}

pub fn default_high_score_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(HIGH_SCORE_FILE))
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
