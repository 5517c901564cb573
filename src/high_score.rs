//! High-score persistence (JSON file under the user's config directory).
//!
//! Loading never fails the game: a missing or unreadable file counts as 0.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Where the high score lives, if anywhere
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
}

impl HighScoreStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// A store that never touches the disk
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stored high score; 0 when missing, disabled or corrupt.
    pub fn load(&self) -> u32 {
        let Some(path) = &self.path else {
            return 0;
        };
        match read(path) {
            Ok(score) => {
                debug!(path = %path.display(), score, "high score loaded");
                score
            }
            Err(err) if is_not_found(&err) => 0,
            Err(err) => {
                warn!(path = %path.display(), "ignoring high-score file: {err:#}");
                0
            }
        }
    }

    /// Write `score`, creating the parent directory if needed.
    pub fn save(&self, score: u32) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&HighScoreFile { high_score: score })?;
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), score, "high score saved");
        Ok(())
    }
}

fn read(path: &Path) -> Result<u32> {
    let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: HighScoreFile =
        serde_json::from_str(&body).with_context(|| format!("parsing {}", path.display()))?;
    Ok(file.high_score)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}
