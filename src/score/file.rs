//! JSON file backed high score

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::ScoreStore;

/// On-disk layout, e.g. `{"high_score": 17}`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Best score persisted to a JSON file
///
/// The value is cached in memory. A failed write after opening is logged and
/// the in-memory best still moves, so the game never sees a storage error.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    best: u32,
}

impl FileScoreStore {
    /// Open the store, reading the current best if the file exists
    ///
    /// A missing file means no score has been recorded yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let best = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read high score from {:?}", path))?;
            let record: HighScoreRecord = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse high score file {:?}", path))?;
            record.high_score
        } else {
            0
        };

        Ok(Self { path, best })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let record = HighScoreRecord {
            high_score: self.best,
        };
        let json = serde_json::to_string(&record).context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self) -> u32 {
        self.best
    }

    fn save(&mut self, candidate: u32) -> bool {
        if candidate <= self.best {
            return false;
        }

        self.best = candidate;
        match self.persist() {
            Ok(()) => info!(high_score = candidate, path = ?self.path, "High score saved"),
            Err(e) => warn!("Keeping high score {} in memory only: {:#}", candidate, e),
        }
        true
    }

    fn clear(&mut self) {
        self.best = 0;
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!(path = ?self.path, "High score cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove high score file {:?}: {}", self.path, e),
        }
    }
}
