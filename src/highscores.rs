//! High score persistence
//!
//! A single scalar best score. The file format is the decimal number on its
//! own; anything else reads as no record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure writing the high score record
#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Persistence collaborator for the best score
pub trait HighScoreStore {
    /// Stored best score, 0 when there is no readable record
    fn load_high_score(&self) -> u64;

    /// Overwrite the stored best score
    fn save_high_score(&mut self, score: u64) -> Result<(), HighScoreError>;

    /// Save `score` if it beats the stored record. Returns the resulting best.
    fn submit(&mut self, score: u64) -> Result<u64, HighScoreError> {
        let best = self.load_high_score();
        if score > best {
            self.save_high_score(score)?;
            log::info!("New high score: {} (was {})", score, best);
            Ok(score)
        } else {
            Ok(best)
        }
    }
}

/// High score stored in a plain text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&self) -> u64 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return 0;
            }
        };
        match text.trim().parse::<u64>() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Corrupt high score in {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string())?;
        log::info!("High score saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and sessions without a writable disk
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub best: Option<u64>,
    pub saves: u32,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> u64 {
        self.best.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), HighScoreError> {
        self.best = Some(score);
        self.saves += 1;
        Ok(())
    }
}
