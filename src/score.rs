//! The one persisted value: the best score seen across sessions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// On-disk shape of the high-score file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Keeper of the persisted best score. Reads the file once at startup and
/// rewrites it only when a finished game beats the stored value, so the
/// recorded best never decreases.
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Load the stored best from `path`. A missing file means no best yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(json) => {
                serde_json::from_str::<HighScoreFile>(&json)
                    .with_context(|| format!("Malformed high-score file {:?}", path))?
                    .high_score
            }
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {:?}", path));
            }
        };
        Ok(Self { path, best })
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a finished game's score. Returns true (and rewrites the file)
    /// only when it beats the stored best.
    pub fn record(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreFile {
            high_score: self.best,
        })
        .context("Failed to serialize high score")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(true)
    }
}
