//! High score tracking
//!
//! A single best score, persisted as a decimal string.

use serde::{Deserialize, Serialize};

use crate::persistence::{HIGH_SCORE_KEY, KeyValueStore, StorageError};

/// Best score seen across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a score, returning true if it became the new best
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the stored high score (0 when missing or malformed)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(HIGH_SCORE_KEY) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(e) => {
                    log::warn!("Ignoring malformed high score {:?}: {}", raw, e);
                    Self::default()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(HIGH_SCORE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
