//! Key-value persistence for progress that outlives a session
//!
//! Two keys are stored:
//! - the high score, as a decimal integer string
//! - the unlocked achievement ids, as a JSON array of strings
//!
//! Missing or malformed values load as defaults and are never surfaced to
//! the player.

use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Storage key for the high score
pub const HIGH_SCORE_KEY: &str = "brickbreaker_highscore";
/// Storage key for the unlocked achievement list
pub const ACHIEVEMENTS_KEY: &str = "brickbreaker_achievements";

/// Storage write failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Write rejected for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A simple string key-value store (LocalStorage on web)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load unlocked achievement ids, dropping duplicates
pub fn load_achievements(store: &dyn KeyValueStore) -> Vec<String> {
    let Some(json) = store.get(ACHIEVEMENTS_KEY) else {
        log::info!("No achievements found, starting fresh");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(&json) {
        Ok(ids) => {
            let mut unique: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
            log::info!("Loaded {} achievements", unique.len());
            unique
        }
        Err(e) => {
            log::warn!("Ignoring malformed achievement data: {}", e);
            Vec::new()
        }
    }
}

/// Persist the full unlocked achievement list
pub fn save_achievements(
    store: &mut dyn KeyValueStore,
    ids: &[String],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(ids)?;
    store.set(ACHIEVEMENTS_KEY, &json)?;
    log::info!("Achievements saved ({} unlocked)", ids.len());
    Ok(())
}
