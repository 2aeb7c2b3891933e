//! High score persistence.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("stored high score {0:?} is not a number")]
    Malformed(String),
    #[error("failed to write high score")]
    Write,
}

/// Get/set capability for the single persisted value. `Ok(None)` means nothing
/// has been stored yet.
pub trait HighScoreStore {
    fn load(&self) -> Result<Option<u32>, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Read the stored high score, treating absent or unreadable values as zero.
pub fn load_or_zero<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(v) => v.unwrap_or(0),
        Err(e) => {
            log::warn!("{e}; starting from 0");
            0
        }
    }
}

fn parse(raw: &str) -> Result<u32, StoreError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StoreError::Malformed(raw.to_string()))
}

/// Volatile store used by tests and as a fallback when localStorage is missing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    raw: Option<String>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self::with_raw(&score.to_string())
    }

    /// Seed with an arbitrary stored string, e.g. a corrupt value.
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Some(raw.to_string()),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        self.raw.as_deref().map(parse).transpose()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.raw = Some(score.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// `window.localStorage` under a fixed key.
pub struct LocalStore {
    key: String,
}

impl LocalStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|_| StoreError::Unavailable)?
            .ok_or(StoreError::Unavailable)
    }
}

impl HighScoreStore for LocalStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|_| StoreError::Unavailable)?;
        raw.as_deref().map(parse).transpose()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, &score.to_string())
            .map_err(|_| StoreError::Write)
    }
}
