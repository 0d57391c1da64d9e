//! High score persistence.
//!
//! The engine only ever sees an injected integer. Where that integer comes
//! from, and where a new record goes, is behind [`HighScoreStore`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Load/save capability for a single high score value
pub trait HighScoreStore {
    /// Stored high score; 0 if nothing has been stored yet
    fn load(&self) -> Result<u32>;

    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// Process-local store, mostly for tests and headless runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    value: u32,
    saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value, saves: 0 }
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value = high_score;
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file store: `{"highScore": 1234}`
#[derive(Debug, Clone, PartialEq, Eq)]
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
    fn load(&self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => {
                return Err(err).with_context(|| format!("reading high score from {}", self.path.display()))
            }
        };
        let file: HighScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing high score file {}", self.path.display()))?;
        Ok(file.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        let json = serde_json::to_string(&HighScoreFile { high_score })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, json)
            .with_context(|| format!("writing high score to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nestris-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScoreStore::new(10);
        assert_eq!(store.load().unwrap(), 10);
        store.save(99).unwrap();
        assert_eq!(store.load().unwrap(), 99);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileHighScoreStore::new(temp_path("missing.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("store/high.json");
        let mut store = FileHighScoreStore::new(&path);
        store.save(4321).unwrap();
        assert_eq!(store.load().unwrap(), 4321);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"highScore":4321}"#);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "not json").unwrap();
        let err = FileHighScoreStore::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("parsing high score file"));
        let _ = fs::remove_file(&path);
    }
}
