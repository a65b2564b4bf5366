//! Key-value persistence for saved games.
//!
//! A store holds at most one record under [`SAVE_KEY`], overwritten on
//! every settled state change and removed on a win or reset. Loading is
//! tolerant: a record that cannot be decoded reads as absent, so a damaged
//! save can never block a fresh game.

use std::fs;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::core::SaveError;

use super::codec::{SavedGame, SAVE_KEY};

/// Where saved-game records live.
pub trait SaveStore {
    /// Overwrite the record.
    fn save(&mut self, record: &SavedGame) -> Result<(), SaveError>;

    /// Read the record. `Ok(None)` means no usable save is present,
    /// including a present-but-undecodable one.
    fn load(&self) -> Result<Option<SavedGame>, SaveError>;

    /// Remove the record. Removing an absent record is fine.
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// In-memory store, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry under `key`, if any.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Put a raw entry, bypassing the codec.
    pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.entries.insert(key.into(), raw.into());
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, record: &SavedGame) -> Result<(), SaveError> {
        let raw = record.encode()?;
        self.entries.insert(SAVE_KEY.to_string(), raw);
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedGame>, SaveError> {
        let Some(raw) = self.entries.get(SAVE_KEY) else {
            return Ok(None);
        };
        match SavedGame::decode(raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(%err, "ignoring undecodable saved game");
                Ok(None)
            }
        }
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.entries.remove(SAVE_KEY);
        Ok(())
    }
}

/// File-backed store: the record lives as one JSON file in a directory,
/// written through a temp file and rename so a crash mid-write cannot leave
/// a truncated record.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store records under `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{SAVE_KEY}.json"))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{SAVE_KEY}.json.tmp"))
    }
}

impl SaveStore for FileStore {
    fn save(&mut self, record: &SavedGame) -> Result<(), SaveError> {
        let raw = record.encode()?;
        let tmp = self.tmp_path();
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedGame>, SaveError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        match SavedGame::decode(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "ignoring undecodable saved game");
                Ok(None)
            }
        }
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSetup, GameState};

    fn record() -> SavedGame {
        let state = GameState::new(&GameSetup::new(2)).unwrap();
        SavedGame::from_state(&state)
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&record()).unwrap();
        assert!(store.get_raw(SAVE_KEY).is_some());
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, record());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(store.get_raw(SAVE_KEY).is_none());
    }

    #[test]
    fn test_memory_store_tolerates_garbage() {
        let mut store = MemoryStore::new();
        store.insert_raw(SAVE_KEY, "{definitely not json");
        assert!(store.load().unwrap().is_none());

        store.insert_raw(SAVE_KEY, r#"{"players": []}"#);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(store.load().unwrap().is_none());

        store.save(&record()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, record());

        // Overwrites, never accumulates.
        store.save(&record()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_tolerates_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        fs::write(dir.path().join(format!("{SAVE_KEY}.json")), "corrupt").unwrap();
        assert!(store.load().unwrap().is_none());

        // A save then replaces the damaged record.
        store.save(&record()).unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
