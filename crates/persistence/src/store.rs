//! Storage port: one key per save, backed by files or memory.

use crate::codec::{decode_json, serialize};
use crate::SAVE_KEY;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use xiuzhen_core::{default_state, GameState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Host key-value storage.
pub trait SaveStore {
    /// Read the payload stored under `key`, `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the payload stored under `key`.
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target then rename so a crash never leaves half a save.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store. `fail_writes` simulates an unavailable backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
    pub fail_writes: bool,
    pub writes: usize,
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        self.writes += 1;
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Serialize `state` and write it under [`SAVE_KEY`].
pub fn write_state<S: SaveStore + ?Sized>(
    store: &mut S,
    state: &GameState,
) -> Result<(), StoreError> {
    let bytes = serialize(state)?;
    let json = String::from_utf8(bytes).map_err(|e| StoreError::Unavailable(e.to_string()))?;
    store.write(SAVE_KEY, &json)
}

/// Load the stored save, falling back to a fresh game at `now_ms` when the
/// record is absent, unreadable or invalid.
pub fn load_or_default<S: SaveStore + ?Sized>(store: &S, now_ms: i64) -> GameState {
    let raw = match store.read(SAVE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("no save found, starting a new game");
            return default_state(now_ms);
        }
        Err(e) => {
            warn!(error = %e, "save unreadable, starting a new game");
            return default_state(now_ms);
        }
    };
    match decode_json(raw.as_bytes()) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "save invalid, starting a new game");
            default_state(now_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_yields_default() {
        let store = MemoryStore::default();
        let s = load_or_default(&store, 42);
        assert_eq!(s.last_tick_at_ms, 42);
    }

    #[test]
    fn corrupt_record_yields_default() {
        let mut store = MemoryStore::default();
        store.entries.insert(SAVE_KEY.into(), "{not json".into());
        let s = load_or_default(&store, 7);
        assert_eq!(s, default_state(7));
    }

    #[test]
    fn written_state_loads_back() {
        let mut store = MemoryStore::default();
        let mut s = default_state(3);
        s.lingshi = 9_999.0;
        write_state(&mut store, &s).unwrap();
        assert_eq!(load_or_default(&store, 0), s);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("xiuzhen-store-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "payload").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("payload"));
        let _ = fs::remove_dir_all(&dir);
    }
}
