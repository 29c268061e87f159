//! The single persistent slot holding every session.
//!
//! The whole session list is written as one JSON array on every change;
//! there is no per-session file and no incremental update.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use papovloh_common::StorageError;
use tracing::debug;

use crate::model::ChatSession;

pub trait SessionStore: Send + Sync {
    /// Read the stored list. An absent slot is an empty list.
    fn load(&self) -> Result<Vec<ChatSession>, StorageError>;

    /// Replace the stored list.
    fn save(&self, sessions: &[ChatSession]) -> Result<(), StorageError>;
}

fn encode(sessions: &[ChatSession]) -> Result<String, StorageError> {
    serde_json::to_string(sessions).map_err(|e| StorageError::Encode(e.to_string()))
}

fn decode(raw: &str) -> Result<Vec<ChatSession>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Decode(e.to_string()))
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Vec<ChatSession>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no session file yet");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        decode(&raw)
    }

    fn save(&self, sessions: &[ChatSession]) -> Result<(), StorageError> {
        let json = encode(sessions)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        // Write next to the target, then rename, so a crash never leaves
        // half a file behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), count = sessions.len(), "sessions saved");
        Ok(())
    }
}

/// In-process slot. Used for `--ephemeral` runs and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw contents, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Vec<ChatSession>, StorageError> {
        match self.raw() {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, sessions: &[ChatSession]) -> Result<(), StorageError> {
        let json = encode(sessions)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Encode("session slot poisoned".into()))?;
        *slot = Some(json);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
