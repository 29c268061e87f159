//! Session slot location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the slot holding every chat session.
pub const SESSIONS_SLOT: &str = "papovloh_chat_sessions";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSection {
    /// Override for the sessions file. Defaults to
    /// `<data dir>/papovloh/papovloh_chat_sessions.json`.
    pub sessions_file: Option<PathBuf>,
}

impl StorageSection {
    /// Resolve the sessions file, falling back to the platform data dir.
    pub fn resolve_sessions_file(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.sessions_file {
            return Some(path.clone());
        }
        dirs::data_dir().map(|dir| dir.join("papovloh").join(format!("{SESSIONS_SLOT}.json")))
    }
}
