//! Conversation settings.

use papovloh_common::Persona;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    /// Persona selected at start-up and used for the auto-created first session.
    pub default_persona: Persona,
    /// Characters of the first prompt kept in a session title (valid range: 1-200).
    pub title_max_chars: u32,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            default_persona: Persona::Classic,
            title_max_chars: 30,
        }
    }
}
