//! Session list, active selection, and persistence after every mutation.

use std::sync::Arc;

use papovloh_common::{Persona, SessionId};
use tracing::{debug, info, warn};

use crate::model::{derive_title, ChatMessage, ChatSession, Role};
use crate::store::SessionStore;

/// Default title length, in characters.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 30;

pub struct SessionManager {
    /// Newest first.
    sessions: Vec<ChatSession>,
    active: Option<SessionId>,
    /// The global persona selector. Only affects sessions created later.
    persona: Persona,
    title_max_chars: usize,
    store: Arc<dyn SessionStore>,
    first_run: bool,
}

impl SessionManager {
    /// Load sessions from `store`. A missing or unreadable slot starts a
    /// fresh session so there is always something to type into.
    pub fn load(store: Arc<dyn SessionStore>, default_persona: Persona) -> Self {
        let mut sessions = match store.load() {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(error = %e, "stored sessions unreadable, starting empty");
                Vec::new()
            }
        };

        // A placeholder only survives a crash mid-turn; it can never resolve.
        let mut dropped = 0;
        for session in &mut sessions {
            let before = session.messages.len();
            session.messages.retain(|m| !m.is_loading);
            dropped += before - session.messages.len();
        }
        if dropped > 0 {
            info!(dropped, "discarded stale loading placeholders");
        }

        let first_run = sessions.is_empty();
        let active = sessions.first().map(|s| s.id.clone());

        // The selector starts on the configured persona; stored sessions
        // keep their own.
        let mut manager = Self {
            sessions,
            active,
            persona: default_persona,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            store,
            first_run,
        };
        if manager.sessions.is_empty() {
            manager.create_session(default_persona);
        }
        debug!(count = manager.sessions.len(), "sessions loaded");
        manager
    }

    pub fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&ChatSession> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Change the selector. Existing sessions keep their persona.
    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    /// True when nothing was stored before this run.
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    /// Insert an empty session at the front and make it active.
    pub fn create_session(&mut self, persona: Persona) -> SessionId {
        let session = ChatSession::new(persona);
        let id = session.id.clone();
        info!(session = %id, persona = persona.as_str(), "session created");
        self.sessions.insert(0, session);
        self.active = Some(id.clone());
        self.persist();
        id
    }

    /// Activate `id` and adopt its persona. Unknown ids are ignored.
    pub fn select_session(&mut self, id: &SessionId) -> bool {
        let Some(persona) = self.get(id).map(|s| s.persona) else {
            debug!(session = %id, "select of unknown session ignored");
            return false;
        };
        self.persona = persona;
        self.active = Some(id.clone());
        true
    }

    /// Remove `id`. If it was active, the front of what remains becomes
    /// active, or nothing does.
    pub fn delete_session(&mut self, id: &SessionId) -> bool {
        let Some(idx) = self.sessions.iter().position(|s| &s.id == id) else {
            return false;
        };
        self.sessions.remove(idx);
        if self.active.as_ref() == Some(id) {
            self.active = self.sessions.first().map(|s| s.id.clone());
            if let Some(session) = self.sessions.first() {
                self.persona = session.persona;
            }
        }
        info!(session = %id, remaining = self.sessions.len(), "session deleted");
        self.persist();
        true
    }

    /// Replace the messages of `id`. The title is derived once, from the
    /// first user text, while it is still the placeholder.
    pub fn record_turn(&mut self, id: &SessionId, messages: Vec<ChatMessage>) -> bool {
        let max = self.title_max_chars;
        let Some(session) = self.sessions.iter_mut().find(|s| &s.id == id) else {
            debug!(session = %id, "turn for unknown session ignored");
            return false;
        };

        if session.has_placeholder_title() {
            if let Some(first) = messages.first().filter(|m| m.role == Role::User) {
                if let Some(text) = first.as_text() {
                    session.title = derive_title(text, max);
                    debug!(session = %id, title = %session.title, "session titled");
                }
            }
        }
        session.messages = messages;
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.sessions) {
            warn!(error = %e, "failed to persist sessions");
        }
    }
}
