//! Conversation core for PapovLoh.
//!
//! - `model`: messages, content variants, sessions
//! - `store`: the persistent session slot
//! - `manager`: session CRUD and title derivation
//! - `orchestrator`: turns a prompt into gateway calls and folds the
//!   outcome back into the message list, with a single-flight guard

pub mod error;
pub mod manager;
pub mod model;
pub mod orchestrator;
pub mod store;
pub mod texts;

pub use error::ChatError;
pub use manager::SessionManager;
pub use model::{derive_title, ChatMessage, ChatSession, MessageContent, Role};
pub use orchestrator::{to_history, Orchestrator, TurnOutcome};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
