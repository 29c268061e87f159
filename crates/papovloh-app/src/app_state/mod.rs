//! Top-level application state for the terminal front end.
//!
//! Reads lines, resolves them to `Action`s, and routes each one to the
//! session manager, the orchestrator, or a standalone tool view.

mod core;
mod dispatch;
mod init;
mod render;
mod suggestions;
mod tools;


pub use core::PapovlohApp;
pub use init::gemini_config;
