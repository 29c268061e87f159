//! Chat data model.
//!
//! Messages are never edited after they are finalized: a loading
//! placeholder is swapped out for a terminal message, not mutated.

use papovloh_ai::{ImageData, ResearchResult};
use papovloh_common::{MessageId, Persona, SessionId};
use serde::{Deserialize, Serialize};

use crate::texts::{NEW_SESSION_TITLE, TITLE_ELLIPSIS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// What a message carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Image { image_url: String },
    Research(ResearchResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_loading: bool,
}

impl ChatMessage {
    fn new(role: Role, content: MessageContent) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            is_loading: false,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, MessageContent::Text(text.into()))
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self::new(Role::Model, MessageContent::Text(text.into()))
    }

    pub fn model_image(image: &ImageData) -> Self {
        Self::new(
            Role::Model,
            MessageContent::Image {
                image_url: image.to_data_uri(),
            },
        )
    }

    pub fn model_research(result: ResearchResult) -> Self {
        Self::new(Role::Model, MessageContent::Research(result))
    }

    /// Spinner shown while a turn is in flight.
    pub fn loading_placeholder() -> Self {
        Self {
            is_loading: true,
            ..Self::new(Role::Model, MessageContent::Text(String::new()))
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.content {
            MessageContent::Text(ref text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    /// Creation time, unix milliseconds.
    pub timestamp: i64,
    pub persona: Persona,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(persona: Persona) -> Self {
        Self {
            id: SessionId::new(),
            title: NEW_SESSION_TITLE.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            persona,
            messages: Vec::new(),
        }
    }

    pub fn has_placeholder_title(&self) -> bool {
        self.title == NEW_SESSION_TITLE
    }
}

/// First `max_chars` characters of `text`, plus an ellipsis when cut.
pub fn derive_title(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TITLE_ELLIPSIS),
        None => text.to_string(),
    }
}
