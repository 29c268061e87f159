use papovloh_common::{MessageId, Notification};

use crate::texts;

/// Local rejections. None of these reach the gateway or touch the
/// message list.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a generation is already in progress")]
    Busy,

    #[error("message {0} cannot be regenerated: {1}")]
    NotRegenerable(MessageId, &'static str),

    #[error("message not found: {0}")]
    MessageNotFound(MessageId),
}

impl ChatError {
    /// The banner a front end should show, if any. Empty prompts and busy
    /// rejections are silent, like a disabled send button.
    pub fn notice(&self) -> Option<Notification> {
        match self {
            ChatError::EmptyPrompt | ChatError::Busy => None,
            ChatError::NotRegenerable(..) => {
                Some(Notification::warning(texts::REGENERATE_UNSUPPORTED))
            }
            ChatError::MessageNotFound(id) => {
                Some(Notification::warning(format!("Сообщение {id} не найдено.")))
            }
        }
    }
}
