//! User-facing strings shared by the orchestrator and the front end.

/// Title of a session before its first prompt.
pub const NEW_SESSION_TITLE: &str = "Новый диалог";

/// Marker appended to a truncated title.
pub const TITLE_ELLIPSIS: &str = "...";

/// Stand-in for image and research content in the text-only history.
pub const HISTORY_PLACEHOLDER: &str = "[объект]";

pub const CHAT_FAILURE: &str = "Ой, что-то пошло не так!";
pub const MISSING_CREDENTIAL: &str = "Попов лох без ключа API не разговаривает.";

pub const IMAGE_FAILURE: &str = "Ой, кисточки сломались!";
pub const IMAGE_APOLOGY: &str = "Ой, кисточки сломались! Кажется, что-то пошло не так.";

pub const RESEARCH_FAILURE: &str = "Ой, интернет в школе отключили!";
pub const RESEARCH_APOLOGY: &str = "Ой, интернет в школе отключили! Кажется, что-то пошло не так.";

pub const REGENERATE_UNSUPPORTED: &str =
    "Перегенерация для этого типа сообщения пока не поддерживается.";
