//! Plain-text rendering of messages, session lists, and notices.
//!
//! Everything here is a pure function of its inputs; the app decides where
//! the text goes.

use papovloh_ai::{ImageData, ResearchResult};
use papovloh_chat::{ChatMessage, ChatSession, MessageContent, Role};
use papovloh_common::{Action, Notification, NotificationLevel, Persona, SessionId};

use super::suggestions::SUGGESTIONS;

pub(super) const MODEL_NAME: &str = "Попов лох";
pub(super) const USER_NAME: &str = "Ты";

pub(super) const THINKING: &str = "Попов лох печатает...";
pub(super) const IMAGE_PROGRESS: &str = "Колдую над шедевром...";
pub(super) const RESEARCH_QUICK_PROGRESS: &str = "Ищу в своей шпаргалке...";
pub(super) const RESEARCH_DEEP_PROGRESS: &str = "Это надолго... как контрольная по математике.";
pub(super) const YEAR_JOKE: &str = "Ты чего, с ума сошел? Год думать? У меня контра через 5 минут \
     начинается! Давай лучше что-нибудь побыстрее спроси, а то Марь Иванна спалит.";

pub(super) fn message(msg: &ChatMessage) -> String {
    if msg.is_loading {
        return format!("{MODEL_NAME}: {THINKING}");
    }
    let speaker = match msg.role {
        Role::User => USER_NAME,
        Role::Model => MODEL_NAME,
    };
    let tag = msg.id.short();
    match &msg.content {
        MessageContent::Text(text) => format!("{speaker} #{tag}: {text}"),
        MessageContent::Image { image_url } => {
            let body = match ImageData::from_data_uri(image_url) {
                Ok(image) => image_summary(&image, Some(tag)),
                Err(_) => "[картинка повреждена]".to_string(),
            };
            format!("{speaker} #{tag}: {body}")
        }
        MessageContent::Research(result) => format!("{speaker} #{tag}:\n{}", research(result)),
    }
}

/// One line describing an image and how to download it.
pub(super) fn image_summary(image: &ImageData, message: Option<&str>) -> String {
    let kib = (image.base64.len() * 3 / 4).div_ceil(1024);
    let save = match message {
        Some(tag) => format!("/save #{tag}"),
        None => "/save".to_string(),
    };
    format!("[картинка {}, {kib} КБ] {save} чтобы скачать", image.mime_type)
}

pub(super) fn research(result: &ResearchResult) -> String {
    let mut out = result.text.trim_end().to_string();
    if !result.sources.is_empty() {
        out.push_str("\nИсточники (где я подсмотрел):");
        for (i, source) in result.sources.iter().enumerate() {
            out.push_str(&format!("\n  {}. {} <{}>", i + 1, source.title, source.uri));
        }
    }
    out
}

pub(super) fn session_header(session: &ChatSession) -> String {
    format!(
        "== {} ({} {}) ==",
        session.title,
        session.persona.emoji(),
        session.persona.label()
    )
}

/// Full session view. Empty sessions show the suggestions instead.
pub(super) fn transcript(session: &ChatSession) -> String {
    let mut out = session_header(session);
    if session.messages.is_empty() {
        out.push('\n');
        out.push_str(&suggestions());
    }
    for msg in &session.messages {
        out.push('\n');
        out.push_str(&message(msg));
    }
    out
}

pub(super) fn session_list(sessions: &[ChatSession], active: Option<&SessionId>) -> String {
    if sessions.is_empty() {
        return "Тут пока пусто. Начни новый диалог! (/new)".to_string();
    }
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let marker = if Some(&s.id) == active { '*' } else { ' ' };
            format!(
                "{marker} {}. {} {} ({})",
                i + 1,
                s.persona.emoji(),
                s.title,
                timestamp(s.timestamp)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%d.%m.%Y %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "?".to_string())
}

pub(super) fn notice(n: &Notification) -> String {
    let prefix = match n.level {
        NotificationLevel::Info => "[инфо]",
        NotificationLevel::Warning => "[внимание]",
        NotificationLevel::Error => "[ошибка]",
    };
    format!("{prefix} {}", n.body)
}

pub(super) fn personas(current: Persona) -> String {
    Persona::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if *p == current { '*' } else { ' ' };
            format!(
                "{marker} {}. {} {}: {}",
                i + 1,
                p.emoji(),
                p.label(),
                p.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn onboarding() -> String {
    format!(
        "Добро пожаловать в попов лох AI!\n\
         Это не просто очередной AI. Это PapovLoh, ученик 6 «А» класса. \
         Выбери его настроение (/persona) и начни диалог.\n{}",
        personas(Persona::default())
    )
}

pub(super) fn suggestions() -> String {
    let mut out = String::from("Чем сегодня займёмся?");
    for (i, s) in SUGGESTIONS.iter().enumerate() {
        out.push_str(&format!("\n  /try {}  {}: {}", i + 1, s.title, s.prompt));
    }
    out
}

pub(super) fn help() -> String {
    let entries = Action::help_entries();
    let width = entries
        .iter()
        .map(|(usage, _)| usage.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::from("Команды (всё остальное уходит в чат):");
    for (usage, label) in entries {
        let pad = width - usage.chars().count();
        out.push_str(&format!("\n  {usage}{}  {label}", " ".repeat(pad)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use papovloh_ai::Source;

    #[test]
    fn text_messages_name_the_speaker() {
        let msg = ChatMessage::user_text("привет");
        let line = message(&msg);
        assert!(line.starts_with("Ты #"));
        assert!(line.ends_with(": привет"));
        assert!(line.contains(msg.id.short()));

        let reply = message(&ChatMessage::model_text("здарова"));
        assert!(reply.starts_with("Попов лох #"));
    }

    #[test]
    fn loading_placeholder_renders_as_typing() {
        assert_eq!(
            message(&ChatMessage::loading_placeholder()),
            format!("{MODEL_NAME}: {THINKING}")
        );
    }

    #[test]
    fn image_message_points_at_save() {
        let msg = ChatMessage::model_image(&ImageData::new("image/jpeg", "A".repeat(4096)));
        let line = message(&msg);
        assert!(line.contains("[картинка image/jpeg, 3 КБ]"));
        assert!(line.contains(&format!("/save #{}", msg.id.short())));
    }

    #[test]
    fn research_lists_sources_in_order() {
        let text = research(&ResearchResult {
            text: "Коты мурлыкают.\n".into(),
            sources: vec![
                Source {
                    uri: "https://a.example".into(),
                    title: "A".into(),
                },
                Source {
                    uri: "https://b.example".into(),
                    title: "B".into(),
                },
            ],
        });
        assert_eq!(
            text,
            "Коты мурлыкают.\nИсточники (где я подсмотрел):\n  1. A <https://a.example>\n  2. B <https://b.example>"
        );
    }

    #[test]
    fn research_without_sources_is_just_text() {
        let text = research(&ResearchResult {
            text: "Не знаю.".into(),
            sources: vec![],
        });
        assert_eq!(text, "Не знаю.");
    }

    #[test]
    fn session_list_marks_active() {
        let a = ChatSession::new(Persona::Classic);
        let b = ChatSession::new(Persona::Hardcore);
        let list = session_list(&[a.clone(), b], Some(&a.id));
        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("* 1. "));
        assert!(lines[1].starts_with("  2. 🔥"));
    }

    #[test]
    fn empty_list_invites_new_chat() {
        assert!(session_list(&[], None).contains("/new"));
    }

    #[test]
    fn empty_transcript_shows_suggestions() {
        let session = ChatSession::new(Persona::Classic);
        let text = transcript(&session);
        assert!(text.starts_with("== Новый диалог"));
        assert!(text.contains("/try 4"));
    }

    #[test]
    fn notices_carry_level() {
        assert_eq!(notice(&Notification::error("упс")), "[ошибка] упс");
        assert_eq!(notice(&Notification::info("ок")), "[инфо] ок");
    }

    #[test]
    fn onboarding_lists_all_personas() {
        let text = onboarding();
        for p in Persona::ALL {
            assert!(text.contains(p.label()));
        }
    }

    #[test]
    fn help_lists_every_command() {
        let text = help();
        assert_eq!(text.lines().count(), Action::help_entries().len() + 1);
        assert!(text.contains("/research"));
    }
}
