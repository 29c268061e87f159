use std::path::PathBuf;

use crate::Persona;

use super::{Action, ResearchTier};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("Неизвестная команда /{0}. Набери /help.")]
    UnknownCommand(String),

    #[error("/{command}: не хватает аргумента ({what}).")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("/{command}: не понял «{value}».")]
    InvalidArgument { command: &'static str, value: String },
}

impl Action {
    /// Resolve one input line. Lines without a leading `/` are chat
    /// prompts; blank lines are `Action::None`.
    pub fn parse(line: &str) -> Result<Action, ActionParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Action::None);
        }
        let Some(body) = line.strip_prefix('/') else {
            return Ok(Action::Send(line.to_string()));
        };
        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };

        match name.to_lowercase().as_str() {
            "new" => Ok(Action::NewSession),
            "list" | "ls" => Ok(Action::ListSessions),
            "select" | "open" => position("select", rest).map(Action::SelectSession),
            "delete" | "rm" => position("delete", rest).map(Action::DeleteSession),
            "persona" if rest.is_empty() => Ok(Action::ShowPersonas),
            "persona" => rest
                .parse::<Persona>()
                .map(Action::SetPersona)
                .map_err(|_| ActionParseError::InvalidArgument {
                    command: "persona",
                    value: rest.to_string(),
                }),
            "regen" => Ok(Action::Regenerate(message_ref(rest))),
            "try" => position("try", rest).map(Action::TrySuggestion),
            "image" if rest.is_empty() => Err(ActionParseError::MissingArgument {
                command: "image",
                what: "что нарисовать",
            }),
            "image" => Ok(Action::GenerateImage(rest.to_string())),
            "research" => research(rest),
            "save" => Ok(save(rest)),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" | "q" => Ok(Action::Quit),
            other => Err(ActionParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// 1-based list position.
fn position(command: &'static str, arg: &str) -> Result<usize, ActionParseError> {
    if arg.is_empty() {
        return Err(ActionParseError::MissingArgument {
            command,
            what: "номер",
        });
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ActionParseError::InvalidArgument {
            command,
            value: arg.to_string(),
        }),
    }
}

/// `#ab12cd34` or bare `ab12cd34`.
fn message_ref(arg: &str) -> Option<String> {
    let id = arg.trim().trim_start_matches('#');
    (!id.is_empty()).then(|| id.to_string())
}

fn research(rest: &str) -> Result<Action, ActionParseError> {
    let (first, remainder) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(f, r)| (f, r.trim()));

    let (tier, query) = match ResearchTier::from_keyword(first) {
        Some(tier) => (tier, remainder),
        None => (ResearchTier::default(), rest),
    };

    // The year tier answers without a topic.
    if query.is_empty() && tier != ResearchTier::Year {
        return Err(ActionParseError::MissingArgument {
            command: "research",
            what: "тема",
        });
    }
    Ok(Action::Research {
        tier,
        query: query.to_string(),
    })
}

fn save(rest: &str) -> Action {
    let (message, path) = if rest.starts_with('#') {
        let (id, path) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(id, p)| (id, p.trim()));
        (message_ref(id), path)
    } else {
        (None, rest)
    };
    Action::SaveImage {
        message,
        path: (!path.is_empty()).then(|| PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_prompt() {
        assert_eq!(
            Action::parse("  как дела?  ").unwrap(),
            Action::Send("как дела?".into())
        );
        assert_eq!(Action::parse("   ").unwrap(), Action::None);
    }

    #[test]
    fn session_commands() {
        assert_eq!(Action::parse("/new").unwrap(), Action::NewSession);
        assert_eq!(Action::parse("/ls").unwrap(), Action::ListSessions);
        assert_eq!(Action::parse("/select 2").unwrap(), Action::SelectSession(2));
        assert_eq!(Action::parse("/rm 1").unwrap(), Action::DeleteSession(1));
    }

    #[test]
    fn positions_are_one_based() {
        assert!(matches!(
            Action::parse("/select 0"),
            Err(ActionParseError::InvalidArgument { command: "select", .. })
        ));
        assert!(matches!(
            Action::parse("/delete"),
            Err(ActionParseError::MissingArgument { command: "delete", .. })
        ));
        assert!(Action::parse("/try abc").is_err());
    }

    #[test]
    fn persona_by_tag_label_or_index() {
        assert_eq!(Action::parse("/persona").unwrap(), Action::ShowPersonas);
        assert_eq!(
            Action::parse("/persona hardcore").unwrap(),
            Action::SetPersona(Persona::Hardcore)
        );
        assert_eq!(
            Action::parse("/persona SUPER").unwrap(),
            Action::SetPersona(Persona::Super)
        );
        assert_eq!(
            Action::parse("/persona 1").unwrap(),
            Action::SetPersona(Persona::Classic)
        );
        assert!(Action::parse("/persona злой").is_err());
    }

    #[test]
    fn regen_accepts_hash_prefix() {
        assert_eq!(Action::parse("/regen").unwrap(), Action::Regenerate(None));
        assert_eq!(
            Action::parse("/regen #ab12").unwrap(),
            Action::Regenerate(Some("ab12".into()))
        );
    }

    #[test]
    fn image_needs_a_prompt() {
        assert_eq!(
            Action::parse("/image кот-космонавт на скейте").unwrap(),
            Action::GenerateImage("кот-космонавт на скейте".into())
        );
        assert!(matches!(
            Action::parse("/image   "),
            Err(ActionParseError::MissingArgument { command: "image", .. })
        ));
    }

    #[test]
    fn research_tier_is_optional() {
        assert_eq!(
            Action::parse("/research почему коты мурлыкают").unwrap(),
            Action::Research {
                tier: ResearchTier::Quick,
                query: "почему коты мурлыкают".into()
            }
        );
        assert_eq!(
            Action::parse("/research deep почему коты мурлыкают").unwrap(),
            Action::Research {
                tier: ResearchTier::Deep,
                query: "почему коты мурлыкают".into()
            }
        );
        assert_eq!(
            Action::parse("/research год").unwrap(),
            Action::Research {
                tier: ResearchTier::Year,
                query: String::new()
            }
        );
        assert!(Action::parse("/research deep").is_err());
        assert!(Action::parse("/research").is_err());
    }

    #[test]
    fn save_with_and_without_message() {
        assert_eq!(
            Action::parse("/save").unwrap(),
            Action::SaveImage {
                message: None,
                path: None
            }
        );
        assert_eq!(
            Action::parse("/save #ab12 /tmp/cat.jpg").unwrap(),
            Action::SaveImage {
                message: Some("ab12".into()),
                path: Some(PathBuf::from("/tmp/cat.jpg"))
            }
        );
        assert_eq!(
            Action::parse("/save ~/Картинки").unwrap(),
            Action::SaveImage {
                message: None,
                path: Some(PathBuf::from("~/Картинки"))
            }
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = Action::parse("/dance").unwrap_err();
        assert_eq!(err, ActionParseError::UnknownCommand("dance".into()));
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn app_commands() {
        assert_eq!(Action::parse("/help").unwrap(), Action::Help);
        assert_eq!(Action::parse("/?").unwrap(), Action::Help);
        assert_eq!(Action::parse("/exit").unwrap(), Action::Quit);
    }
}
