//! Everything a user can ask the front end to do.
//!
//! Typed lines resolve to an `Action`; the app dispatcher matches on it.

use std::path::PathBuf;

use crate::Persona;

mod labels;
mod parse;

pub use parse::ActionParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // -- Chat --
    /// Plain text typed at the prompt.
    Send(String),
    /// Submit the n-th (1-based) empty-chat suggestion.
    TrySuggestion(usize),
    /// Replay the prompt behind a model message, by id prefix or the last one.
    Regenerate(Option<String>),

    // -- Sessions --
    NewSession,
    ListSessions,
    /// 1-based position in the session list.
    SelectSession(usize),
    DeleteSession(usize),

    // -- Persona --
    ShowPersonas,
    SetPersona(Persona),

    // -- Tools --
    GenerateImage(String),
    Research { tier: ResearchTier, query: String },
    SaveImage {
        message: Option<String>,
        path: Option<PathBuf>,
    },

    // -- App --
    Help,
    Quit,
    None,
}

/// Research depth as offered to the user. `Year` is a joke tier that never
/// leaves the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResearchTier {
    #[default]
    Quick,
    Deep,
    Year,
}

impl ResearchTier {
    /// Recognise a tier keyword, English or Russian.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "quick" | "быстрый" | "быстро" => Some(ResearchTier::Quick),
            "deep" | "глубокий" | "глубоко" => Some(ResearchTier::Deep),
            "year" | "год" => Some(ResearchTier::Year),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_keywords() {
        assert_eq!(ResearchTier::from_keyword("DEEP"), Some(ResearchTier::Deep));
        assert_eq!(ResearchTier::from_keyword("Быстрый"), Some(ResearchTier::Quick));
        assert_eq!(ResearchTier::from_keyword("год"), Some(ResearchTier::Year));
        assert_eq!(ResearchTier::from_keyword("коты"), None);
    }

    #[test]
    fn tier_defaults_to_quick() {
        assert_eq!(ResearchTier::default(), ResearchTier::Quick);
    }
}
