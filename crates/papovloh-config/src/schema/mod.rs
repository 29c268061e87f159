//! Configuration schema types for PapovLoh.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod gemini;
mod storage;
mod system;

pub use chat::*;
pub use gemini::*;
pub use storage::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PapovlohConfig {
    pub gemini: GeminiSection,
    pub chat: ChatSection,
    pub storage: StorageSection,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use papovloh_common::Persona;

    #[test]
    fn default_gemini_models() {
        let config = PapovlohConfig::default();
        assert_eq!(config.gemini.chat_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.quick_research_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.deep_research_model, "gemini-2.5-pro");
        assert_eq!(config.gemini.image_model, "imagen-4.0-generate-001");
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn default_chat_section() {
        let config = PapovlohConfig::default();
        assert_eq!(config.chat.default_persona, Persona::Classic);
        assert_eq!(config.chat.title_max_chars, 30);
    }

    #[test]
    fn default_logging_level() {
        let config = PapovlohConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.level.as_directive(), "papovloh=info");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: PapovlohConfig = toml::from_str(
            r#"
[chat]
default_persona = "hardcore"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.default_persona, Persona::Hardcore);
        assert_eq!(config.chat.title_max_chars, 30);
        assert_eq!(config.gemini.chat_model, "gemini-2.5-flash");
    }

    #[test]
    fn gemini_debug_redacts_api_key() {
        let mut config = PapovlohConfig::default();
        config.gemini.api_key = Some("super-secret".into());
        let debug = format!("{:?}", config.gemini);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
