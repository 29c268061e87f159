//! Gemini / Imagen endpoint configuration.

use serde::{Deserialize, Serialize};

/// Generation Gateway settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    /// Inline credential. Usually left unset in favour of `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable consulted at call time when `api_key` is unset.
    pub api_key_env: String,
    pub base_url: String,
    pub chat_model: String,
    pub quick_research_model: String,
    pub deep_research_model: String,
    pub image_model: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    pub connect_timeout_secs: u32,
    pub request_timeout_secs: u32,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "GEMINI_API_KEY".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            chat_model: "gemini-2.5-flash".into(),
            quick_research_model: "gemini-2.5-flash".into(),
            deep_research_model: "gemini-2.5-pro".into(),
            image_model: "imagen-4.0-generate-001".into(),
            temperature: 1.0,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

impl std::fmt::Debug for GeminiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("quick_research_model", &self.quick_research_model)
            .field("deep_research_model", &self.deep_research_model)
            .field("image_model", &self.image_model)
            .field("temperature", &self.temperature)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
