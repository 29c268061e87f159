//! Gemini API client configuration.

use std::time::Duration;

use crate::research::ResearchDepth;
use crate::GatewayError;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Inline key; wins over the environment when set.
    pub api_key: Option<String>,
    /// Environment variables consulted, in order, at call time.
    pub key_vars: Vec<String>,
    pub base_url: String,
    pub chat_model: String,
    pub quick_research_model: String,
    pub deep_research_model: String,
    pub image_model: String,
    pub temperature: f64,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("key_vars", &self.key_vars)
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("quick_research_model", &self.quick_research_model)
            .field("deep_research_model", &self.deep_research_model)
            .field("image_model", &self.image_model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            key_vars: vec!["GEMINI_API_KEY".to_string(), "API_KEY".to_string()],
            base_url: GEMINI_API_BASE.to_string(),
            chat_model: "gemini-2.5-flash".to_string(),
            quick_research_model: "gemini-2.5-flash".to_string(),
            deep_research_model: "gemini-2.5-pro".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            temperature: 1.0,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Replace the environment variables searched for a key.
    pub fn with_key_vars(mut self, vars: Vec<String>) -> Self {
        self.key_vars = vars;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_research_models(
        mut self,
        quick: impl Into<String>,
        deep: impl Into<String>,
    ) -> Self {
        self.quick_research_model = quick.into();
        self.deep_research_model = deep.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn research_model(&self, depth: ResearchDepth) -> &str {
        match depth {
            ResearchDepth::Quick => &self.quick_research_model,
            ResearchDepth::Deep => &self.deep_research_model,
        }
    }

    /// Resolve the credential. Looked up on every call so a key exported
    /// after start-up is picked up.
    pub fn resolve_api_key(&self) -> Result<String, GatewayError> {
        if let Some(ref key) = self.api_key {
            if !key.trim().is_empty() {
                return Ok(key.clone());
            }
        }
        for var in &self.key_vars {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    return Ok(value);
                }
            }
        }
        Err(GatewayError::Configuration(format!(
            "set one of [{}] or gemini.api_key in config.toml",
            self.key_vars.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_key_wins() {
        let config = GeminiConfig::new()
            .with_api_key("inline")
            .with_key_vars(vec!["PAPOVLOH_TEST_NEVER_SET_1".into()]);
        assert_eq!(config.resolve_api_key().unwrap(), "inline");
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let config =
            GeminiConfig::new().with_key_vars(vec!["PAPOVLOH_TEST_NEVER_SET_2".into()]);
        let err = config.resolve_api_key().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("PAPOVLOH_TEST_NEVER_SET_2"));
    }

    #[test]
    fn blank_inline_key_falls_through() {
        let config = GeminiConfig::new()
            .with_api_key("   ")
            .with_key_vars(vec!["PAPOVLOH_TEST_NEVER_SET_3".into()]);
        assert!(config.resolve_api_key().is_err());
    }

    #[test]
    fn research_model_by_depth() {
        let config = GeminiConfig::new().with_research_models("fast", "slow");
        assert_eq!(config.research_model(ResearchDepth::Quick), "fast");
        assert_eq!(config.research_model(ResearchDepth::Deep), "slow");
    }

    #[test]
    fn debug_redacts_key() {
        let config = GeminiConfig::new().with_api_key("hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = GeminiConfig::new().with_base_url("http://localhost:9000/models/");
        assert_eq!(config.base_url, "http://localhost:9000/models");
    }
}
