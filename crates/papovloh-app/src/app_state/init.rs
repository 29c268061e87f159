//! Gateway settings from the `[gemini]` config section.

use std::time::Duration;

use papovloh_ai::GeminiConfig;
use papovloh_config::schema::GeminiSection;

/// Consulted after the configured variable.
const FALLBACK_KEY_VAR: &str = "API_KEY";

pub fn gemini_config(section: &GeminiSection) -> GeminiConfig {
    let mut key_vars = vec![section.api_key_env.clone()];
    if section.api_key_env != FALLBACK_KEY_VAR {
        key_vars.push(FALLBACK_KEY_VAR.to_string());
    }

    let mut config = GeminiConfig::new()
        .with_key_vars(key_vars)
        .with_base_url(&section.base_url)
        .with_chat_model(&section.chat_model)
        .with_research_models(&section.quick_research_model, &section.deep_research_model)
        .with_image_model(&section.image_model)
        .with_temperature(section.temperature)
        .with_timeouts(
            Duration::from_secs(u64::from(section.connect_timeout_secs)),
            Duration::from_secs(u64::from(section.request_timeout_secs)),
        );
    if let Some(ref key) = section.api_key {
        config = config.with_api_key(key);
    }
    config
}
