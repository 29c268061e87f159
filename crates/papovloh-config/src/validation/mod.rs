//! Full configuration validation.
//!
//! Checks numeric ranges and required strings, collecting every
//! problem into a single `ConfigError`.

mod helpers;


use crate::schema::PapovlohConfig;
use papovloh_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PapovlohConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_gemini(&mut errors, config);
    validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_gemini(errors: &mut Vec<String>, config: &PapovlohConfig) {
    let gemini = &config.gemini;
    validate_non_empty(errors, "gemini.api_key_env", &gemini.api_key_env);
    validate_non_empty(errors, "gemini.base_url", &gemini.base_url);
    validate_non_empty(errors, "gemini.chat_model", &gemini.chat_model);
    validate_non_empty(
        errors,
        "gemini.quick_research_model",
        &gemini.quick_research_model,
    );
    validate_non_empty(
        errors,
        "gemini.deep_research_model",
        &gemini.deep_research_model,
    );
    validate_non_empty(errors, "gemini.image_model", &gemini.image_model);
    validate_range_f64(errors, "gemini.temperature", gemini.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "gemini.connect_timeout_secs",
        gemini.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "gemini.request_timeout_secs",
        gemini.request_timeout_secs,
        5,
        600,
    );
    if let Some(ref key) = gemini.api_key {
        if key.trim().is_empty() {
            errors.push("gemini.api_key is set but empty".into());
        }
    }
}

fn validate_chat(errors: &mut Vec<String>, config: &PapovlohConfig) {
    validate_range(
        errors,
        "chat.title_max_chars",
        config.chat.title_max_chars,
        1,
        200,
    );
}
