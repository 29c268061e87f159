//! PapovLoh configuration.
//!
//! TOML-based configuration with serde defaults for every section, so
//! a partial file (or no file at all) works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use papovloh_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("chat model: {}", config.gemini.chat_model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{PapovlohConfig, CONFIG_SCHEMA_VERSION};

use papovloh_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating a commented
/// default file on first run.
pub fn load_config() -> Result<PapovlohConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<PapovlohConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    toml_loader::load_from_path(path)
}
