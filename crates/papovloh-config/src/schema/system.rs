//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoping the level to this workspace's crates.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "papovloh=debug",
            LogLevel::Info => "papovloh=info",
            LogLevel::Warn => "papovloh=warn",
            LogLevel::Error => "papovloh=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
