//! Default TOML config template with inline documentation comments.

use crate::schema::CONFIG_SCHEMA_VERSION;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    format!(
        "# PapovLoh Configuration\n# Schema version {CONFIG_SCHEMA_VERSION}\n{TEMPLATE_BODY}"
    )
}

const TEMPLATE_BODY: &str = r##"# Only override what you want to change -- missing fields use defaults.

[gemini]
# api_key = "..."                # prefer the environment variable below
# api_key_env = "GEMINI_API_KEY" # API_KEY is also checked as a fallback
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# chat_model = "gemini-2.5-flash"
# quick_research_model = "gemini-2.5-flash"
# deep_research_model = "gemini-2.5-pro"
# image_model = "imagen-4.0-generate-001"
# temperature = 1.0              # 0.0-2.0
# connect_timeout_secs = 10      # 1-120
# request_timeout_secs = 120     # 5-600

[chat]
# default_persona = "classic"    # classic, super, hardcore
# title_max_chars = 30           # 1-200

[storage]
# sessions_file = "/path/to/papovloh_chat_sessions.json"

[logging]
# level = "info"                 # debug, info, warn, error
"##;
