mod app_state;
mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use papovloh_ai::GeminiClient;
use papovloh_chat::{FileSessionStore, MemorySessionStore, SessionStore};
use papovloh_common::PapovlohError;
use papovloh_config::schema::PapovlohConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
/// Variables already set in the environment win.
fn load_dotenv() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut candidates = vec![
        PathBuf::from(".env"),
        // Workspace root, two levels up from crates/papovloh-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("papovloh").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim().trim_start_matches("export ").trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn open_store(args: &cli::Args, config: &PapovlohConfig) -> Arc<dyn SessionStore> {
    if args.ephemeral {
        tracing::info!("Ephemeral mode: sessions stay in memory");
        return Arc::new(MemorySessionStore::new());
    }
    let path = args
        .sessions_file
        .clone()
        .or_else(|| config.storage.resolve_sessions_file());
    match path {
        Some(path) => {
            tracing::info!("Sessions file: {}", path.display());
            Arc::new(FileSessionStore::new(path))
        }
        None => {
            tracing::warn!("No data directory found, sessions will not survive a restart");
            Arc::new(MemorySessionStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    let loaded = match args.config {
        Some(ref path) => papovloh_config::load_config_from(path),
        None => papovloh_config::load_config(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (PapovlohConfig::default(), Some(e)),
    };

    // Logs go to stderr so the conversation owns stdout.
    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_directive().to_string());
    let directive = log_directive
        .parse::<Directive>()
        .or_else(|_| "papovloh=info".parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("PapovLoh v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    match run(&args, &config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &cli::Args, config: &PapovlohConfig) -> papovloh_common::Result<()> {
    let client = GeminiClient::new(app_state::gemini_config(&config.gemini))
        .map_err(|e| PapovlohError::Ai(format!("failed to start the Gemini client: {e}")))?;

    let store = open_store(args, config);
    let mut app = app_state::PapovlohApp::new(config, Arc::new(client), store, std::io::stdout());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    app.run(stdin).await?;
    Ok(())
}
