use std::path::PathBuf;

use clap::Parser;

/// PapovLoh: a chat with a sixth-grader who is secretly a genius.
#[derive(Parser, Debug)]
#[command(name = "papovloh", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `papovloh=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Where to keep chat sessions.
    #[arg(long)]
    pub sessions_file: Option<PathBuf>,

    /// Keep sessions in memory only; nothing is written to disk.
    #[arg(long)]
    pub ephemeral: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
