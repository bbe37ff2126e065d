//! Record stdin lines into a session and print the LLM context after each turn.
//!
//! No model is called; the output is exactly what a chat client would send.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use parley::{Memory, MessageOptions, ParleyConfig, create_configured_session, current_context};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line options for the transcript demo.
#[derive(Parser)]
#[command(name = "parley-transcript", version)]
struct Cli {
    /// Optional path to a parley.json5 config file applied over the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Participant id recorded for each input line
    #[arg(long, default_value = "user")]
    user: String,
    /// System prompt recorded before the first turn
    #[arg(long)]
    system: Option<String>,
    /// Override the configured context limit (0 renders everything)
    #[arg(long)]
    limit: Option<usize>,
    /// Prefix messages with speaker ids in group sessions
    #[arg(long)]
    labels: bool,
}

fn main() -> Result<()> {
    parley::init_logging();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let mut options = parley::config::LayeredConfigOptions::new(cwd);
    if let Some(path) = &cli.config {
        options = options.with_runtime_path(path);
    }
    let mut config = ParleyConfig::load_layered_with_options(options)
        .context("failed to load parley config")?
        .config;
    if let Some(limit) = cli.limit {
        config.context.limit = limit;
    }
    config.context.include_user_labels |= cli.labels;

    let mut memory = Memory::new();
    let session = create_configured_session(
        &mut memory,
        &config,
        None,
        vec![cli.user.clone(), "assistant".to_string()],
    );
    info!("transcript session started (session_id={})", session.id());
    if let Some(prompt) = &cli.system {
        session.add_message("system", prompt.as_str(), MessageOptions::new().role("system"));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        memory.add_message(cli.user.as_str(), input, MessageOptions::new().role("user"));
        let context = current_context(&memory, &config.context);
        let rendered =
            serde_json::to_string_pretty(&context).context("failed to encode context")?;
        writeln!(stdout, "{rendered}").context("failed to write context")?;
    }

    let episodes = memory.get_current_session().map_or(0, |session| session.len());
    info!("transcript finished (episodes={})", episodes);
    Ok(())
}
