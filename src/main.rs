use anyhow::{Context, Result};
use clap::Parser;
use instacart_oauth::{Config, ConsolePrompt, ResultWriter, TokenExchanger};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Instacart Ads Refresh Token Exchange - Trades OAuth authorization codes for refresh tokens
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where token files are written (default: current directory)
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Path to the .env file holding CLIENTS and per-client credentials
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

/// Load the .env file; a missing file is fine
fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "No environment file found")
        }
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to load environment file"),
    }
}

fn init_logging() {
    // Logs go to stderr; stdout carries prompts and results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging();
    load_env_file(&args.env_file);

    let config = Config::from_env();
    let exchanger = TokenExchanger::new(config.token_url());
    let writer = ResultWriter::new(&args.output_dir);

    let mut prompt = ConsolePrompt::stdio();
    let mut stdout = std::io::stdout();

    let summary = instacart_oauth::run(&config, &exchanger, &writer, &mut prompt, &mut stdout)
        .await
        .context("Token exchange aborted")?;

    tracing::debug!(?summary, "Run complete");

    Ok(())
}
