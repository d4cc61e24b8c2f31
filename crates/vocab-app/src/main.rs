use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocab_config::Config;

pub mod commands;
pub mod controller;
pub mod events;
pub mod state;
pub mod status;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "vocab", about = "Vocabulary trainer: words, categories and flashcards")]
struct Args {
    /// REST backend url, overrides VOCAB_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Session file, overrides VOCAB_SESSION_FILE
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let mut config = Config::new();
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(file) = args.session_file {
        config.session.file = file;
    }
    tracing::info!("Using backend {}", config.api.base_url);

    let state = Arc::new(AppState::new(config)?);

    // Restore the previous session before any screen is resolved
    state.session.rehydrate();

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
