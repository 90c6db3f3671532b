use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendscout_core::providers::{
    DifyAnalyst, GitHubTrendingProvider, PreviewAnalyst, PreviewTrending,
};
use trendscout_core::{Config, RepoAnalyst, TrendingSource};
use trendscout_tui::{App, PaneLayout, TaskRunner};

#[derive(Parser)]
#[command(name = "trendscout")]
#[command(version, about = "Today's GitHub trending, explained by AI, in your terminal", long_about = None)]
struct Cli {
    /// Use bundled sample data instead of hitting GitHub and the AI service
    #[arg(long)]
    preview: bool,

    /// Write debug logs to a file
    #[arg(long)]
    debug: bool,

    /// Where --debug writes its logs
    #[arg(long, value_name = "PATH", default_value = "trendscout.log")]
    log_file: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env is optional, real environment wins
    let _ = dotenvy::dotenv();

    if cli.debug {
        init_logging(&cli.log_file)?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;
    config.apply_env();

    let (trending, analyst): (Arc<dyn TrendingSource>, Arc<dyn RepoAnalyst>) = if cli.preview {
        tracing::info!("Preview mode, using bundled sample data");
        (
            Arc::new(PreviewTrending::new()),
            Arc::new(PreviewAnalyst::new()),
        )
    } else {
        let api_key = config
            .require_api_key()
            .context("Set API_KEY (or ai.api_key in the config file), or run with --preview")?
            .to_string();
        (
            Arc::new(GitHubTrendingProvider::new(&config.trending)),
            Arc::new(DifyAnalyst::new(api_key, &config.ai)),
        )
    };

    let (wake_tx, mut wake_rx) = tokio::sync::mpsc::unbounded_channel();
    let tasks = TaskRunner::new(tokio::runtime::Handle::current(), trending, analyst)
        .with_wake(wake_tx);

    let app = App::new(tasks, config.ui.clone(), PaneLayout::default());

    // The UI loop blocks; background tasks keep running on the worker threads
    tokio::task::block_in_place(|| trendscout_tui::run_tui(app, config.ui.frame_rate, &mut wake_rx))?;

    tracing::info!("Bye");
    Ok(())
}

/// Logs go to a file so they never scribble over the TUI
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendscout=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    tracing::info!("trendscout v{} starting with debug logging", env!("CARGO_PKG_VERSION"));
    Ok(())
}
