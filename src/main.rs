use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use photofeed::config::Config;
use photofeed::controller::{FetchController, FetchState};
use photofeed::repository::NetworkPhotoRepository;

/// Fetch a photo feed and print it.
#[derive(Debug, Parser)]
#[command(name = "photofeed", version, about)]
struct Args {
    /// Base URL of the photo API (overrides config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config file).
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to a config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load config")?,
        None => Config::load().context("failed to load config")?,
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_seconds = timeout;
    }
    config.validate().context("invalid configuration")?;

    let repository = Arc::new(NetworkPhotoRepository::new(&config));
    let controller = FetchController::new(repository);

    // Render each state transition until the fetch settles, the terminal
    // equivalent of the spinner/list/error screens.
    let mut rx = controller.subscribe();
    loop {
        let state = rx.borrow_and_update().clone();
        match state {
            FetchState::Loading => println!("Loading..."),
            FetchState::Success(photos) => {
                println!("Fetched {} photos:", photos.len());
                for photo in &photos {
                    println!("  {}  {}", photo.id, photo.img_src);
                }
                return Ok(());
            }
            FetchState::Error => {
                println!("Failed to fetch photos (see logs for detail).");
                std::process::exit(1);
            }
        }
        rx.changed().await.context("controller state channel closed")?;
    }
}
