//! lostfound-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds an
//! in-process post store (optionally seeded from JSON), and serves the REST
//! API over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use lostfound_core::clock::SystemClock;
use lostfound_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Lost & Found listing server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the seed file from the configuration.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;
  if cli.seed.is_some() {
    server_cfg.seed_path = cli.seed;
  }

  let store = open_store(&server_cfg)?;
  tracing::info!(posts = store.len().await, "post store ready");

  let app = axum::Router::new()
    .nest("/api", lostfound_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Build the store, seeding it when a seed file is configured.
fn open_store(cfg: &ServerConfig) -> anyhow::Result<MemoryStore> {
  let Some(path) = &cfg.seed_path else {
    return Ok(MemoryStore::new());
  };
  let json = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  MemoryStore::from_json(SystemClock, &json)
    .with_context(|| format!("failed to load seed posts from {path:?}"))
}
