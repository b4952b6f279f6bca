//! registrar server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered under
//! `REGISTRAR_*` environment variables, opens the SQLite store, and serves
//! the JSON API over HTTP.
//!
//! # Demo data
//!
//! ```
//! cargo run -p registrar-server --bin server -- --seed
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use registrar_server::{ServerConfig, seed::{SeedOutcome, seed}};
use registrar_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Course registrar server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Populate an empty store with sample students, courses and enrollments
  /// before serving.
  #[arg(long)]
  seed: bool,

  /// Exit after seeding instead of serving.
  #[arg(long, requires = "seed")]
  seed_only: bool,
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

  let server_cfg =
    ServerConfig::load(&cli.config).context("failed to load configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  tracing::info!(path = %store_path.display(), "opening store");
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.seed {
    let outcome = seed(&store, &mut rand::rng())
      .await
      .context("failed to seed demo data")?;
    if let SeedOutcome::Seeded { students, courses, enrollments } = outcome {
      tracing::info!(students, courses, enrollments, "demo data ready");
    }
    if cli.seed_only {
      return Ok(());
    }
  }

  let app = registrar_server::app(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
