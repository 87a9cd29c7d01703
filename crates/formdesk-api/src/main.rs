//! FormDesk API server
//!
//! # Usage
//!
//! ```bash
//! formdesk-server --config formdesk.toml
//! FORMDESK_BIND_ADDR=127.0.0.1:3000 formdesk-server
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formdesk_api::{build_router, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "formdesk-server")]
#[command(version)]
#[command(about = "FormDesk form builder API", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short, env = "FORMDESK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(dir) = &config.annotations_dir {
        tracing::info!(dir = %dir.display(), "annotations stored on disk");
    }

    let app = build_router(AppState::in_memory(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("FormDesk API listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
