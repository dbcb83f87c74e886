//! evidence-dash - Evidence review dashboard
//!
//! Serves the tag list, per-tag detection results and the dashboard page
//! built from them. Read-only: nothing under the data root is ever written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evidence_common::config::{Config, ConfigOverrides, TomlConfig};
use evidence_dash::api::buildinfo::BuildInfo;
use evidence_dash::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for evidence-dash
#[derive(Parser, Debug)]
#[command(name = "evidence-dash")]
#[command(about = "Evidence review dashboard")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "EVIDENCE_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "EVIDENCE_HOST")]
    host: Option<String>,

    /// Root folder containing the data/ directory
    #[arg(short, long, env = "EVIDENCE_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config =
        TomlConfig::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    let config = Config::resolve(
        toml_config,
        ConfigOverrides {
            root_folder: args.root_folder,
            port: args.port,
            host: args.host,
        },
    );

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("evidence_dash={0},evidence_common={0},tower_http=info", config.log_level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting evidence-dash v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );
    info!("Root folder: {}", config.paths.root_folder.display());
    info!("Tags file: {}", config.paths.tags_file.display());
    info!("Detections directory: {}", config.paths.detections_dir.display());

    let state = AppState::new(config.paths.store(), &config.paths.static_dir)
        .with_request_timeout(config.request_timeout);
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("evidence-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
