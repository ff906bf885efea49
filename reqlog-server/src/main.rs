// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  reqlog — request-log collector and dashboard
//
//  Ingest:  POST /api/monitor/logs, /api/monitor/log
//  Query:   GET  /api/monitor/{logs,stats,dashboard}
//  UI:      /public (embedded)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::Parser;
use reqlog_admin::server::{self, AppState};
use reqlog_core::ReqlogConfig;
use reqlog_observability::MetricsCollector;
use reqlog_store::LogStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "reqlog", version, about = "In-memory HTTP request-log collector and dashboard")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "reqlog.yaml")]
    config: PathBuf,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "reqlog starting");

    // ── Config ──
    let config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        ReqlogConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        let config = ReqlogConfig::default();
        config.validate()?;
        config
    };

    // ── Store ──
    let store = Arc::new(LogStore::new(config.store.max_logs));
    info!(max_logs = store.max_logs(), seeded = store.len(), "Log store ready");

    // ── Metrics ──
    let metrics = Arc::new(MetricsCollector::new(config.observability.prometheus.enabled)?);
    if metrics.is_enabled() {
        info!(path = %config.observability.prometheus.path, "Prometheus metrics enabled");
    }

    let state = Arc::new(AppState::new(config, store, metrics));

    server::serve(state, shutdown_signal()).await?;

    info!("reqlog stopped");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM (docker stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
