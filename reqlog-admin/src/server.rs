use crate::handlers::{dashboard, health, monitor};
use crate::response::ApiError;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqlog_core::{ReqlogConfig, ReqlogError};
use reqlog_observability::MetricsCollector;
use reqlog_store::LogStore;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared by every handler.
pub struct AppState {
    pub config: ReqlogConfig,
    pub store: Arc<LogStore>,
    pub metrics: Arc<MetricsCollector>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ReqlogConfig, store: Arc<LogStore>, metrics: Arc<MetricsCollector>) -> Self {
        metrics.set_store_size(store.len());
        Self {
            config,
            store,
            metrics,
            started_at: Instant::now(),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let monitor_api = Router::new()
        .route(
            "/logs",
            get(monitor::get_logs)
                .post(monitor::receive_logs)
                .delete(monitor::clear_logs),
        )
        .route("/log", post(monitor::receive_log))
        .route("/stats", get(monitor::get_stats))
        .route("/dashboard", get(monitor::get_dashboard));

    let healthcheck_api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ping", get(health::ping))
        .route("/status", get(health::status));

    let mut app = Router::new()
        .nest("/api/monitor", monitor_api)
        .nest("/api/healthcheck", healthcheck_api)
        .route("/health", get(health::liveness))
        .route("/", get(dashboard::redirect_to_dashboard))
        .route("/dashboard", get(dashboard::redirect_to_dashboard))
        .route("/public", get(dashboard::dashboard_index))
        .route("/public/", get(dashboard::dashboard_index))
        .route("/public/{*path}", get(dashboard::dashboard_assets));

    if state.metrics.is_enabled() {
        let path = state.config.observability.prometheus.path.clone();
        app = app.route(&path, get(metrics_handler));
    }

    let body_limit = state.config.server.body_limit_bytes;

    app.fallback(dashboard::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.server.addr.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "reqlog listening");
    info!("Dashboard available at http://{addr}/public");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Prometheus metrics endpoint handler.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics.set_store_size(state.store.len());
    state.metrics.render()
}

/// Turn a handler panic into the standard 500 envelope.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");
    ApiError(ReqlogError::Internal(detail)).into_response()
}
