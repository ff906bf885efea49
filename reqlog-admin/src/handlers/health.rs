use crate::response::now_iso;
use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use reqlog_observability::{format_megabytes, resident_memory_bytes};
use serde_json::{Value, json};
use std::sync::Arc;

const SERVICE_NAME: &str = "reqlog";

/// `GET /health` — bare liveness probe.
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "timestamp": now_iso(),
        "service": SERVICE_NAME,
    }))
}

/// `GET /api/healthcheck/health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "UP",
            "timestamp": now_iso(),
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": state.started_at.elapsed().as_secs_f64(),
            "checks": {
                "service": "UP",
                "storage": "UP",
            },
            "memory": {
                "rss": resident_memory_bytes(),
            },
            "store": {
                "entries": state.store.len(),
                "max_logs": state.store.max_logs(),
            },
        },
    }))
}

/// `GET /api/healthcheck/ping`
pub async fn ping() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "pong",
        "timestamp": now_iso(),
    }))
}

/// `GET /api/healthcheck/status` — build, runtime and platform details.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let uptime = state.started_at.elapsed().as_secs();
    let rss = resident_memory_bytes();
    Json(json!({
        "success": true,
        "data": {
            "service": SERVICE_NAME,
            "status": "running",
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.server.environment,
            "timestamp": now_iso(),
            "uptime": {
                "seconds": uptime,
                "readable": format_uptime(uptime),
            },
            "memory": {
                "usage": { "rss": rss },
                "formatted": { "rss": rss.map(format_megabytes) },
            },
            "platform": {
                "os": std::env::consts::OS,
                "arch": std::env::consts::ARCH,
            },
        },
    }))
}

/// `90061` → `"1d 1h 1m 1s"`.
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{days}d {hours}h {minutes}m {secs}s")
}
