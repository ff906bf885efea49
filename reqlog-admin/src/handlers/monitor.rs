use crate::response::{ApiResult, now_iso};
use crate::server::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use reqlog_core::filter::RawLogQuery;
use reqlog_core::{NewLogEntry, ReqlogError};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Entries included in the dashboard snapshot.
const DASHBOARD_RECENT_LOGS: usize = 50;

/// `GET /api/monitor/logs` — filtered query, newest first.
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RawLogQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) =
        query.map_err(|e| ReqlogError::Validation(format!("Invalid query string: {e}")))?;
    let (filter, limit) = query.parse()?;

    let mut logs = state.store.filter_logs(&filter);
    if let Some(limit) = limit {
        logs.truncate(limit);
    }
    state.metrics.record_query();

    Ok(Json(json!({
        "success": true,
        "data": logs,
        "total": logs.len(),
        "filters": filter,
    })))
}

/// `POST /api/monitor/logs` — bulk ingest of `{ "logs": [...] }`.
///
/// The whole batch is validated before anything touches the store.
pub async fn receive_logs(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let batch = match parse_batch(body) {
        Ok(batch) => batch,
        Err(e) => {
            state.metrics.record_rejected("bulk");
            return Err(e.into());
        }
    };

    let count = state.store.add_logs(batch);
    state.metrics.record_ingest("bulk", count);
    state.metrics.set_store_size(state.store.len());
    info!(count, "Received logs from backend");

    Ok(Json(json!({
        "success": true,
        "message": format!("Received {count} logs"),
        "count": count,
        "timestamp": now_iso(),
    })))
}

/// `POST /api/monitor/log` — single entry ingest.
pub async fn receive_log(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let entry = match parse_single(body) {
        Ok(entry) => entry,
        Err(e) => {
            state.metrics.record_rejected("single");
            return Err(e.into());
        }
    };

    let id = state.store.add_log(entry);
    state.metrics.record_ingest("single", 1);
    state.metrics.set_store_size(state.store.len());

    Ok(Json(json!({
        "success": true,
        "message": "Log received successfully",
        "id": id,
        "timestamp": now_iso(),
    })))
}

/// `GET /api/monitor/stats`
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": state.store.stats(),
    }))
}

/// `GET /api/monitor/dashboard` — newest entries plus full stats.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Value> {
    let logs = state.store.recent(DASHBOARD_RECENT_LOGS);
    let stats = state.store.stats();
    Json(json!({
        "success": true,
        "data": {
            "logs": logs,
            "stats": stats,
            "timestamp": now_iso(),
        },
    }))
}

/// `DELETE /api/monitor/logs` — empty the store back to its seed.
pub async fn clear_logs(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.store.clear_logs();
    state.metrics.record_clear();
    state.metrics.set_store_size(state.store.len());
    info!("Logs cleared by user");

    Json(json!({
        "success": true,
        "message": "Logs cleared successfully",
        "timestamp": now_iso(),
    }))
}

// ── Payload validation ────────────────────────────────────────

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ReqlogError> {
    body.map(|Json(v)| v)
        .map_err(|e| ReqlogError::Validation(format!("Invalid JSON body: {}", e.body_text())))
}

fn parse_batch(body: Result<Json<Value>, JsonRejection>) -> Result<Vec<NewLogEntry>, ReqlogError> {
    let mut body = json_body(body)?;
    let Some(Value::Array(items)) = body.get_mut("logs").map(Value::take) else {
        return Err(ReqlogError::Validation("Logs must be an array".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<NewLogEntry>(item).map_err(|e| {
                ReqlogError::Validation(format!("Invalid log entry at index {i}: {e}"))
            })
        })
        .collect()
}

fn parse_single(body: Result<Json<Value>, JsonRejection>) -> Result<NewLogEntry, ReqlogError> {
    let body = json_body(body)?;

    let required_present = ["method", "url", "status", "timestamp"]
        .iter()
        .all(|field| is_truthy(body.get(field)));
    if !required_present {
        return Err(ReqlogError::Validation(
            "Missing required fields: method, url, status, timestamp".into(),
        ));
    }

    serde_json::from_value(body)
        .map_err(|e| ReqlogError::Validation(format!("Invalid log entry: {e}")))
}

/// Absent, null, empty string, zero and `false` all count as missing.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}
