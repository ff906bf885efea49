//! The `{ success, data | message | error, timestamp }` envelope every API
//! response is wrapped in.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{SecondsFormat, Utc};
use reqlog_core::ReqlogError;
use serde_json::json;
use tracing::{error, warn};

/// Current time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A `ReqlogError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ReqlogError);

impl From<ReqlogError> for ApiError {
    fn from(err: ReqlogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }
        (
            status,
            Json(json!({
                "success": false,
                "error": self.0.public_message(),
                "timestamp": now_iso(),
            })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
