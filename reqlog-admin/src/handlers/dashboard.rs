use axum::extract::Path;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use rust_embed::Embed;
use serde_json::json;

/// The static dashboard, embedded at compile time.
#[derive(Embed)]
#[folder = "../dashboard/"]
struct DashboardAssets;

/// Guess a MIME type from file extension.
fn mime_from_ext(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Serve an embedded file by path, or 404.
fn serve_embedded(path: &str) -> Response {
    match DashboardAssets::get(path) {
        Some(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime_from_ext(path)),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            file.data.into_owned(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// `GET /` and `GET /dashboard`
pub async fn redirect_to_dashboard() -> Redirect {
    Redirect::temporary("/public")
}

/// `GET /public` — the dashboard page.
pub async fn dashboard_index() -> impl IntoResponse {
    serve_embedded("index.html")
}

/// `GET /public/{*path}` — dashboard assets.
pub async fn dashboard_assets(Path(path): Path<String>) -> impl IntoResponse {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return serve_embedded("index.html");
    }
    serve_embedded(path)
}

/// Fallback for anything no route claims.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
        })),
    )
}
