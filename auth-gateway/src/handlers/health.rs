use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

/// Liveness probe
///
/// Returns 200 with a single `.` as plain text. No state, no downstream calls.
pub async fn ping_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        ".",
    )
}
