use crate::auth::{AuthCall, AuthReply};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use std::time::Instant;

/// Authenticate handler - hands the request to the authentication service
///
/// The body is forwarded byte for byte and the reply comes back with its
/// status untouched. Only a failure to get any reply is turned into an error.
#[axum::debug_handler]
pub async fn authenticate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<AuthReply> {
    let start = Instant::now();
    let call = AuthCall::from_parts(&headers, body);

    let reply = state.authenticator.authenticate(call).await.map_err(|e| {
        tracing::error!("Authenticator failed: {}", e);
        e
    })?;

    tracing::info!(
        status = reply.status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Authenticate request completed"
    );

    Ok(reply)
}

/// Fallback for every (method, path) pair not in the route table
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
