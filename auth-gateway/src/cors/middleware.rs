use crate::config::OriginMode;
use crate::cors::CorsPolicy;
use crate::error::ApiError;
use crate::heartbeat::is_liveness_probe;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Applies the cross-origin policy to every request
///
/// Requests without an `Origin` header pass straight through. An `OPTIONS`
/// request with an `Origin` is answered here as a preflight and never reaches
/// the route table. For everything else the inner response is decorated with
/// CORS headers when the origin matched, whatever its status. Liveness probes
/// are never rejected, even in strict mode.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(origin) = request.headers().get(header::ORIGIN).cloned() else {
        return next.run(request).await;
    };

    let allowed = policy.allows(&origin);

    if !allowed && policy.mode() == OriginMode::Strict && !is_liveness_probe(&request) {
        let shown = String::from_utf8_lossy(origin.as_bytes()).into_owned();
        tracing::warn!(origin = %shown, path = %request.uri().path(), "Rejected request from disallowed origin");

        let mut response = ApiError::OriginRejected(shown).into_response();
        response
            .headers_mut()
            .append(header::VARY, HeaderValue::from_static("Origin"));
        return response;
    }

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        if allowed {
            policy.apply_preflight(response.headers_mut(), &origin);
        } else {
            tracing::debug!(origin = ?origin, "Preflight from unmatched origin, omitting CORS headers");
            response
                .headers_mut()
                .append(header::VARY, HeaderValue::from_static("Origin"));
        }
        return response;
    }

    let mut response = next.run(request).await;
    if allowed {
        policy.apply_actual(response.headers_mut(), &origin);
    } else {
        tracing::debug!(origin = ?origin, "Unmatched origin, serving without CORS headers");
        response
            .headers_mut()
            .append(header::VARY, HeaderValue::from_static("Origin"));
    }
    response
}
