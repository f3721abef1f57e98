use crate::handlers::ping_handler;
use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const PING_PATH: &str = "/ping";

/// `GET`/`HEAD` on the liveness path, any case
pub fn is_liveness_probe(request: &Request) -> bool {
    let method = request.method();
    (method == Method::GET || method == Method::HEAD)
        && request.uri().path().eq_ignore_ascii_case(PING_PATH)
}

/// Answers liveness probes before routing happens
pub async fn heartbeat(request: Request, next: Next) -> Response {
    if is_liveness_probe(&request) {
        return ping_handler().await.into_response();
    }

    next.run(request).await
}
