use crate::cors::{cors_middleware, CorsPolicy};
use crate::handlers;
use crate::heartbeat::heartbeat;
use crate::state::AppState;
use axum::{middleware, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
///
/// Layers run outermost first: tracing, CORS, heartbeat, then the route table.
pub fn build_router(state: AppState, cors: Arc<CorsPolicy>) -> Router {
    Router::new()
        .route(
            "/authenticate",
            post(handlers::authenticate_handler).fallback(handlers::not_found_handler),
        )
        .fallback(handlers::not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(heartbeat))
        .layer(middleware::from_fn_with_state(cors, cors_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
