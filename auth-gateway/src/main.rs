use auth_gateway::{auth, cors::CorsPolicy, server, AppState, Config};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("Auth gateway starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Upstream authenticator: {}", config.upstream_url);
    tracing::info!("Upstream timeout: {}s", config.upstream_timeout_secs);
    tracing::info!("Origin mode: {:?}", config.cors.origin_mode);

    // Compile the CORS policy once; it is read-only from here on
    let policy = Arc::new(CorsPolicy::from_config(&config.cors)?);
    tracing::info!("Allowed origins: {:?}", policy.patterns());

    let authenticator = auth::HttpAuthenticator::new(
        config.upstream_url.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )?;

    // Create application state with dynamic dispatch
    let state = AppState::new(Arc::new(authenticator) as Arc<dyn auth::Authenticator>);

    // Build HTTP server
    let app = server::build_router(state, policy);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Auth gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("Auth gateway stopped");

    Ok(())
}
