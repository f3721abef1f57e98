/// End-to-end tests for the gateway
/// Runs the real router in front of the stub authentication service and
/// talks to both over TCP.
///
/// Run with: cargo test -p auth-gateway --test integration_gateway
use anyhow::Result;
use auth_gateway::auth::{Authenticator, HttpAuthenticator};
use auth_gateway::cors::CorsPolicy;
use auth_gateway::{server, AppState, CorsConfig, OriginMode};
use common::JsonResponse;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    spawn_stub_authenticator, unused_addr, Credentials, TestServer, ADMIN_EMAIL, ADMIN_PASSWORD,
};

const ORIGIN: &str = "https://app.example.com";

async fn spawn_gateway(upstream_url: String, mode: OriginMode) -> Result<TestServer> {
    let cors = CorsConfig {
        origin_mode: mode,
        ..CorsConfig::default()
    };
    let policy = Arc::new(CorsPolicy::from_config(&cors)?);
    let authenticator = HttpAuthenticator::new(upstream_url, Duration::from_secs(5))?;
    let state = AppState::new(Arc::new(authenticator) as Arc<dyn Authenticator>);

    TestServer::spawn(server::build_router(state, policy)).await
}

fn credentials_body(email: &str, password: &str) -> String {
    serde_json::json!({ "email": email, "password": password }).to_string()
}

#[tokio::test]
async fn test_valid_credentials_pass_through() -> Result<()> {
    let upstream = spawn_stub_authenticator(Credentials::with_admin()).await?;
    let gateway = spawn_gateway(upstream.url("/authenticate"), OriginMode::Permissive).await?;

    let response = reqwest::Client::new()
        .post(gateway.url("/authenticate"))
        .header("content-type", "application/json")
        .header("origin", ORIGIN)
        .body(credentials_body(ADMIN_EMAIL, ADMIN_PASSWORD))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 202);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ORIGIN);
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-expose-headers"], "Link");
    assert_eq!(headers["content-type"], "application/json");

    let body: JsonResponse = response.json().await?;
    assert!(!body.error);
    assert_eq!(body.message, format!("Logged in user {}", ADMIN_EMAIL));
    assert_eq!(body.data.unwrap()["email"], ADMIN_EMAIL);

    Ok(())
}

#[tokio::test]
async fn test_invalid_credentials_keep_upstream_status() -> Result<()> {
    let upstream = spawn_stub_authenticator(Credentials::with_admin()).await?;
    let gateway = spawn_gateway(upstream.url("/authenticate"), OriginMode::Permissive).await?;

    let response = reqwest::Client::new()
        .post(gateway.url("/authenticate"))
        .header("content-type", "application/json")
        .header("origin", ORIGIN)
        .body(credentials_body(ADMIN_EMAIL, "wrong"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);

    let body: JsonResponse = response.json().await?;
    assert!(body.error);
    assert_eq!(body.message, "invalid credentials");

    Ok(())
}

#[tokio::test]
async fn test_upstream_down_is_bad_gateway() -> Result<()> {
    let dead = unused_addr().await?;
    let gateway = spawn_gateway(
        format!("http://{}/authenticate", dead),
        OriginMode::Permissive,
    )
    .await?;

    let response = reqwest::Client::new()
        .post(gateway.url("/authenticate"))
        .body(credentials_body(ADMIN_EMAIL, ADMIN_PASSWORD))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 502);

    // Liveness does not care about the upstream
    let ping = reqwest::get(gateway.url("/ping")).await?;
    assert_eq!(ping.status().as_u16(), 200);
    assert_eq!(ping.text().await?, ".");

    Ok(())
}

#[tokio::test]
async fn test_preflight_over_the_wire() -> Result<()> {
    let upstream = spawn_stub_authenticator(Credentials::with_admin()).await?;
    let gateway = spawn_gateway(upstream.url("/authenticate"), OriginMode::Permissive).await?;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, gateway.url("/authenticate"))
        .header("origin", ORIGIN)
        .header("access-control-request-method", "POST")
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 204);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ORIGIN);
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, OPTIONS, DELETE"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Accept, Authorization, Content-Type, X-CSRF-Token"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-max-age"], "300");

    Ok(())
}

#[tokio::test]
async fn test_strict_mode_blocks_foreign_origin() -> Result<()> {
    let upstream = spawn_stub_authenticator(Credentials::with_admin()).await?;
    let gateway = spawn_gateway(upstream.url("/authenticate"), OriginMode::Strict).await?;

    let response = reqwest::Client::new()
        .post(gateway.url("/authenticate"))
        .header("origin", "null")
        .body(credentials_body(ADMIN_EMAIL, ADMIN_PASSWORD))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 403);
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());

    Ok(())
}
