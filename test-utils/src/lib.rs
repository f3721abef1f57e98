use anyhow::{Context, Result};
/// Test utilities for integration tests
/// Serves routers on ephemeral ports and stands in for the authentication service
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use common::{AuthPayload, JsonResponse};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "verysecret";

/// A router served on 127.0.0.1 with an OS-assigned port
///
/// The server task is aborted when the value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(app: Router) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind ephemeral port")?;
        let addr = listener
            .local_addr()
            .context("Failed to read local address")?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server on {} stopped: {}", addr, e);
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Known credentials, email -> password
#[derive(Clone, Default)]
pub struct Credentials(Arc<HashMap<String, String>>);

impl Credentials {
    pub fn with_admin() -> Self {
        Self::from_pairs(&[(ADMIN_EMAIL, ADMIN_PASSWORD)])
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(Arc::new(
            pairs
                .iter()
                .map(|(email, password)| (email.to_string(), password.to_string()))
                .collect(),
        ))
    }

    fn check(&self, payload: &AuthPayload) -> bool {
        self.0.get(&payload.email) == Some(&payload.password)
    }
}

/// Stub of the authentication service's `POST /authenticate`
///
/// 202 with a success envelope for known credentials, 400 with
/// "invalid credentials" for anything else, including unparsable bodies.
pub async fn stub_authenticate(
    State(credentials): State<Credentials>,
    body: Bytes,
) -> (StatusCode, Json<JsonResponse>) {
    let payload = match AuthPayload::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonResponse::failure("invalid credentials")),
            )
        }
    };

    if !credentials.check(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(JsonResponse::failure("invalid credentials")),
        );
    }

    (
        StatusCode::ACCEPTED,
        Json(JsonResponse::ok(
            format!("Logged in user {}", payload.email),
            Some(serde_json::json!({ "email": payload.email })),
        )),
    )
}

/// Start the stub authentication service
pub async fn spawn_stub_authenticator(credentials: Credentials) -> Result<TestServer> {
    let app = Router::new()
        .route("/authenticate", post(stub_authenticate))
        .with_state(credentials);

    TestServer::spawn(app).await
}

/// An address nothing listens on
pub async fn unused_addr() -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}
