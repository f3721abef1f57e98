use crate::error::ApiResult;
use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};

/// Request headers handed on to the authenticator
pub const FORWARDED_REQUEST_HEADERS: [&str; 4] =
    ["accept", "authorization", "content-type", "x-csrf-token"];

/// Response headers handed back to the client
pub const FORWARDED_RESPONSE_HEADERS: [&str; 4] =
    ["content-type", "link", "www-authenticate", "set-cookie"];

/// An inbound authenticate request, body untouched
#[derive(Debug, Clone, Default)]
pub struct AuthCall {
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl AuthCall {
    /// Keep only the headers the authenticator is allowed to see
    pub fn from_parts(headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            headers: retain_headers(headers, &FORWARDED_REQUEST_HEADERS),
            body,
        }
    }
}

/// Whatever the authenticator answered, passed back as-is
#[derive(Debug, Clone)]
pub struct AuthReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for AuthReply {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// The external `Authenticate` capability: accepts a request, returns a
/// response or a failure
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Hand the call to the authentication subsystem.
    ///
    /// Any reply the subsystem produces, including 4xx and 5xx, is `Ok`.
    /// `Err` is reserved for failing to obtain a reply at all.
    async fn authenticate(&self, call: AuthCall) -> ApiResult<AuthReply>;
}

pub(crate) fn retain_headers(headers: &HeaderMap, names: &[&'static str]) -> HeaderMap {
    let mut kept = HeaderMap::new();
    for &name in names {
        let name = HeaderName::from_static(name);
        for value in headers.get_all(&name) {
            kept.append(name.clone(), value.clone());
        }
    }
    kept
}
