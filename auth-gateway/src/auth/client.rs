use crate::auth::traits::{
    AuthCall, AuthReply, Authenticator, FORWARDED_RESPONSE_HEADERS,
};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use std::time::Duration;

/// Forwards authenticate calls to the authentication service over HTTP
pub struct HttpAuthenticator {
    client: reqwest::Client,
    url: String,
}

impl HttpAuthenticator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, call: AuthCall) -> ApiResult<AuthReply> {
        let mut request = self.client.post(&self.url);
        for (name, value) in call.headers.iter() {
            request = request.header(name.as_str(), value.as_bytes());
        }

        let response = request
            .body(call.body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Request failed: {}", e)))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| ApiError::Upstream(format!("Invalid status: {}", e)))?;

        // reqwest and axum sit on different `http` majors, so copy by bytes
        let mut headers = HeaderMap::new();
        for name in FORWARDED_RESPONSE_HEADERS {
            for value in response.headers().get_all(name) {
                if let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) {
                    headers.append(HeaderName::from_static(name), value);
                }
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Upstream(format!("Invalid response: {}", e)))?;

        Ok(AuthReply {
            status,
            headers,
            body,
        })
    }
}
