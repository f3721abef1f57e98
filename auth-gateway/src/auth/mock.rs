use crate::auth::traits::{AuthCall, AuthReply, Authenticator};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Outcome {
    Reply(AuthReply),
    Fail(String),
}

/// Mock implementation of Authenticator for unit testing
#[derive(Clone)]
pub struct MockAuthenticator {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<AuthCall>>>,
}

impl MockAuthenticator {
    /// Answer every call with `status` and a JSON body
    pub fn replying(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Self {
            outcome: Outcome::Reply(AuthReply {
                status,
                headers,
                body: body.into(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every call as if the upstream were unreachable
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<AuthCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::replying(StatusCode::ACCEPTED, r#"{"error":false,"message":"ok"}"#)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, call: AuthCall) -> ApiResult<AuthReply> {
        self.calls.lock().unwrap().push(call);

        match &self.outcome {
            Outcome::Reply(reply) => Ok(reply.clone()),
            Outcome::Fail(message) => Err(ApiError::Upstream(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockAuthenticator::default();

        let call = AuthCall {
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"first"),
        };
        mock.authenticate(call).await.unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].body, Bytes::from_static(b"first"));
    }

    #[tokio::test]
    async fn test_mock_replying() {
        let mock = MockAuthenticator::replying(StatusCode::UNAUTHORIZED, "denied");

        let reply = mock.authenticate(AuthCall::default()).await.unwrap();

        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body, Bytes::from_static(b"denied"));
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockAuthenticator::failing("connection refused");

        let result = mock.authenticate(AuthCall::default()).await;

        match result.unwrap_err() {
            ApiError::Upstream(msg) => assert_eq!(msg, "connection refused"),
            e => panic!("Expected Upstream error, got {:?}", e),
        }
        assert_eq!(mock.call_count(), 1);
    }
}
