use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Credentials posted to the authenticate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    pub password: String,
}

impl AuthPayload {
    /// Parse a request body, rejecting blank credentials
    pub fn from_slice(body: &[u8]) -> Result<Self, CommonError> {
        let payload: AuthPayload = serde_json::from_slice(body)?;

        if payload.email.trim().is_empty() {
            return Err(CommonError::InvalidData("email is empty".to_string()));
        }
        if payload.password.is_empty() {
            return Err(CommonError::InvalidData("password is empty".to_string()));
        }

        Ok(payload)
    }
}

/// Envelope returned by the authentication service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonResponse {
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}
