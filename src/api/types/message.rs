//! Request body of `POST /messages/create/`

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use super::error::{ApiError, INVALID_JSON, MISSING_TEXT, TEXT_NOT_STRING};

/// Body `{"text": <string>}`
///
/// Each malformed shape maps to its own plain-text 400 message. The
/// `Content-Type` header is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMessageRequest {
    pub text: String,
}

impl CreateMessageRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ApiError::bad_request(INVALID_JSON))?;

        let Value::Object(mut fields) = value else {
            return Err(ApiError::bad_request(INVALID_JSON));
        };

        match fields.remove("text") {
            None => Err(ApiError::bad_request(MISSING_TEXT)),
            Some(Value::String(text)) => Ok(Self { text }),
            Some(_) => Err(ApiError::bad_request(TEXT_NOT_STRING)),
        }
    }
}

impl<S> FromRequest<S> for CreateMessageRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request(INVALID_JSON))?;

        Self::from_slice(&body)
    }
}
