//! Error responses of the message API

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::QueryResponse;

pub const INVALID_JSON: &str = "Invalid JSON";
pub const MISSING_TEXT: &str = "Missing field: text";
pub const TEXT_NOT_STRING: &str = "Field 'text' must be a string";

/// API error with status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed request, answered with a plain-text body
    BadRequest(&'static str),
    /// Failure while answering, answered with an `ERROR` query response
    Server(String),
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self::BadRequest(message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::BadRequest(message) => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                message,
            )
                .into_response(),
            Self::Server(message) => (
                status,
                Json(QueryResponse::error(format!("Server Error: {}", message))),
            )
                .into_response(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "bad request: {}", message),
            Self::Server(message) => write!(f, "server error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}
