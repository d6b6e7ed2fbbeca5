use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Envelope-level failures, reported through the HTTP status.
///
/// Adapter failures never use this type; they travel in-band inside a
/// 200 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpError {
    /// Malformed envelope.
    #[error("{0}")]
    Validation(String),

    /// Unknown function name.
    #[error("function not found: {0}")]
    NotFound(String),
}

impl McpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
