//! Rejections for malformed relay requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::relay::request::UnknownFormat;

/// Reasons a relay request is refused before reaching upstream.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    #[error("missing required 'url' parameter")]
    MissingUrl,

    #[error("request body must be a JSON object: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownFormat(_) => StatusCode::NOT_FOUND,
            ApiError::MissingUrl | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
