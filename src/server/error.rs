//! Mapping of crate errors onto HTTP responses.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::Error;

/// Realm announced in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = r#"Basic realm="DrakeHooks Uploader""#;

/// Request-level failure returned by handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                let mut headers = HeaderMap::new();
                headers.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(AUTH_REALM));
                (StatusCode::UNAUTHORIZED, headers, "Authentication required").into_response()
            }
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            ApiError::PayloadTooLarge(msg) => error_body(StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::Internal(msg) => error_body(StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        match error {
            Error::EmptyRequest | Error::Multipart(_) => ApiError::BadRequest(error.to_string()),
            Error::Unauthorized => ApiError::Unauthorized,
            Error::PayloadTooLarge(_) => ApiError::PayloadTooLarge(error.to_string()),
            Error::ArchiveNotFound(_) => ApiError::NotFound(error.to_string()),
            other => {
                tracing::error!("Request failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}
