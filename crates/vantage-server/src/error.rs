use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use vantage_core::{CoreError, ParseError};

/// Whether `Internal` responses should include the underlying error's debug
/// representation. Set once from `AppConfig.engine.dev_mode` at startup; this
/// is a response-formatting knob, not a registry, so it does not fall under
/// the "no hidden mutable globals" guidance for engines/providers.
static DEV_MODE: OnceLock<bool> = OnceLock::new();

pub fn set_dev_mode(enabled: bool) {
    let _ = DEV_MODE.set(enabled);
}

fn dev_mode() -> bool {
    *DEV_MODE.get().unwrap_or(&false)
}

/// The HTTP-facing error taxonomy (§7): wraps `CoreError` and adds the
/// variants that only make sense at the boundary (`NotFound`, `BadRequest`).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("Parse Error")]
    ParseFailure(Vec<ParseError>),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedLanguage(language) => ApiError::UnsupportedLanguage(language),
            CoreError::ParseFailure { errors } => ApiError::ParseFailure(errors),
            CoreError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<vantage_storage::StorageError> for ApiError {
    fn from(err: vantage_storage::StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Bad Request", "message": message }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Not Found", "message": message }),
            ),
            ApiError::ParseFailure(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Parse Error", "errors": errors }),
            ),
            ApiError::UnsupportedLanguage(language) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Bad Request",
                    "message": format!("unsupported language: {language}"),
                }),
            ),
            ApiError::Internal(message) => {
                let mut payload = json!({
                    "error": "Internal Server Error",
                    "message": "an unexpected error occurred",
                });
                if dev_mode() {
                    payload["stack"] = json!(message);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, payload)
            }
        };

        (status, Json(body)).into_response()
    }
}
