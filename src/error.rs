//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and bodies.

use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::item_store::StoreError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code:
///
/// - `Validation` → 422 Unprocessable Entity
/// - `ItemNotFound` → 404 Not Found (empty body)
/// - `InvalidCredentials` → 401 Unauthorized (plain-text body)
/// - `PayloadTooLarge` → 413 Payload Too Large
/// - `IdSpaceExhausted` → 409 Conflict
/// - `Database` → 500 Internal Server Error (details are logged, not returned)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request path, query, or body failed to parse or validate.
    ///
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Item not found")]
    ItemNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// The highest stored id is `i64::MAX`, so no new id can be allocated.
    #[error("No item id left to allocate")]
    IdSpaceExhausted,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::IdSpaceExhausted => AppError::IdSpaceExhausted,
        }
    }
}

impl AppError {
    /// Build an error from an axum extractor rejection.
    ///
    /// Body-limit rejections keep their 413 status; everything else is a
    /// validation failure.
    fn from_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(body_text)
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for AppError {
                fn from(rejection: $rejection) -> Self {
                    AppError::from_rejection(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, PathRejection, QueryRejection, FormRejection);

impl From<axum::extract::multipart::MultipartRejection> for AppError {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        AppError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::from_rejection(err.status(), err.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// JSON errors use this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// `ItemNotFound` and `InvalidCredentials` keep the bare responses clients
/// of this API already expect: an empty 404 and a plain-text 401.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::ItemNotFound => return StatusCode::NOT_FOUND.into_response(),
            AppError::InvalidCredentials => {
                return (StatusCode::UNAUTHORIZED, self.to_string()).into_response();
            }
            AppError::Validation(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                self.to_string(),
            ),
            AppError::IdSpaceExhausted => {
                (StatusCode::CONFLICT, "id_space_exhausted", self.to_string())
            }
            AppError::Database(ref e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
