use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folio_core::error::CoreError;
use folio_sanity::SanityError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`SanityError`] for
/// content-store failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A content-store error on a read path.
    #[error(transparent)]
    Sanity(#[from] SanityError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request was well-formed but its content failed a confidence
    /// check (e.g. text that does not look like a Screen Time screenshot).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// A required piece of configuration is absent.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// Writing to the content store failed; fatal to the request.
    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Content-store errors (read paths) ---
            AppError::Sanity(err) => classify_sanity_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE",
                msg.clone(),
            ),
            AppError::MissingConfiguration(name) => {
                tracing::error!(variable = name, "Missing configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MISSING_CONFIGURATION",
                    format!("Missing {name}"),
                )
            }
            AppError::StoreWrite(detail) => {
                tracing::error!(error = %detail, "Content store write failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_WRITE_FAILED",
                    "Failed to save to database".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a content-store error into an HTTP status, code, and message.
///
/// - A missing write token is a server misconfiguration (500).
/// - Upstream transport/API failures map to 502 with a sanitized message.
/// - A malformed image reference reaching this layer is a bug (500).
fn classify_sanity_error(err: &SanityError) -> (StatusCode, &'static str, String) {
    match err {
        SanityError::MissingToken => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "MISSING_CONFIGURATION",
            "Missing SANITY_WRITE_TOKEN".to_string(),
        ),
        SanityError::Api { status, message } => {
            tracing::error!(upstream_status = status, error = %message, "Content store error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Content store request failed".to_string(),
            )
        }
        SanityError::Http(inner) => {
            tracing::error!(error = %inner, "Content store transport error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Content store request failed".to_string(),
            )
        }
        SanityError::MissingDocumentId => {
            tracing::error!("Content store mutation returned no id");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Content store request failed".to_string(),
            )
        }
        SanityError::MalformedImageRef(reference) => {
            tracing::error!(reference = %reference, "Malformed image reference");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
