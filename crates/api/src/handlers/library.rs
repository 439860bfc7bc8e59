//! Handlers for the library shelf and book suggestions.
//!
//! Listing is a plain content-store read. Submission writes a suggestion
//! document (fatal on failure) and then sends the curator a notification
//! email (never fatal: a delivery failure is logged and the submission
//! still succeeds).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use folio_core::suggestion;
use folio_sanity::{shelf, suggestions, SanityError};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /library/books
// ---------------------------------------------------------------------------

/// List the published books on the shelf, in curator order.
pub async fn list_books(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let books = shelf::fetch_shelf_books(&state.sanity, &state.images).await?;

    tracing::info!(count = books.len(), "Shelf books fetched");

    Ok(Json(DataResponse { data: books }))
}

// ---------------------------------------------------------------------------
// POST /library/suggestions
// ---------------------------------------------------------------------------

/// Response contract of the suggestion endpoint. This shape is consumed by
/// the site directly and deliberately bypasses the `data` envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub success: bool,
    pub sanity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// Submit a book suggestion.
///
/// The body must be `{ "bookTitle": <non-blank string> }`; anything else is
/// a 400. Axum's method routing answers 405 for non-POST requests on this
/// route.
pub async fn submit_suggestion(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    // Field presence/type is checked by hand so a missing or non-string
    // title is a 400 rather than a deserialization 422.
    let raw_title = body
        .get("bookTitle")
        .and_then(|value| value.as_str())
        .ok_or_else(|| AppError::BadRequest("Book title is required".to_string()))?;
    let title = suggestion::validate_title(raw_title)?;

    let sanity_id = suggestions::submit_suggestion(&state.sanity, &title)
        .await
        .map_err(|err| match err {
            SanityError::MissingToken => AppError::MissingConfiguration("SANITY_WRITE_TOKEN"),
            other => AppError::StoreWrite(other.to_string()),
        })?;

    // Notification is best-effort: the suggestion is already stored, so a
    // delivery failure must not turn the response into an error.
    let email_id = match &state.mailer {
        Some(mailer) => match mailer.send_suggestion_notification(&title).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(error = %err, "Suggestion notification email failed");
                None
            }
        },
        None => {
            tracing::warn!("Email delivery not configured; skipping notification");
            None
        }
    };

    tracing::info!(
        sanity_id = %sanity_id,
        email_sent = email_id.is_some(),
        "Book suggestion submitted",
    );

    Ok(Json(SuggestionResponse {
        success: true,
        sanity_id,
        email_id,
    }))
}
