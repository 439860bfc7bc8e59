//! Suggestion persistence.

use chrono::Utc;
use folio_core::suggestion::BookSuggestion;

use crate::client::SanityClient;
use crate::error::SanityError;

/// Store a new book suggestion and return its document id.
///
/// The title must already be validated
/// ([`folio_core::suggestion::validate_title`]); this function only stamps
/// the submission time and writes the document.
pub async fn submit_suggestion(client: &SanityClient, title: &str) -> Result<String, SanityError> {
    let document = BookSuggestion::new(title, Utc::now());
    let id = client.create(&document).await?;
    tracing::info!(document_id = %id, "Book suggestion stored");
    Ok(id)
}
