//! Book suggestion document type, status constants, and validation.
//!
//! Suggestions are created exclusively by the submission endpoint and then
//! triaged by a human curator in the content-management studio; the statuses
//! here mirror that workflow. This module only validates and shapes the
//! document -- persistence lives in `folio-sanity`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Document type
// ---------------------------------------------------------------------------

/// Content-store `_type` for suggestion documents.
pub const SUGGESTION_DOC_TYPE: &str = "bookSuggestion";

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a freshly submitted suggestion.
pub const STATUS_NEW: &str = "new";
/// The curator has looked at the suggestion.
pub const STATUS_REVIEWED: &str = "reviewed";
/// The suggested book made it onto the shelf.
pub const STATUS_ADDED: &str = "added";
/// The suggestion was declined.
pub const STATUS_DISMISSED: &str = "dismissed";

/// All valid suggestion statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NEW, STATUS_REVIEWED, STATUS_ADDED, STATUS_DISMISSED];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid suggestion status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate a submitted book title and return its trimmed form.
///
/// Whitespace-only titles are rejected with the same message the endpoint
/// uses for a missing field.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Book title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A book suggestion as stored in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSuggestion {
    #[serde(rename = "_type")]
    pub doc_type: String,
    pub book_title: String,
    /// RFC 3339 submission timestamp.
    pub submitted_at: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookSuggestion {
    /// Build a new-suggestion document from an already-validated title.
    pub fn new(title: &str, submitted_at: DateTime<Utc>) -> Self {
        Self {
            doc_type: SUGGESTION_DOC_TYPE.to_string(),
            book_title: title.trim().to_string(),
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: STATUS_NEW.to_string(),
            notes: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn all_statuses_are_valid() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok(), "status '{status}'");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(validate_status("archived").is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(validate_title("  The Overstory  ").unwrap(), "The Overstory");
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t ").is_err());
    }

    #[test]
    fn new_documents_carry_type_and_default_status() {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 20, 15, 0).unwrap();
        let doc = BookSuggestion::new(" Piranesi ", at);
        assert_eq!(doc.doc_type, SUGGESTION_DOC_TYPE);
        assert_eq!(doc.book_title, "Piranesi");
        assert_eq!(doc.status, STATUS_NEW);
        assert_eq!(doc.submitted_at, "2026-08-07T20:15:00.000Z");
        assert!(doc.notes.is_none());
    }

    #[test]
    fn document_serializes_with_store_field_names() {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 20, 15, 0).unwrap();
        let json = serde_json::to_value(BookSuggestion::new("Piranesi", at)).unwrap();
        assert_eq!(json["_type"], "bookSuggestion");
        assert_eq!(json["bookTitle"], "Piranesi");
        assert_eq!(json["status"], "new");
        assert!(json["submittedAt"].is_string());
        // Unset notes must not appear in the stored document.
        assert!(json.get("notes").is_none());
    }
}
