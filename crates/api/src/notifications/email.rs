//! Email notification delivery via the transactional email HTTP API.
//!
//! [`EmailClient`] sends the curator an HTML notification whenever a book
//! suggestion is submitted. Configuration is loaded from environment
//! variables; if `RESEND_API_KEY` or `SUGGESTION_NOTIFY_EMAIL` is not set,
//! [`EmailConfig::from_env`] returns `None` and no client should be
//! constructed. Delivery is fire-and-forget from the endpoint's point of
//! view: failures are logged and never fail the submission.

use serde::Deserialize;
use serde_json::json;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Transport-level failure (connection, body decoding).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery API answered with a non-success status.
    #[error("Email API error ({status}): {message}")]
    Api { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default delivery API base URL.
const DEFAULT_EMAIL_API_BASE: &str = "https://api.resend.com";

/// Default sender when `EMAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "Library <onboarding@resend.dev>";

/// Configuration for the email delivery client.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// API key for the delivery service.
    pub api_key: String,
    /// API base URL (overridden in tests).
    pub base_url: String,
    /// RFC 5322 "From" value.
    pub from_address: String,
    /// Curator address that receives suggestion notifications.
    pub to_address: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both required variables are set, signalling
    /// that email delivery is not configured and should be skipped.
    ///
    /// | Variable                  | Required | Default                          |
    /// |---------------------------|----------|----------------------------------|
    /// | `RESEND_API_KEY`          | yes      | —                                |
    /// | `SUGGESTION_NOTIFY_EMAIL` | yes      | —                                |
    /// | `RESEND_BASE_URL`         | no       | `https://api.resend.com`         |
    /// | `EMAIL_FROM`              | no       | `Library <onboarding@resend.dev>`|
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY").ok()?;
        let to_address = std::env::var("SUGGESTION_NOTIFY_EMAIL").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_EMAIL_API_BASE.to_string()),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            to_address,
        })
    }
}

// ---------------------------------------------------------------------------
// EmailClient
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends suggestion notification emails through the delivery API.
pub struct EmailClient {
    config: EmailConfig,
    http: reqwest::Client,
}

impl EmailClient {
    /// Create a new email client with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Send the "new book suggestion" notification and return the delivery
    /// id assigned by the API.
    pub async fn send_suggestion_notification(
        &self,
        book_title: &str,
    ) -> Result<String, EmailError> {
        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "from": self.config.from_address,
            "to": [self.config.to_address],
            "subject": format!("New Book Suggestion: {book_title}"),
            "html": suggestion_email_html(book_title),
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response.json().await?;
        tracing::info!(email_id = %sent.id, "Suggestion notification email sent");
        Ok(sent.id)
    }
}

/// HTML body of the suggestion notification.
fn suggestion_email_html(book_title: &str) -> String {
    format!(
        r#"
        <div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
          <h2 style="color: #333; margin-bottom: 16px;">New Book Suggestion!</h2>
          <p style="color: #666; font-size: 16px; line-height: 1.5;">
            Someone suggested a new book for your library:
          </p>
          <div style="background: #f5f5f5; border-radius: 8px; padding: 16px; margin: 16px 0;">
            <p style="color: #333; font-size: 18px; font-weight: 500; margin: 0;">
              "{book_title}"
            </p>
          </div>
          <p style="color: #999; font-size: 14px; margin-top: 24px;">
            Submitted via liumichelle.com/library
          </p>
        </div>
      "#
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
