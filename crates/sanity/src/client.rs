//! Content-store HTTP client.
//!
//! [`SanityClient`] holds the project coordinates and an HTTP client, and
//! exposes the two operations this system needs: GROQ queries (read) and
//! single-document create mutations (write). Queries go through the CDN
//! host when enabled; mutations always hit the live API host and require a
//! token.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SanityError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default content-store project id.
const DEFAULT_PROJECT_ID: &str = "am3v0x1c";
/// Default dataset.
const DEFAULT_DATASET: &str = "production";
/// Default API version date.
const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Configuration for the content-store client.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Project identifier (subdomain of the API hosts).
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// Versioned API date (`v<date>` path segment).
    pub api_version: String,
    /// Route read queries through the CDN host for cacheability.
    pub use_cdn: bool,
    /// Write token; absent means the suggestion endpoint cannot persist.
    pub token: Option<String>,
    /// Full base URL override (tests point this at a local mock server).
    pub base_url: Option<String>,
}

impl SanityConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default        |
    /// |----------------------|----------------|
    /// | `SANITY_PROJECT_ID`  | `am3v0x1c`     |
    /// | `SANITY_DATASET`     | `production`   |
    /// | `SANITY_API_VERSION` | `2024-01-01`   |
    /// | `SANITY_USE_CDN`     | `true`         |
    /// | `SANITY_WRITE_TOKEN` | —              |
    /// | `SANITY_BASE_URL`    | —              |
    pub fn from_env() -> Self {
        Self {
            project_id: std::env::var("SANITY_PROJECT_ID")
                .unwrap_or_else(|_| DEFAULT_PROJECT_ID.into()),
            dataset: std::env::var("SANITY_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.into()),
            api_version: std::env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.into()),
            use_cdn: std::env::var("SANITY_USE_CDN")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            token: std::env::var("SANITY_WRITE_TOKEN").ok(),
            base_url: std::env::var("SANITY_BASE_URL").ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Vec<T>,
}

#[derive(Serialize)]
struct MutationRequest<'a, T: Serialize> {
    mutations: [CreateMutation<'a, T>; 1],
}

#[derive(Serialize)]
struct CreateMutation<'a, T: Serialize> {
    create: &'a T,
}

#[derive(Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Deserialize)]
struct MutateResult {
    id: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for one content-store project/dataset pair.
pub struct SanityClient {
    config: SanityConfig,
    http: reqwest::Client,
}

impl SanityClient {
    /// Create a client for the given configuration.
    pub fn new(config: SanityConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Whether a write token is configured.
    pub fn can_write(&self) -> bool {
        self.config.token.is_some()
    }

    fn endpoint(&self, action: &str, use_cdn: bool) -> String {
        let SanityConfig {
            project_id,
            dataset,
            api_version,
            ..
        } = &self.config;

        match &self.config.base_url {
            Some(base) => format!(
                "{}/v{}/data/{}/{}",
                base.trim_end_matches('/'),
                api_version,
                action,
                dataset
            ),
            None => {
                let host = if use_cdn { "apicdn.sanity.io" } else { "api.sanity.io" };
                format!("https://{project_id}.{host}/v{api_version}/data/{action}/{dataset}")
            }
        }
    }

    /// Run a GROQ query and return the unwrapped result array.
    pub async fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<Vec<T>, SanityError> {
        let url = self.endpoint("query", self.config.use_cdn);
        let response = self.http.get(&url).query(&[("query", groq)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SanityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: QueryResponse<T> = response.json().await?;
        tracing::debug!(count = envelope.result.len(), "Content store query completed");
        Ok(envelope.result)
    }

    /// Create a document and return its id.
    ///
    /// Mutations bypass the CDN host and authenticate with the write token;
    /// a missing token is reported without touching the network.
    pub async fn create<T: Serialize>(&self, document: &T) -> Result<String, SanityError> {
        let token = self.config.token.as_deref().ok_or(SanityError::MissingToken)?;

        let url = self.endpoint("mutate", false);
        let body = MutationRequest {
            mutations: [CreateMutation { create: document }],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("returnIds", "true")])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SanityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let outcome: MutateResponse = response.json().await?;
        let id = outcome
            .results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or(SanityError::MissingDocumentId)?;

        tracing::info!(document_id = %id, "Content store document created");
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token: None,
            base_url: None,
        }
    }

    #[test]
    fn query_endpoint_uses_the_cdn_host() {
        let client = SanityClient::new(test_config());
        assert_eq!(
            client.endpoint("query", true),
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn mutate_endpoint_uses_the_live_host() {
        let client = SanityClient::new(test_config());
        assert_eq!(
            client.endpoint("mutate", false),
            "https://abc123.api.sanity.io/v2024-01-01/data/mutate/production"
        );
    }

    #[test]
    fn base_url_override_wins_and_tolerates_trailing_slash() {
        let mut config = test_config();
        config.base_url = Some("http://127.0.0.1:9999/".to_string());
        let client = SanityClient::new(config);
        assert_eq!(
            client.endpoint("query", true),
            "http://127.0.0.1:9999/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn mutation_body_wraps_the_document_in_a_create() {
        let body = MutationRequest {
            mutations: [CreateMutation {
                create: &serde_json::json!({ "_type": "bookSuggestion", "bookTitle": "Piranesi" }),
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["mutations"][0]["create"]["bookTitle"], "Piranesi");
    }

    #[tokio::test]
    async fn create_without_token_fails_before_any_io() {
        let client = SanityClient::new(test_config());
        let result = client.create(&serde_json::json!({ "_type": "x" })).await;
        assert!(matches!(result, Err(SanityError::MissingToken)));
    }
}
