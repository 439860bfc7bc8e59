use std::sync::Arc;

use tokio::sync::Mutex;

use folio_icons::{IconCache, IconClient};
use folio_sanity::{ImageUrlBuilder, SanityClient};

use crate::config::ServerConfig;
use crate::notifications::EmailClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Optional members
/// model services that may be unconfigured: without a mailer the suggestion
/// endpoint skips notification, without an icon client parsed receipts keep
/// their bundled icon keys.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Content-store client (reads always; writes when a token is set).
    pub sanity: Arc<SanityClient>,
    /// CDN image URL builder for cover art.
    pub images: Arc<ImageUrlBuilder>,
    /// Notification email delivery, if configured.
    pub mailer: Option<Arc<EmailClient>>,
    /// App-icon lookup service, if enabled.
    pub icons: Option<Arc<IconClient>>,
    /// Process-scoped artwork cache, at most one lookup per app name.
    pub icon_cache: Arc<Mutex<IconCache>>,
}
