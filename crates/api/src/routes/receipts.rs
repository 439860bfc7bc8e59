//! Route definitions for screen-time receipts.
//!
//! Mounted at `/receipts` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::receipts;
use crate::state::AppState;

/// Receipt routes.
///
/// ```text
/// POST   /                  -> create_receipt
/// POST   /parse             -> parse_receipt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(receipts::create_receipt))
        .route("/parse", post(receipts::parse_receipt))
}
