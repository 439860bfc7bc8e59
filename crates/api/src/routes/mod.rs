pub mod health;
pub mod library;
pub mod receipts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /library/books            list shelf books (GET)
/// /library/suggestions      submit a book suggestion (POST)
///
/// /receipts                 generate a receipt (POST)
/// /receipts/parse           parse screenshot text into a receipt (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/library", library::router())
        .nest("/receipts", receipts::router())
}
