//! Route definitions for the library shelf.
//!
//! Mounted at `/library` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::library;
use crate::state::AppState;

/// Library routes.
///
/// ```text
/// GET    /books             -> list_books
/// POST   /suggestions       -> submit_suggestion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(library::list_books))
        .route("/suggestions", post(library::submit_suggestion))
}
