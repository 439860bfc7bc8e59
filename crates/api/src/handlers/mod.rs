//! Request handlers.
//!
//! Each submodule provides async handler functions for one concern.
//! Handlers delegate to `folio_core` for domain logic and to the client
//! crates for I/O, and map errors via [`crate::error::AppError`].

pub mod library;
pub mod receipts;
