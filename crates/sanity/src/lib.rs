//! HTTP client for the headless content store (Sanity).
//!
//! Read access (GROQ queries) powers the library shelf; write access
//! (document creation) is used only by the suggestion-submission endpoint
//! and requires a token. Image asset references resolve to CDN URLs via
//! [`image::ImageUrlBuilder`]. The store itself -- schemas, curation,
//! publishing -- is externally owned.

pub mod client;
pub mod error;
pub mod image;
pub mod shelf;
pub mod suggestions;

pub use client::{SanityClient, SanityConfig};
pub use error::SanityError;
pub use image::ImageUrlBuilder;
