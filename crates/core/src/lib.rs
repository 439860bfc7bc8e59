//! Folio core domain logic.
//!
//! Pure, I/O-free building blocks shared by the API service: the screen-time
//! receipt data model and generator, duration/date display formatting, the
//! usage recommendation engine, the OCR text parser with its known-app
//! tables, screenshot plausibility heuristics, and book suggestion
//! validation. Anything that talks to the network lives in the sibling
//! crates (`folio-sanity`, `folio-icons`, `folio-api`).

pub mod apps;
pub mod error;
pub mod ocr;
pub mod receipt;
pub mod recommend;
pub mod suggestion;
pub mod timefmt;
