//! Outbound notification delivery.

pub mod email;

pub use email::{EmailClient, EmailConfig, EmailError};
