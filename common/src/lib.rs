//! Shared building blocks for the Trello workspace.
//!
//! This crate holds the small, dependency-light pieces that every other
//! crate needs: error locations, HTTP status classification and the
//! handling of credentials that must never reach a log sink.
//!
//! ## Architecture
//!
//! - **common** (this crate): Error plumbing, secrets, redaction
//! - **trello-core**: Resilient API client and typed board services
//! - **trello**: Command line application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;
pub mod redaction;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
pub use redaction::{REDACTED_MARKER, SENSITIVE_PARAMS, redact_params};
