//! Normalized errors surfaced by the resilient API client.
//!
//! Key design decisions:
//! - The taxonomy is closed: every failed call ends in exactly one of four kinds
//! - HTTP status codes stored directly (not parsed from strings)
//! - Messages never contain the request URL, because it carries the credentials
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Coarse classification of an [`ApiClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    RateLimited,
    Unauthorized,
    HttpError,
    TransportError,
}

#[derive(Debug, ThisError)]
pub enum ApiClientError {
    #[error("Rate Limited Error: {message} {location}")]
    RateLimited {
        message: String,
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Unauthorized Error: {message} {location}")]
    Unauthorized {
        message: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },
}

impl ApiClientError {
    #[track_caller]
    pub fn rate_limited(endpoint: &str, attempts: u32) -> Self {
        ApiClientError::RateLimited {
            message: format!("Rate limit exceeded while trying to {endpoint} after {attempts} attempts"),
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(endpoint: &str, body: &str) -> Self {
        ApiClientError::Unauthorized {
            message: format!("Failed to {endpoint}: HTTP 401 - {}", describe_body(body)),
            status_code: HttpStatusCode::UNAUTHORIZED,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-success HTTP response.
    #[track_caller]
    pub fn from_http_response(endpoint: &str, status_code: u16, body: &str) -> Self {
        ApiClientError::Http {
            message: format!(
                "Failed to {endpoint}: HTTP {status_code} - {}",
                describe_body(body)
            ),
            status_code: HttpStatusCode(status_code),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error that never produced a usable response.
    #[track_caller]
    pub fn from_reqwest(endpoint: &str, error: reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        ApiClientError::Transport {
            message: format!("Failed to {endpoint}: {}", error.without_url()),
            is_timeout,
            is_connection,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        ApiClientError::Transport {
            message: message.into(),
            is_timeout: false,
            is_connection: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiClientError::RateLimited { .. } => ApiErrorKind::RateLimited,
            ApiClientError::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            ApiClientError::Http { .. } => ApiErrorKind::HttpError,
            ApiClientError::Transport { .. } => ApiErrorKind::TransportError,
        }
    }

    /// Status of the response that caused the failure, if one was received.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ApiClientError::RateLimited { .. } => Some(HttpStatusCode::TOO_MANY_REQUESTS),
            ApiClientError::Unauthorized { status_code, .. }
            | ApiClientError::Http { status_code, .. } => Some(*status_code),
            ApiClientError::Transport { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiClientError::RateLimited { message, .. }
            | ApiClientError::Unauthorized { message, .. }
            | ApiClientError::Http { message, .. }
            | ApiClientError::Transport { message, .. } => message,
        }
    }
}

fn describe_body(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "<empty response body>"
    } else {
        trimmed
    }
}
