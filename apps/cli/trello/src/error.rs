use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;
use trello_core::CoreError;
use trello_core::error::{ApiClientError, ConfigError};

/// Errors surfaced to the user by the `trello` binary.
#[derive(Debug, Error)]
pub enum TrelloCliError {
    /// Error from this App (logging, output, filesystem)
    #[error("Trello CLI Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Error from trello-core (configuration, API calls, decoding)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl TrelloCliError {
    #[track_caller]
    pub fn cli(message: impl Into<String>) -> Self {
        TrelloCliError::Cli {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for TrelloCliError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        TrelloCliError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for TrelloCliError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        TrelloCliError::from(CoreError::from(error))
    }
}

impl From<ApiClientError> for TrelloCliError {
    #[track_caller]
    fn from(error: ApiClientError) -> Self {
        TrelloCliError::from(CoreError::from(error))
    }
}

impl From<serde_json::Error> for TrelloCliError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        TrelloCliError::Cli {
            message: format!("Failed to encode output: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
