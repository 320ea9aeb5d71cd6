use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Missing Variable Error: {name} must be set in the environment {location}")]
    MissingVariable {
        name: String,
        location: ErrorLocation,
    },

    #[error("Invalid Value Error: {name}: {message} {location}")]
    InvalidValue {
        name: String,
        message: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn missing(name: impl Into<String>) -> Self {
        ConfigError::MissingVariable {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
