use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// A successful response whose body does not match the typed model.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Decode Error: could not read {model} from response: {message} {location}")]
    Decode {
        model: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub fn decode(model: &'static str, error: serde_json::Error) -> Self {
        ModelError::Decode {
            model,
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
