use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MethodParseError {
    #[error("Unsupported Method Error: '{method}' is not one of GET, POST, PUT, DELETE {location}")]
    Unsupported {
        method: String,
        location: ErrorLocation,
    },
}
