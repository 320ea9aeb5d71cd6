pub mod api_client;
pub mod config;
pub mod method;
pub mod model;

pub use api_client::{ApiClientError, ApiErrorKind};
pub use config::ConfigError;
pub use method::MethodParseError;
pub use model::ModelError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] api_client::ApiClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Model(#[from] model::ModelError),
}
