pub mod api_client;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod tests;

pub use api_client::{HttpMethod, LogObserver, RequestObserver, ResilientApiClient, RetryPolicy};
pub use config::ClientConfig;
pub use error::CoreError;

pub const TRELLO_API_HOSTNAME: &str = "api.trello.com";
pub const TRELLO_API_VERSION: &str = "1";
pub const TRELLO_API_BASE_URL: &str =
    const_format::concatcp!("https://", TRELLO_API_HOSTNAME, "/", TRELLO_API_VERSION);
pub const TRELLO_AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
