//! Client configuration loaded from the environment.
//!
//! # Features
//! - Loads .env from cwd or executable directory
//! - Mandatory `TRELLO_API_KEY` / `TRELLO_TOKEN`, optional `TRELLO_API_BASE_URL`
//! - Credentials held in `RedactedSecret` (safe Debug impl, zeroized on drop)
//! - Parsing decoupled from `std::env` through [`ClientConfig::from_lookup`]

use crate::api_client::RetryPolicy;
use crate::error::ConfigError;
use crate::{TRELLO_API_BASE_URL, TRELLO_AUTHORIZE_URL};

use common::RedactedSecret;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

pub const TRELLO_API_KEY_ENV: &str = "TRELLO_API_KEY";
pub const TRELLO_TOKEN_ENV: &str = "TRELLO_TOKEN";
pub const TRELLO_API_BASE_URL_ENV: &str = "TRELLO_API_BASE_URL";

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Immutable settings for one [`ResilientApiClient`](crate::ResilientApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: RedactedSecret,
    token: RedactedSecret,
    base_url: Url,
    authorize_url: Url,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ClientConfig {
    /// Build a config pointing at the public Trello API.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVariable`] if either credential is blank.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = RedactedSecret::new(api_key);
        let token = RedactedSecret::new(token);

        if api_key.is_empty() {
            return Err(ConfigError::missing(TRELLO_API_KEY_ENV));
        }
        if token.is_empty() {
            return Err(ConfigError::missing(TRELLO_TOKEN_ENV));
        }

        Ok(Self {
            api_key,
            token,
            base_url: parse_base(TRELLO_API_BASE_URL_ENV, TRELLO_API_BASE_URL)?,
            authorize_url: parse_base("authorize_url", TRELLO_AUTHORIZE_URL)?,
            timeout: DEFAULT_TIMEOUT_DURATION,
            retry: RetryPolicy::default(),
        })
    }

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if try_load_dotenv().is_none() {
            debug!("No .env file found - will check existing environment variables");
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any name -> value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(TRELLO_API_KEY_ENV).ok_or_else(|| ConfigError::missing(TRELLO_API_KEY_ENV))?;
        let token = lookup(TRELLO_TOKEN_ENV).ok_or_else(|| ConfigError::missing(TRELLO_TOKEN_ENV))?;

        let config = Self::new(api_key, token)?;

        let config = match lookup(TRELLO_API_BASE_URL_ENV) {
            Some(base_url) if !base_url.trim().is_empty() => {
                info!("Using API base URL override from {TRELLO_API_BASE_URL_ENV}");
                config.with_base_url(base_url.trim())?
            }
            _ => config,
        };

        info!(
            "Trello credentials loaded (key {} chars, token {} chars)",
            config.api_key.len(),
            config.token.len()
        );

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base(TRELLO_API_BASE_URL_ENV, base_url)?;
        Ok(self)
    }

    pub fn with_authorize_url(mut self, authorize_url: &str) -> Result<Self, ConfigError> {
        self.authorize_url = parse_base("authorize_url", authorize_url)?;
        Ok(self)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &RedactedSecret {
        &self.api_key
    }

    pub fn token(&self) -> &RedactedSecret {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}

fn parse_base(name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::invalid(name, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid(name, format!("'{value}' cannot be used as a base URL")));
    }
    Ok(url)
}

/// Attempts to load .env from known locations, returning the file that was read.
pub fn try_load_dotenv() -> Option<PathBuf> {
    // Try current directory first
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    // Try executable directory
    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                match dotenvy::from_path(&env_path) {
                    Ok(_) => {
                        info!("Loaded .env from: {:?}", env_path);
                        return Some(env_path);
                    }
                    Err(e) => {
                        warn!("Failed to parse .env at {:?}: {}", env_path, e);
                    }
                }
            }
        }
    }

    None
}
