//! Resilient client for the Trello REST API.
//!
//! Wraps a single pooled `reqwest::Client` and adds:
//! - Credential injection as `key`/`token` query parameters
//! - Retry with backoff on HTTP 429, and nothing else
//! - An authorization hint on HTTP 401
//! - Normalized errors ([`ApiClientError`]) and redacted log events

pub mod authorize;
pub mod method;
pub mod observer;
pub mod retry;

pub use authorize::authorization_url;
pub use method::HttpMethod;
pub use observer::{LogObserver, RequestContext, RequestObserver};
pub use retry::{RetryPolicy, RetryWait};

use crate::config::ClientConfig;
use crate::error::ApiClientError;

use retry::{AttemptFailure, RetryError, parse_retry_after};

use common::{HttpStatusCode, redact_params};

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Client;
use reqwest::header::WWW_AUTHENTICATE;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

pub const API_KEY_PARAM: &str = "key";
pub const TOKEN_PARAM: &str = "token";

/// Caller-supplied query parameters.
pub type QueryParams = BTreeMap<String, String>;

pub struct ResilientApiClient {
    config: ClientConfig,
    http: Client,
    observer: Arc<dyn RequestObserver>,
}

impl ResilientApiClient {
    /// Client that reports through the `log` facade.
    pub fn new(config: ClientConfig) -> Result<Self, ApiClientError> {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    pub fn with_observer(
        config: ClientConfig,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self, ApiClientError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiClientError::from_reqwest("build the HTTP transport", e))?;

        Ok(Self {
            config,
            http,
            observer,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get(&self, path: &str, query: Option<&QueryParams>) -> Result<Value, ApiClientError> {
        self.request(HttpMethod::Get, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiClientError> {
        self.request(HttpMethod::Post, path, None, body).await
    }

    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiClientError> {
        self.request(HttpMethod::Put, path, None, body).await
    }

    pub async fn delete(&self, path: &str, query: Option<&QueryParams>) -> Result<Value, ApiClientError> {
        self.request(HttpMethod::Delete, path, query, None).await
    }

    /// Perform one logical call, retrying only while the API answers 429.
    ///
    /// `path` is relative to the configured base URL. `body` is sent for POST
    /// and PUT and ignored otherwise. On success the JSON body is returned
    /// untouched (an empty body becomes `null`).
    ///
    /// # Errors
    /// One of the four [`ApiClientError`] kinds; see [`ApiClientError::kind`].
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> Result<Value, ApiClientError> {
        let params = self.build_params(query);

        let context = RequestContext {
            call_id: Uuid::new_v4(),
            method,
            path: path.to_string(),
            params: redact_params(&params),
        };

        let url = match self.build_url(path, &params) {
            Ok(url) => url,
            Err(e) => {
                self.observer.on_failure(&context, &e);
                return Err(e);
            }
        };

        let body = body.filter(|_| method.carries_body());

        let context_ref = &context;
        let url_ref = &url;
        let observer = &self.observer;

        let result = self
            .config
            .retry_policy()
            .execute(
                move |attempt| self.attempt(context_ref, url_ref, body, attempt),
                move |wait| {
                    observer.on_retry(context_ref, &wait);
                    tokio::time::sleep(wait.delay)
                },
            )
            .await;

        match result {
            Ok(value) => Ok(value),
            Err(RetryError::Exhausted { attempts }) => {
                let error = ApiClientError::rate_limited(&context.endpoint(), attempts);
                self.observer.on_failure(&context, &error);
                Err(error)
            }
            Err(RetryError::Fatal(error)) => {
                self.observer.on_failure(&context, &error);
                Err(error)
            }
        }
    }

    /// Release the pooled transport. Consumes the client so no call can follow.
    pub fn close(self) {
        self.observer.on_close();
        drop(self.http);
    }

    async fn attempt(
        &self,
        context: &RequestContext,
        url: &Url,
        body: Option<&Value>,
        attempt: u32,
    ) -> Result<Value, AttemptFailure> {
        self.observer.on_dispatch(context, attempt);

        let endpoint = context.endpoint();

        let mut request = self.http.request(context.method.as_reqwest(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AttemptFailure::Fatal(ApiClientError::from_reqwest(&endpoint, e)))?;

        let status = HttpStatusCode(response.status().as_u16());

        if status.is_retryable() {
            return Err(AttemptFailure::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }

        if status.is_unauthorized() {
            let challenge = response
                .headers()
                .get(WWW_AUTHENTICATE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let hint = authorization_url(self.config.authorize_url(), self.config.api_key());
            self.observer
                .on_authorization_required(context, &hint, challenge.as_deref());

            let text = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::Fatal(ApiClientError::unauthorized(
                &endpoint, &text,
            )));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AttemptFailure::Fatal(ApiClientError::from_http_response(
                &endpoint, status.0, &text,
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AttemptFailure::Fatal(ApiClientError::from_reqwest(&endpoint, e)))?;

        self.observer.on_success(context, status);

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            AttemptFailure::Fatal(ApiClientError::from_http_response(
                &endpoint,
                status.0,
                &format!("response body is not valid JSON: {e}"),
            ))
        })
    }

    /// Caller parameters first, credentials last so they can never be shadowed.
    fn build_params(&self, query: Option<&QueryParams>) -> QueryParams {
        let mut params = query.cloned().unwrap_or_default();
        params.insert(
            API_KEY_PARAM.to_string(),
            self.config.api_key().expose().to_string(),
        );
        params.insert(
            TOKEN_PARAM.to_string(),
            self.config.token().expose().to_string(),
        );
        params
    }

    fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url, ApiClientError> {
        let mut url = self.config.base_url().clone();

        url.path_segments_mut()
            .map_err(|_| ApiClientError::transport("configured base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}
