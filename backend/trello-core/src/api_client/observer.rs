//! Per-call log events emitted by the client.
//!
//! The client never talks to a logger directly; it reports to the
//! [`RequestObserver`] it was built with. Every event carries a
//! [`RequestContext`] whose parameters are already redacted.

use super::HttpMethod;
use super::retry::{DelaySource, RetryWait};
use crate::error::ApiClientError;

use common::HttpStatusCode;

use std::collections::BTreeMap;

use log::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

/// Describes one logical call for logging purposes.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Shared by every attempt of the same call.
    pub call_id: Uuid,
    pub method: HttpMethod,
    pub path: String,
    /// Query parameters with credentials already masked.
    pub params: BTreeMap<String, String>,
}

impl RequestContext {
    /// "get /boards/123", used in failure messages.
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method.verb_phrase(), self.path)
    }

    pub fn params_display(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

pub trait RequestObserver: Send + Sync {
    /// An attempt is about to be sent.
    fn on_dispatch(&self, request: &RequestContext, attempt: u32);

    /// The call was rate limited and will be retried after `wait`.
    fn on_retry(&self, request: &RequestContext, wait: &RetryWait);

    /// A 401 was received; `authorize_url` lets a user mint a new token.
    fn on_authorization_required(
        &self,
        request: &RequestContext,
        authorize_url: &Url,
        challenge: Option<&str>,
    );

    fn on_success(&self, request: &RequestContext, status: HttpStatusCode);

    /// The call failed for good.
    fn on_failure(&self, request: &RequestContext, error: &ApiClientError);

    fn on_close(&self) {}
}

/// Forwards client events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RequestObserver for LogObserver {
    fn on_dispatch(&self, request: &RequestContext, attempt: u32) {
        info!(
            "[{}] {} {} (attempt {}) params: {}",
            request.call_id,
            request.method,
            request.path,
            attempt + 1,
            request.params_display()
        );
    }

    fn on_retry(&self, request: &RequestContext, wait: &RetryWait) {
        let reason = match wait.source {
            DelaySource::RetryAfter => "Retry-After header",
            DelaySource::Backoff => "exponential backoff",
        };
        warn!(
            "[{}] Rate limited on {} {}, retrying in {:?} ({reason}, attempt {})",
            request.call_id,
            request.method,
            request.path,
            wait.delay,
            wait.attempt + 1
        );
    }

    fn on_authorization_required(
        &self,
        request: &RequestContext,
        authorize_url: &Url,
        challenge: Option<&str>,
    ) {
        if let Some(challenge) = challenge {
            debug!("[{}] WWW-Authenticate: {challenge}", request.call_id);
        }
        info!(
            "[{}] Unauthorized on {} {}. Authorize a new token at: {authorize_url}",
            request.call_id, request.method, request.path
        );
    }

    fn on_success(&self, request: &RequestContext, status: HttpStatusCode) {
        debug!(
            "[{}] {} {} succeeded with HTTP {status}",
            request.call_id, request.method, request.path
        );
    }

    fn on_failure(&self, request: &RequestContext, error: &ApiClientError) {
        error!(
            "[{}] {} {} failed (params: {}): {error}",
            request.call_id,
            request.method,
            request.path,
            request.params_display()
        );
    }

    fn on_close(&self) {
        info!("Trello API client closed");
    }
}
