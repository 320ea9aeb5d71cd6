use trello_core::api_client::{RequestContext, RequestObserver, RetryWait};
use trello_core::error::{ApiClientError, ApiErrorKind};
use trello_core::{ClientConfig, ResilientApiClient, RetryPolicy};

use common::HttpStatusCode;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use url::Url;
use wiremock::MockServer;

pub const API_KEY: &str = "abc";
pub const TOKEN: &str = "xyz";

/// Observer that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    pub dispatches: Mutex<Vec<(u32, BTreeMap<String, String>)>>,
    pub retries: Mutex<Vec<RetryWait>>,
    pub authorization_urls: Mutex<Vec<String>>,
    pub challenges: Mutex<Vec<String>>,
    pub failures: Mutex<Vec<(ApiErrorKind, String)>>,
    pub closed: Mutex<bool>,
}

impl RecordingObserver {
    pub fn dispatch_count(&self) -> usize {
        self.dispatches.lock().unwrap().len()
    }

    pub fn retry_delays(&self) -> Vec<Duration> {
        self.retries.lock().unwrap().iter().map(|w| w.delay).collect()
    }

    /// Every string the observer was handed, as a log sink would see it.
    pub fn all_logged_text(&self) -> String {
        let mut text = String::new();
        for (_, params) in self.dispatches.lock().unwrap().iter() {
            text.push_str(&format!("{params:?}\n"));
        }
        for url in self.authorization_urls.lock().unwrap().iter() {
            text.push_str(url);
            text.push('\n');
        }
        for (_, message) in self.failures.lock().unwrap().iter() {
            text.push_str(message);
            text.push('\n');
        }
        text
    }
}

impl RequestObserver for RecordingObserver {
    fn on_dispatch(&self, request: &RequestContext, attempt: u32) {
        self.dispatches
            .lock()
            .unwrap()
            .push((attempt, request.params.clone()));
    }

    fn on_retry(&self, _request: &RequestContext, wait: &RetryWait) {
        self.retries.lock().unwrap().push(*wait);
    }

    fn on_authorization_required(
        &self,
        _request: &RequestContext,
        authorize_url: &Url,
        challenge: Option<&str>,
    ) {
        self.authorization_urls
            .lock()
            .unwrap()
            .push(authorize_url.to_string());
        if let Some(challenge) = challenge {
            self.challenges.lock().unwrap().push(challenge.to_string());
        }
    }

    fn on_success(&self, _request: &RequestContext, _status: HttpStatusCode) {}

    fn on_failure(&self, _request: &RequestContext, error: &ApiClientError) {
        self.failures
            .lock()
            .unwrap()
            .push((error.kind(), error.to_string()));
    }

    fn on_close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

pub fn config_for(server: &MockServer, base_delay: Duration) -> ClientConfig {
    ClientConfig::new(API_KEY, TOKEN)
        .unwrap()
        .with_base_url(&format!("{}/1", server.uri()))
        .unwrap()
        .with_authorize_url(&format!("{}/authorize", server.uri()))
        .unwrap()
        .with_retry_policy(RetryPolicy::new(5, base_delay))
}

pub fn client_for(server: &MockServer) -> (ResilientApiClient, Arc<RecordingObserver>) {
    client_with_delay(server, Duration::from_millis(5))
}

pub fn client_with_delay(
    server: &MockServer,
    base_delay: Duration,
) -> (ResilientApiClient, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let client =
        ResilientApiClient::with_observer(config_for(server, base_delay), observer.clone()).unwrap();
    (client, observer)
}
