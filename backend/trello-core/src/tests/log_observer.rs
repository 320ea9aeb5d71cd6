// Unit tests for the log lines the default observer writes.
// A capturing logger is installed once for this test binary; each test only
// inspects records from this crate that mention its own request path.

use crate::api_client::QueryParams;
use crate::{ClientConfig, ResilientApiClient, RetryPolicy};

use common::REDACTED_MARKER;

use std::sync::{Mutex, Once};
use std::time::Duration;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "abc";
const TOKEN: &str = "xyz-secret-token";

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    // Transport crates log full request URLs; only this crate's records matter here
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("trello_core")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

static INSTALL: Once = Once::new();

fn install_capture() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger in the unit test binary");
        log::set_max_level(LevelFilter::Trace);
    });
}

fn lines_mentioning(needle: &str) -> Vec<(Level, String)> {
    CAPTURE
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, message)| message.contains(needle))
        .cloned()
        .collect()
}

fn at_level(lines: &[(Level, String)], level: Level) -> Vec<&str> {
    lines
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, message)| message.as_str())
        .collect()
}

fn log_client(server: &MockServer) -> ResilientApiClient {
    let config = ClientConfig::new(API_KEY, TOKEN)
        .unwrap()
        .with_base_url(&format!("{}/1", server.uri()))
        .unwrap()
        .with_retry_policy(RetryPolicy::new(5, Duration::from_millis(1)));
    ResilientApiClient::new(config).unwrap()
}

/// **VALUE**: A call that stays rate limited logs each attempt, each retry and
/// the final failure at the right levels, with credentials masked.
///
/// **BUG THIS CATCHES**: Would catch a swapped log level, or `params_display`
/// printing the raw query instead of the redacted copy.
#[tokio::test]
async fn given_persistent_rate_limit_when_logged_then_levels_match_and_credentials_masked() {
    // GIVEN: An endpoint that always answers 429 and the default observer
    install_capture();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/log-rate-limited"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let client = log_client(&server);
    let query = QueryParams::from([("other".to_string(), "v".to_string())]);

    // WHEN: The call exhausts its attempts
    let result = client.get("/boards/log-rate-limited", Some(&query)).await;

    // THEN: Five info dispatches, four warn retries, one error
    assert!(result.is_err());
    let lines = lines_mentioning("/boards/log-rate-limited");

    let dispatches = at_level(&lines, Level::Info);
    assert_eq!(dispatches.len(), 5, "{lines:?}");
    for line in &dispatches {
        assert!(line.contains(&format!("key={REDACTED_MARKER}")), "{line}");
        assert!(line.contains(&format!("token={REDACTED_MARKER}")), "{line}");
        assert!(line.contains("other=v"), "{line}");
    }

    let retries = at_level(&lines, Level::Warn);
    assert_eq!(retries.len(), 4, "{lines:?}");
    assert!(retries.iter().all(|line| line.contains("Rate limited")));

    let failures = at_level(&lines, Level::Error);
    assert_eq!(failures.len(), 1, "{lines:?}");
    assert!(failures[0].contains("Rate limit exceeded"), "{}", failures[0]);
    assert!(failures[0].contains(&format!("token={REDACTED_MARKER}")));

    assert!(lines.iter().all(|(_, line)| !line.contains(TOKEN)));
    assert!(lines.iter().all(|(_, line)| !line.contains("key=abc")));
}

/// **VALUE**: A 401 logs an authorization URL a user can open, carrying the
/// API key but never the token.
///
/// **BUG THIS CATCHES**: Would catch the hint being dropped, logged at the
/// wrong level, or built from the token.
#[tokio::test]
async fn given_unauthorized_when_logged_then_authorize_url_has_key_and_no_token() {
    // GIVEN: An endpoint that rejects the token
    install_capture();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/log-unauthorized"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", "OAuth realm=\"trello\"")
                .set_body_string("invalid token"),
        )
        .mount(&server)
        .await;
    let client = log_client(&server);

    // WHEN: Calling it once
    let result = client.get("/boards/log-unauthorized", None).await;

    // THEN: Dispatch and hint at info, failure at error
    assert!(result.is_err());
    let lines = lines_mentioning("/boards/log-unauthorized");

    let infos = at_level(&lines, Level::Info);
    assert_eq!(infos.len(), 2, "{lines:?}");
    let hint = infos
        .iter()
        .find(|line| line.contains("Authorize a new token at:"))
        .expect("authorization hint logged at info");
    assert!(hint.contains("https://trello.com/1/authorize"), "{hint}");
    assert!(hint.contains("key=abc"), "{hint}");
    assert!(hint.contains("response_type=token"), "{hint}");

    assert!(at_level(&lines, Level::Warn).is_empty());
    assert_eq!(at_level(&lines, Level::Error).len(), 1, "{lines:?}");

    assert!(lines.iter().all(|(_, line)| !line.contains(TOKEN)));
}
