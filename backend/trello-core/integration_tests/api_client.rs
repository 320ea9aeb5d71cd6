use crate::helpers::{API_KEY, TOKEN, client_for};

use trello_core::api_client::QueryParams;
use trello_core::api_client::retry::DelaySource;
use trello_core::error::ApiErrorKind;
use trello_core::{ClientConfig, HttpMethod, ResilientApiClient};

use common::{HttpStatusCode, REDACTED_MARKER};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A 2xx body comes back exactly as the API sent it.
///
/// **BUG THIS CATCHES**: Would catch field filtering or reshaping in the client.
#[tokio::test]
async fn given_success_response_when_getting_then_returns_body_verbatim() {
    // GIVEN: A board endpoint that checks credentials
    let server = MockServer::start().await;
    let board = json!({ "id": "b1", "name": "Roadmap", "prefs": { "background": "blue" } });
    Mock::given(method("GET"))
        .and(path("/1/boards/b1"))
        .and(query_param("key", API_KEY))
        .and(query_param("token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(board.clone()))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    // WHEN: Fetching the board
    let result = client.get("/boards/b1", None).await.unwrap();

    // THEN: Same JSON, one dispatch
    assert_eq!(result, board);
    assert_eq!(observer.dispatch_count(), 1);
}

/// **VALUE**: Logged parameters are redacted while the wire still carries real credentials.
///
/// **BUG THIS CATCHES**: Would catch redaction mutating the outgoing mapping, or
/// credentials reaching a log sink.
#[tokio::test]
async fn given_query_params_when_requesting_then_logs_redacted_copy_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/search"))
        .and(query_param("key", "abc"))
        .and(query_param("token", "xyz"))
        .and(query_param("other", "v"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);
    let query = QueryParams::from([("other".to_string(), "v".to_string())]);

    client.get("/search", Some(&query)).await.unwrap();

    let dispatches = observer.dispatches.lock().unwrap();
    let (_, logged) = &dispatches[0];
    assert_eq!(logged["key"], REDACTED_MARKER);
    assert_eq!(logged["token"], REDACTED_MARKER);
    assert_eq!(logged["other"], "v");
}

/// **VALUE**: Configured credentials always win over caller-supplied ones.
#[tokio::test]
async fn given_caller_credentials_when_requesting_then_configured_ones_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/1/cards/c1"))
        .and(query_param("key", API_KEY))
        .and(query_param("token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_value": null })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);
    let query = QueryParams::from([
        ("key".to_string(), "attacker-key".to_string()),
        ("token".to_string(), "attacker-token".to_string()),
    ]);

    let result = client.delete("/cards/c1", Some(&query)).await;

    assert!(result.is_ok());
    let requests = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    let values_of = |name: &str| -> Vec<&str> {
        pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    };
    assert_eq!(values_of("key"), vec![API_KEY]);
    assert_eq!(values_of("token"), vec![TOKEN]);
    assert!(!requests[0].url.as_str().contains("attacker"));
}

#[tokio::test]
async fn given_post_with_body_when_requesting_then_sends_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .and(body_json(json!({ "name": "Todo", "idBoard": "b1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l1" })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let body = json!({ "name": "Todo", "idBoard": "b1" });
    let result = client.post("/lists", Some(&body)).await.unwrap();

    assert_eq!(result["id"], "l1");
}

#[tokio::test]
async fn given_empty_success_body_when_requesting_then_returns_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/cards/c1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let result = client
        .request(HttpMethod::Put, "/cards/c1", None, Some(&json!({ "name": "x" })))
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
}

/// **VALUE**: Five 429s end the call as RateLimited with no sixth request.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one that sends a sixth request or
/// gives up after four.
#[tokio::test]
async fn given_persistent_rate_limit_when_requesting_then_fails_after_five_attempts() {
    // GIVEN: An endpoint that always answers 429 without Retry-After
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/b1"))
        .respond_with(ResponseTemplate::new(429))
        .expect(5)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    // WHEN: Requesting
    let err = client.get("/boards/b1", None).await.unwrap_err();

    // THEN: RateLimited, five dispatches, exponential waits between them
    assert_eq!(err.kind(), ApiErrorKind::RateLimited);
    assert!(err.message().contains("Rate limit exceeded"));
    assert_eq!(observer.dispatch_count(), 5);
    assert_eq!(
        observer.retry_delays(),
        vec![
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(40),
        ]
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

/// **VALUE**: Retry-After is honoured and the call recovers once the limit lifts.
#[tokio::test]
async fn given_rate_limit_with_retry_after_when_requesting_then_waits_header_value_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/lists/l1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l1" })))
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let result = client.get("/lists/l1", None).await.unwrap();

    assert_eq!(result["id"], "l1");
    let retries = observer.retries.lock().unwrap();
    assert_eq!(retries.len(), 2);
    assert!(retries.iter().all(|w| w.delay == Duration::ZERO));
    assert!(retries.iter().all(|w| w.source == DelaySource::RetryAfter));
}

#[tokio::test]
async fn given_unparseable_retry_after_when_requesting_then_falls_back_to_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/lists/l1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "soon"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "l1" })))
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    client.get("/lists/l1", None).await.unwrap();

    let retries = observer.retries.lock().unwrap();
    assert_eq!(retries[0].source, DelaySource::Backoff);
    assert_eq!(retries[0].delay, Duration::from_millis(5));
}

/// **VALUE**: A 401 is not retried and surfaces a re-authorization URL with the key only.
///
/// **BUG THIS CATCHES**: Would catch the token leaking into the hint, or 401 entering
/// the retry loop.
#[tokio::test]
async fn given_unauthorized_when_requesting_then_logs_authorization_url_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me/boards"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("WWW-Authenticate", "OAuth realm=\"trello\"")
                .set_body_string("invalid token"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let err = client.get("/members/me/boards", None).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Unauthorized);
    assert_eq!(err.status(), Some(HttpStatusCode(401)));
    let urls = observer.authorization_urls.lock().unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("key=abc"));
    assert!(urls[0].contains("response_type=token"));
    assert!(urls[0].contains("expiration=never"));
    assert!(!urls[0].contains(TOKEN));
    assert_eq!(observer.challenges.lock().unwrap()[0], "OAuth realm=\"trello\"");
    assert_eq!(observer.dispatch_count(), 1);
}

/// **VALUE**: Server errors fail immediately with the status preserved.
#[tokio::test]
async fn given_server_error_when_requesting_then_fails_once_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/cards/c1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let err = client.get("/cards/c1", None).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::HttpError);
    assert_eq!(err.status(), Some(HttpStatusCode(500)));
    assert!(err.message().contains("Failed to get /cards/c1"));
    assert!(err.message().contains("Internal Server Error"));
    assert_eq!(observer.dispatch_count(), 1);
    assert!(observer.retries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_not_found_when_requesting_then_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/checklists/x"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let err = client.put("/checklists/x", Some(&json!({}))).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::HttpError);
    assert_eq!(err.status(), Some(HttpStatusCode(404)));
}

/// **VALUE**: Connection failures become TransportError without leaking credentials.
///
/// **BUG THIS CATCHES**: Would catch reqwest's URL (with key/token) ending up in the
/// error message.
#[tokio::test]
async fn given_unreachable_host_when_requesting_then_returns_transport_error() {
    let config = ClientConfig::new(API_KEY, "very-secret-token")
        .unwrap()
        .with_base_url("http://127.0.0.1:1/1")
        .unwrap();
    let client = ResilientApiClient::new(config).unwrap();

    let err = client.get("/boards/b1", None).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::TransportError);
    assert_eq!(err.status(), None);
    assert!(!err.to_string().contains("very-secret-token"));
}

/// **VALUE**: Nothing the observer receives contains the token.
#[tokio::test]
async fn given_failed_calls_when_inspecting_observer_then_token_never_appears() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (client, observer) = client_for(&server);

    let _ = client.get("/boards/b1", None).await;

    assert!(!observer.all_logged_text().contains(TOKEN));
}

#[tokio::test]
async fn given_client_when_closed_then_observer_is_notified() {
    let server = MockServer::start().await;
    let (client, observer) = client_for(&server);

    client.close();

    assert!(*observer.closed.lock().unwrap());
}
