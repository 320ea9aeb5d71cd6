use crate::helpers::client_with_delay;

use trello_core::error::ApiErrorKind;

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A call stuck in its backoff loop does not hold up other calls.
///
/// **BUG THIS CATCHES**: Would catch a blocking sleep (std::thread::sleep) or a
/// shared lock held across the backoff wait.
#[tokio::test]
async fn given_one_rate_limited_call_when_another_runs_concurrently_then_success_is_not_delayed() {
    // GIVEN: One endpoint that always rate limits, one that answers immediately
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/slow"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/boards/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "fast" })))
        .mount(&server)
        .await;
    // Backoff 100 + 200 + 400 + 800 ms before the slow call gives up
    let (client, _observer) = client_with_delay(&server, Duration::from_millis(100));
    let start = Instant::now();

    // WHEN: Both calls are in flight together
    let (slow, fast) = tokio::join!(
        async {
            let result = client.get("/boards/slow", None).await;
            (result, start.elapsed())
        },
        async {
            let result = client.get("/boards/fast", None).await;
            (result, start.elapsed())
        },
    );

    // THEN: The fast call finished long before the slow one gave up
    let (fast_result, fast_elapsed) = fast;
    let (slow_result, slow_elapsed) = slow;
    assert_eq!(fast_result.unwrap()["id"], "fast");
    assert_eq!(slow_result.unwrap_err().kind(), ApiErrorKind::RateLimited);
    assert!(slow_elapsed >= Duration::from_millis(1500));
    assert!(fast_elapsed < Duration::from_millis(1000));
}

/// **VALUE**: Calls issued from spawned tasks share one client safely.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_shared_client_when_spawning_tasks_then_all_calls_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "b1" })))
        .expect(8)
        .mount(&server)
        .await;
    let (client, _observer) = client_with_delay(&server, Duration::from_millis(5));
    let client = std::sync::Arc::new(client);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get("/boards/b1", None).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap()["id"], "b1");
    }
}
