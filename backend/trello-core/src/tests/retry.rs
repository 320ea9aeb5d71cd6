// Unit tests for the rate-limit retry loop.
// Waits are recorded instead of slept, so no test pauses for real seconds.

use crate::api_client::retry::{
    AttemptFailure, DelaySource, MAX_BACKOFF_INTERVAL, RetryError, RetryPolicy, RetryWait,
    parse_retry_after,
};
use crate::error::{ApiClientError, ApiErrorKind};

use std::cell::{Cell, RefCell};
use std::future::ready;
use std::time::Duration;

use backoff::backoff::Backoff;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

fn rate_limited(retry_after: Option<u64>) -> AttemptFailure {
    AttemptFailure::RateLimited {
        retry_after: retry_after.map(Duration::from_secs),
    }
}

/// **VALUE**: The backoff schedule is exactly 2, 4, 8, 16, 32 seconds.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one in the exponent or a jittered
/// delay creeping into the schedule.
#[test]
fn given_default_policy_when_stepping_backoff_then_doubles_from_two_seconds() {
    // GIVEN: A fresh schedule from the default policy
    let mut backoff = RetryPolicy::default().backoff();

    // WHEN: Taking the first five steps
    let delays: Vec<Option<Duration>> = (0..5).map(|_| backoff.next_backoff()).collect();

    // THEN: The Nth retry waits 2 * 2^N seconds
    let expected: Vec<Option<Duration>> = (0..5u32)
        .map(|n| Some(Duration::from_secs(2 * 2u64.pow(n))))
        .collect();
    assert_eq!(delays, expected);
}

#[test]
fn given_many_steps_when_stepping_backoff_then_caps_at_max_interval() {
    let mut backoff = RetryPolicy::default().backoff();

    let last = (0..64).filter_map(|_| backoff.next_backoff()).last();

    assert_eq!(last, Some(MAX_BACKOFF_INTERVAL));
}

/// **VALUE**: An explicit Retry-After replaces the computed delay untouched,
/// and later backoff steps still follow the attempt number.
///
/// **BUG THIS CATCHES**: Would catch Retry-After being added to, multiplied with,
/// or capped by the exponential delay, or the schedule stalling while a
/// Retry-After is honoured.
#[tokio::test]
async fn given_retry_after_then_none_when_executed_then_header_wins_and_schedule_advances() {
    // GIVEN: A first 429 with Retry-After: 7, then 429s without it
    let policy = RetryPolicy::default();
    let waits = RefCell::new(Vec::<RetryWait>::new());

    // WHEN: Executing until exhausted
    let _: Result<(), RetryError> = policy
        .execute(
            |attempt| {
                if attempt == 0 {
                    ready(Err(rate_limited(Some(7))))
                } else {
                    ready(Err(rate_limited(None)))
                }
            },
            |wait| {
                waits.borrow_mut().push(wait);
                ready(())
            },
        )
        .await;

    // THEN: 7 s from the header, then 4, 8, 16 s from the schedule
    let waits = waits.borrow();
    assert_eq!(waits[0].source, DelaySource::RetryAfter);
    assert_eq!(waits[0].delay, Duration::from_secs(7));
    let rest: Vec<u64> = waits[1..].iter().map(|w| w.delay.as_secs()).collect();
    assert_eq!(rest, vec![4, 8, 16]);
    assert!(waits[1..].iter().all(|w| w.source == DelaySource::Backoff));
}

/// **VALUE**: Five 429s in a row end the call with no sixth attempt.
#[tokio::test]
async fn given_only_rate_limits_when_executed_then_stops_after_five_attempts() {
    // GIVEN: An operation that is always rate limited
    let policy = RetryPolicy::default();
    let calls = Cell::new(0u32);
    let waits = RefCell::new(Vec::<RetryWait>::new());

    // WHEN: Executing
    let result: Result<(), RetryError> = policy
        .execute(
            |_| {
                calls.set(calls.get() + 1);
                ready(Err(rate_limited(None)))
            },
            |wait| {
                waits.borrow_mut().push(wait);
                ready(())
            },
        )
        .await;

    // THEN: Exhausted after exactly five attempts, with four backoff waits
    assert!(matches!(result, Err(RetryError::Exhausted { attempts: 5 })));
    assert_eq!(calls.get(), 5);
    let delays: Vec<u64> = waits.borrow().iter().map(|w| w.delay.as_secs()).collect();
    assert_eq!(delays, vec![2, 4, 8, 16]);
}

#[tokio::test]
async fn given_rate_limit_with_retry_after_when_executed_then_waits_header_seconds() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0u32);
    let waits = RefCell::new(Vec::<RetryWait>::new());

    let result = policy
        .execute(
            |attempt| {
                calls.set(calls.get() + 1);
                if attempt < 2 {
                    ready(Err(rate_limited(Some(3))))
                } else {
                    ready(Ok("done"))
                }
            },
            |wait| {
                waits.borrow_mut().push(wait);
                ready(())
            },
        )
        .await;

    assert_eq!(result.ok(), Some("done"));
    assert_eq!(calls.get(), 3);
    assert!(waits.borrow().iter().all(|w| w.delay == Duration::from_secs(3)));
    assert_eq!(waits.borrow().len(), 2);
}

/// **VALUE**: Non-429 failures are never retried.
///
/// **BUG THIS CATCHES**: Would catch a generic "retry on any error" loop.
#[tokio::test]
async fn given_fatal_failure_when_executed_then_returns_after_one_attempt() {
    let policy = RetryPolicy::default();
    let calls = Cell::new(0u32);
    let waits = Cell::new(0u32);

    let result: Result<(), RetryError> = policy
        .execute(
            |_| {
                calls.set(calls.get() + 1);
                ready(Err(AttemptFailure::Fatal(ApiClientError::from_http_response(
                    "get /boards/1",
                    500,
                    "boom",
                ))))
            },
            |_| {
                waits.set(waits.get() + 1);
                ready(())
            },
        )
        .await;

    match result {
        Err(RetryError::Fatal(error)) => assert_eq!(error.kind(), ApiErrorKind::HttpError),
        other => panic!("expected fatal error, got {other:?}"),
    }
    assert_eq!(calls.get(), 1);
    assert_eq!(waits.get(), 0);
}

/// **VALUE**: Every logical call starts its own budget at attempt zero.
#[tokio::test]
async fn given_two_executions_when_run_back_to_back_then_each_starts_at_attempt_zero() {
    let policy = RetryPolicy::new(3, Duration::from_millis(10));
    let seen = RefCell::new(Vec::new());

    for _ in 0..2 {
        let _: Result<(), RetryError> = policy
            .execute(
                |attempt| {
                    seen.borrow_mut().push(attempt);
                    ready(Err(rate_limited(None)))
                },
                |_| ready(()),
            )
            .await;
    }

    assert_eq!(*seen.borrow(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn given_zero_attempts_when_building_policy_then_allows_one_attempt() {
    assert_eq!(RetryPolicy::new(0, Duration::from_secs(1)).max_attempts(), 1);
}

#[test]
fn given_integer_retry_after_when_parsed_then_returns_seconds() {
    let mut headers = HeaderMap::new();
    headers.insert(RETRY_AFTER, HeaderValue::from_static(" 12 "));

    assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(12)));
}

/// **VALUE**: An HTTP-date or garbage Retry-After falls back to backoff instead of failing.
#[test]
fn given_non_integer_retry_after_when_parsed_then_treated_as_absent() {
    let mut headers = HeaderMap::new();
    headers.insert(
        RETRY_AFTER,
        HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
    );
    assert_eq!(parse_retry_after(&headers), None);

    headers.insert(RETRY_AFTER, HeaderValue::from_static("-5"));
    assert_eq!(parse_retry_after(&headers), None);

    assert_eq!(parse_retry_after(&HeaderMap::new()), None);
}
