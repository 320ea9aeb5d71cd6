use crate::ClientConfig;
use crate::TRELLO_API_BASE_URL;
use crate::api_client::RetryPolicy;
use crate::config::{TRELLO_API_BASE_URL_ENV, TRELLO_API_KEY_ENV, TRELLO_TOKEN_ENV};
use crate::error::ConfigError;

use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn given_both_credentials_when_loading_then_uses_public_api() {
    let config =
        ClientConfig::from_lookup(lookup(&[(TRELLO_API_KEY_ENV, "k"), (TRELLO_TOKEN_ENV, "t")])).unwrap();

    assert_eq!(config.api_key().expose(), "k");
    assert_eq!(config.token().expose(), "t");
    assert_eq!(config.base_url().as_str(), TRELLO_API_BASE_URL);
    assert_eq!(*config.retry_policy(), RetryPolicy::default());
}

/// **VALUE**: A missing token is a startup error naming the variable.
///
/// **BUG THIS CATCHES**: Would catch a config that silently runs with an empty token
/// and then fails every call with 401.
#[test]
fn given_missing_token_when_loading_then_returns_missing_variable() {
    let result = ClientConfig::from_lookup(lookup(&[(TRELLO_API_KEY_ENV, "k")]));

    match result {
        Err(ConfigError::MissingVariable { name, .. }) => assert_eq!(name, TRELLO_TOKEN_ENV),
        other => panic!("expected missing variable, got {other:?}"),
    }
}

#[test]
fn given_blank_api_key_when_loading_then_returns_missing_variable() {
    let result = ClientConfig::from_lookup(lookup(&[(TRELLO_API_KEY_ENV, "  "), (TRELLO_TOKEN_ENV, "t")]));

    assert!(matches!(result, Err(ConfigError::MissingVariable { .. })));
}

#[test]
fn given_base_url_override_when_loading_then_replaces_default() {
    let config = ClientConfig::from_lookup(lookup(&[
        (TRELLO_API_KEY_ENV, "k"),
        (TRELLO_TOKEN_ENV, "t"),
        (TRELLO_API_BASE_URL_ENV, "http://127.0.0.1:9000/1"),
    ]))
    .unwrap();

    assert_eq!(config.base_url().as_str(), "http://127.0.0.1:9000/1");
}

#[test]
fn given_invalid_base_url_when_loading_then_returns_invalid_value() {
    let result = ClientConfig::from_lookup(lookup(&[
        (TRELLO_API_KEY_ENV, "k"),
        (TRELLO_TOKEN_ENV, "t"),
        (TRELLO_API_BASE_URL_ENV, "mailto:someone@example.com"),
    ]));

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

/// **VALUE**: Debug output of the whole config keeps both secrets hidden.
#[test]
fn given_config_when_debug_formatted_then_secrets_are_hidden() {
    let config = ClientConfig::new("visible-key-value", "visible-token-value")
        .unwrap()
        .with_timeout(Duration::from_secs(5));

    let debug = format!("{config:?}");

    assert!(!debug.contains("visible-key-value"));
    assert!(!debug.contains("visible-token-value"));
}
