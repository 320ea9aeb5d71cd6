use crate::redaction::{REDACTED_MARKER, is_sensitive, redact_params};

use std::collections::BTreeMap;

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// **VALUE**: Credentials are replaced in the logged copy while other values survive.
///
/// **BUG THIS CATCHES**: Would catch a redaction that misses `token`, or one that
/// blanks ordinary parameters and makes log lines useless.
#[test]
fn given_credential_params_when_redacted_then_only_credentials_are_masked() {
    // GIVEN: The canonical mapping from the redaction contract
    let original = params(&[("key", "abc"), ("token", "xyz"), ("other", "v")]);

    // WHEN: Redacting
    let redacted = redact_params(&original);

    // THEN: key/token masked, other unchanged
    assert_eq!(redacted["key"], REDACTED_MARKER);
    assert_eq!(redacted["token"], REDACTED_MARKER);
    assert_eq!(redacted["other"], "v");
}

/// **VALUE**: Redaction works on a copy.
///
/// **BUG THIS CATCHES**: Would catch an in-place rewrite that sends `***REDACTED***`
/// to the remote API instead of the real credentials.
#[test]
fn given_params_when_redacted_then_original_mapping_is_untouched() {
    let original = params(&[("key", "abc"), ("token", "xyz")]);

    let _ = redact_params(&original);

    assert_eq!(original["key"], "abc");
    assert_eq!(original["token"], "xyz");
}

#[test]
fn given_param_names_when_checked_then_only_key_and_token_are_sensitive() {
    assert!(is_sensitive("key"));
    assert!(is_sensitive("token"));
    assert!(!is_sensitive("filter"));
    assert!(!is_sensitive("Key"));
}
