//! Scrubbing of credential query parameters before they reach a log line.

use std::collections::BTreeMap;

/// Placeholder written in place of a credential value.
pub const REDACTED_MARKER: &str = "***REDACTED***";

/// Query parameter names that carry credentials.
pub const SENSITIVE_PARAMS: [&str; 2] = ["key", "token"];

/// Returns a copy of `params` with every credential value replaced by [`REDACTED_MARKER`].
///
/// The input is left untouched so it can still be used for the outgoing request.
pub fn redact_params(params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    params
        .iter()
        .map(|(name, value)| {
            let shown = if is_sensitive(name) {
                REDACTED_MARKER.to_string()
            } else {
                value.clone()
            };
            (name.clone(), shown)
        })
        .collect()
}

pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_PARAMS.contains(&name)
}
