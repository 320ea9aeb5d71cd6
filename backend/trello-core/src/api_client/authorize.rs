use common::RedactedSecret;

use url::Url;

pub const AUTHORIZE_SCOPE: &str = "read,write";
pub const AUTHORIZE_RESPONSE_TYPE: &str = "token";
pub const AUTHORIZE_EXPIRATION: &str = "never";

/// URL a user can open to mint a fresh token for `api_key`.
///
/// Carries the API key only; the token is never part of it.
pub fn authorization_url(authorize_url: &Url, api_key: &RedactedSecret) -> Url {
    let mut url = authorize_url.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("expiration", AUTHORIZE_EXPIRATION)
        .append_pair("scope", AUTHORIZE_SCOPE)
        .append_pair("response_type", AUTHORIZE_RESPONSE_TYPE)
        .append_pair("key", api_key.expose());
    url
}
