//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! BrickLink issues a consumer key/secret and a token key/secret; there is no
//! token exchange, every request is simply signed with all four.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::Credentials;
use crate::error::{ApiError, ApiResult};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// RFC 3986 percent-encoding: only `A-Z a-z 0-9 - . _ ~` pass through.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Random alphanumeric nonce for one request
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the signature base string `METHOD&url&params`.
///
/// `url` must not contain a query string; query and oauth parameters are
/// passed in `params`.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

/// Signs a base string with `consumer_secret&token_secret`, base64 encoded.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> ApiResult<String> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| ApiError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Produces the `Authorization` header value for a request.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    query: &[(&str, &str)],
    timestamp: i64,
    nonce: &str,
) -> ApiResult<String> {
    let timestamp = timestamp.to_string();
    let oauth_params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.token_key.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let all_params: Vec<(String, String)> = oauth_params
        .iter()
        .chain(query.iter())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let base_string = signature_base_string(method, url, &all_params);
    log::trace!("OAuth signature base string: {base_string}");

    let signature = sign(
        &base_string,
        &credentials.consumer_secret,
        &credentials.token_secret,
    )?;

    let header_params = oauth_params
        .iter()
        .map(|(k, v)| (*k, *v))
        .chain(std::iter::once(("oauth_signature", signature.as_str())))
        .map(|(k, v)| format!("{k}=\"{}\"", encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {header_params}"))
}
