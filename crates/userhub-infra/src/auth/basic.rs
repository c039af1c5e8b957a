//! HTTP Basic credential extraction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use userhub_core::ports::AuthError;

/// Parse an `Authorization` header value of the form
/// `Basic base64(username:password)`.
///
/// A header that does not carry the `Basic` scheme (case-insensitive) is
/// [`AuthError::NoCredentials`] - no authentication attempt was made and
/// the pipeline may fall through to another scheme or to anonymous. A
/// `Basic` header that cannot be decoded is
/// [`AuthError::MalformedCredentials`].
///
/// The username may not contain a colon; the password may - the split is
/// on the first colon only. Empty or all-whitespace halves are rejected.
pub fn extract_basic_credentials(header: &str) -> Result<(String, String), AuthError> {
    let scheme_ok = header
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("basic "));
    if !scheme_ok {
        return Err(AuthError::NoCredentials);
    }

    let encoded = header[6..].trim();
    if encoded.is_empty() {
        return Err(AuthError::MalformedCredentials);
    }

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(bytes).map_err(|_| AuthError::MalformedCredentials)?;

    let colon = match decoded.find(':') {
        Some(0) | None => return Err(AuthError::MalformedCredentials),
        Some(index) => index,
    };

    let user_name = &decoded[..colon];
    let password = &decoded[colon + 1..];

    if user_name.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::MalformedCredentials);
    }

    Ok((user_name.to_string(), password.to_string()))
}
