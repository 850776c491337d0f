//! Cookie-based session binding for issued tokens.
//!
//! Two cookies travel together: the HttpOnly authority cookie holding the
//! signed token, and a script-readable display cookie holding the bare
//! expiry timestamp for the countdown UI. Only the authority cookie is
//! ever consulted for verification.

use axum::http::HeaderMap;
use axum::http::header;
use tollbooth_core::TokenSettings;

/// Authority cookie: the signed token, HttpOnly, site-wide.
pub const SESSION_COOKIE_NAME: &str = "session_jwt";

/// Display cookie: the expiry unix timestamp, demo-page scope only.
pub const EXPIRY_COOKIE_NAME: &str = "jwt_exp";

/// Path scope of the display cookie.
pub const EXPIRY_COOKIE_PATH: &str = "/demo";

/// Seconds added to the token lifetime for the cookie Max-Age, so the
/// cookie outlives the token by a small margin.
const COOKIE_MARGIN_SECS: i64 = 2;

/// Build the Set-Cookie directives binding a freshly issued token.
///
/// Secure is intentionally not set: the demo runs over plain HTTP, as the
/// original deployment does.
pub fn session_cookies(token: &str, expires_at: i64, settings: &TokenSettings) -> [String; 2] {
    let max_age = settings.lifetime_secs + COOKIE_MARGIN_SECS;
    [
        format!(
            "{SESSION_COOKIE_NAME}={token}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax"
        ),
        format!(
            "{EXPIRY_COOKIE_NAME}={expires_at}; Max-Age={max_age}; Path={EXPIRY_COOKIE_PATH}; SameSite=Lax"
        ),
    ]
}

/// Build the Set-Cookie directives deleting both cookies at their scopes.
pub fn clear_cookies() -> [String; 2] {
    [
        format!("{SESSION_COOKIE_NAME}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax"),
        format!("{EXPIRY_COOKIE_NAME}=; Max-Age=0; Path={EXPIRY_COOKIE_PATH}; SameSite=Lax"),
    ]
}

/// Recover the token from the authority cookie, if present.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE_NAME)
}

/// Read the display cookie's expiry timestamp; 0 when absent or unparsable.
pub fn expiry_from_cookies(headers: &HeaderMap) -> i64 {
    cookie_value(headers, EXPIRY_COOKIE_NAME)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Extract a cookie value from the Cookie header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{name}=")) {
            return Some(value.to_string());
        }
    }
    None
}
