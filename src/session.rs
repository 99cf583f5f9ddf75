//! Cart-session cookie handling
//!
//! Each browser session gets a `cart_session` cookie; the session id keys
//! the cart, checkout state, and persistence entries for that visitor.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

const SESSION_COOKIE: &str = "cart_session";

/// Extracts the session id from the request cookies, minting a fresh one
/// when absent. The boolean reports whether the id is new (and therefore
/// needs a `Set-Cookie` on the way out).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    if let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for part in cookies.split(';') {
            if let Some(value) = part.trim().strip_prefix("cart_session=") {
                if !value.is_empty() {
                    return (value.to_string(), false);
                }
            }
        }
    }
    (Uuid::new_v4().simple().to_string(), true)
}

/// Attaches the session cookie to an outgoing response.
pub fn attach_session_cookie(response: &mut Response, session_id: &str) {
    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Err(err) => warn!(%err, "session cookie could not be encoded"),
    }
}
