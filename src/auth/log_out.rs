//! The log-out endpoint: deletes the session cookies.

use axum::http::StatusCode;
use axum_extra::extract::PrivateCookieJar;

use crate::auth::cookie::invalidate_auth_cookie;

/// A handler for logging a user out by invalidating their auth cookies.
pub async fn post_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, StatusCode) {
    (invalidate_auth_cookie(jar), StatusCode::OK)
}
