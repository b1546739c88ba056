pub mod admin;
pub mod auth;
pub mod registration;
pub mod results;
pub mod voting;

use axum::http::HeaderMap;

/// Origin address for audit entries: first hop of `x-forwarded-for` when
/// present. The socket address is not threaded through; absent header means
/// no recorded address.
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
