//! Access-token cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const MATDAAN_ACCESS_TOKEN: &str = "matdaan_access_token";

/// Access-token JWT lifetime in seconds (12 hours).
pub const ACCESS_TOKEN_EXP: u64 = 43_200;

/// Set the access-token cookie on the jar.
pub fn set_access_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((MATDAAN_ACCESS_TOKEN, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(ACCESS_TOKEN_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the access-token cookie by setting Max-Age to 0.
pub fn clear_access_token_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((MATDAAN_ACCESS_TOKEN, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
