use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;

use crate::services::{ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
pub const OAUTH_STATE_COOKIE: &str = "oauthState";

const OAUTH_STATE_TTL_SECONDS: i64 = 10 * 60;

pub fn access_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    session_cookie(ACCESS_TOKEN_COOKIE, token, secure, ACCESS_TOKEN_TTL_SECONDS)
}

pub fn refresh_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    session_cookie(REFRESH_TOKEN_COOKIE, token, secure, REFRESH_TOKEN_TTL_SECONDS)
}

/// SameSite=Lax: the value has to survive the top-level redirect coming back
/// from the identity provider, which Strict would block.
pub fn oauth_state_cookie(state: String, secure: bool) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, state))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(OAUTH_STATE_TTL_SECONDS))
        .build()
}

/// Named cookie with the matching path, for `CookieJar::remove`.
pub fn clear_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

fn session_cookie(
    name: &'static str,
    value: String,
    secure: bool,
    max_age_seconds: i64,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}
