use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::token::SESSION_TTL_SECONDS;

pub const SESSION_COOKIE_NAME: &str = "mi_admin_session";

/// Session cookie carrying a freshly issued token.
///
/// `secure` is set outside development so the cookie never travels over plain HTTP.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(SESSION_TTL_SECONDS as i64))
        .build()
}

/// Overwrites the session cookie with an empty, already expired one.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}
