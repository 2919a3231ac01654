use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    auth::{SESSION_COOKIE_NAME, SessionClaims, SessionKeys, sanitize_next_path},
    routes::AppState,
};

pub const LOGIN_PATH: &str = "/admin/login";
const PROTECTED_PREFIXES: [&str; 2] = ["/admin", "/studio"];

/// Outcome of checking a request against the admin surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Outside the admin surfaces.
    Unprotected,
    /// The login page itself, reachable without a session.
    LoginPage,
    Authenticated(SessionClaims),
    Unauthenticated,
}

/// `/admin`, `/studio` and anything below them; `/administrator` is not covered.
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Decides how a request for `path` carrying `token` may proceed.
pub fn classify(path: &str, token: Option<&str>, keys: &SessionKeys) -> RouteAccess {
    if !is_protected_path(path) {
        return RouteAccess::Unprotected;
    }
    if path == LOGIN_PATH {
        return RouteAccess::LoginPage;
    }

    match token.and_then(|token| keys.claims(token)) {
        Some(claims) => RouteAccess::Authenticated(claims),
        None => RouteAccess::Unauthenticated,
    }
}

/// `/admin/login?next=...` pointing back at the requested path.
pub fn login_redirect_target(path: &str) -> String {
    let next = sanitize_next_path(Some(path));
    format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
}

/// Redirects unauthenticated requests for `/admin` and `/studio` pages to the login page.
pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    let token = jar.get(SESSION_COOKIE_NAME).map(|cookie| cookie.value());

    match classify(&path, token, &state.session) {
        RouteAccess::Unprotected | RouteAccess::LoginPage => next.run(req).await,
        RouteAccess::Authenticated(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        RouteAccess::Unauthenticated => {
            tracing::warn!(path = %path, has_cookie = token.is_some(), "redirecting to admin login");
            Redirect::to(&login_redirect_target(&path)).into_response()
        }
    }
}
