use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use super::{SESSION_COOKIE_NAME, SessionClaims};
use crate::{error::ApiError, routes::AppState};

/// Proof of a verified admin session, required by admin API handlers.
///
/// Extraction runs before the handler body, so a rejected request never reaches
/// the content store. Missing, tampered and expired tokens are rejected alike.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionClaims);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The route guard already verified this request.
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(AdminSession(claims.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE_NAME).map(|cookie| cookie.value()) else {
            tracing::warn!(path = %parts.uri.path(), "admin API call without session cookie");
            return Err(ApiError::Unauthorized);
        };

        match state.session.claims(token) {
            Some(claims) => Ok(AdminSession(claims)),
            None => {
                tracing::warn!(path = %parts.uri.path(), "admin API call with invalid session");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
