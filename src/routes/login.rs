use axum::{
    Form,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    auth::{clear_session_cookie, sanitize_next_path, session_cookie},
    routes::AppState,
    template::Template,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub next_path: String,
    pub username: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub next: Option<String>,
}

/// GET /admin/login
pub async fn page(
    template: Template,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let next = query.ok().and_then(|Query(query)| query.next);

    template.render(LoginTemplate {
        next_path: sanitize_next_path(next.as_deref()).to_owned(),
        username: None,
        error_message: None,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next_path: Option<String>,
}

/// POST /admin/login
#[tracing::instrument(skip_all)]
pub async fn action(
    template: Template,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> Response {
    let username = input.username.trim();
    let next_path = sanitize_next_path(input.next_path.as_deref()).to_owned();

    if !state.credentials.is_valid(username, &input.password) {
        tracing::warn!("admin login rejected");
        return template.render_with_status(
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                next_path,
                username: Some(username.to_owned()),
                error_message: Some(INVALID_CREDENTIALS.to_owned()),
            },
        );
    }

    let token = match state.session.issue(username) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to sign in.").into_response();
        }
    };

    tracing::info!(next = %next_path, "admin signed in");
    let jar = jar.add(session_cookie(token, state.config.is_production()));

    (jar, Redirect::to(&next_path)).into_response()
}

/// GET|POST /admin/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    tracing::info!("admin signed out");
    let jar = jar.add(clear_session_cookie(state.config.is_production()));

    (jar, Redirect::to("/admin/login"))
}
