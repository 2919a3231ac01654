use std::sync::Arc;

use axum::{
    Router, middleware,
    response::IntoResponse,
    routing::get,
};
use folio_content::Content;

use crate::{
    auth::{AdminCredentials, SessionKeys},
    config::Config,
    template::{NotFoundTemplate, Template},
};

mod admin;
pub mod api;
mod health;
mod login;
mod sitemap;
mod studio;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<SessionKeys>,
    pub credentials: AdminCredentials,
    pub content: Content,
}

impl AppState {
    pub fn new(config: Config, content: Content) -> Self {
        Self {
            session: Arc::new(SessionKeys::new(&config.auth.session_secret)),
            credentials: AdminCredentials::new(&config.auth.username, &config.auth.password),
            config: Arc::new(config),
            content,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/admin", get(admin::page))
        .route("/admin/login", get(login::page).post(login::action))
        .route("/admin/logout", get(login::logout).post(login::logout))
        .route("/studio", get(studio::page))
        .route("/studio/{*tool}", get(studio::page))
        .nest("/api", api::router())
        .fallback(fallback)
        // Applies to the fallback too, so unknown admin paths still require a session.
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            crate::middleware::route_guard,
        ))
        .with_state(app_state)
}
