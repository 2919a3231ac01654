use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "studio.html")]
pub struct StudioNotConfiguredTemplate;

/// GET /studio and everything below it.
///
/// The Studio is hosted by Sanity; this entry point forwards signed-in admins to it.
pub async fn page(template: Template, State(state): State<AppState>) -> Response {
    let sanity = &state.config.sanity;

    match sanity.studio_url().filter(|_| sanity.has_valid_project_id()) {
        Some(url) => Redirect::to(&url).into_response(),
        None => template.render(StudioNotConfiguredTemplate),
    }
}
