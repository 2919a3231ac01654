use axum::{
    extract::{Extension, State},
    response::Response,
};
use folio_content::{AdminQuickLink, BlogPost, Pagination, Project};

use crate::{auth::SessionClaims, routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub username: String,
    pub site_url: String,
    pub quick_links: Vec<AdminQuickLink>,
    pub posts: Vec<BlogPost>,
    pub projects: Vec<Project>,
    pub can_write: bool,
}

/// GET /admin
pub async fn page(
    template: Template,
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Response {
    let page = Pagination::default();
    let quick_links = state.content.quick_links_for_admin().await;
    let posts = state.content.posts(page).await;
    let projects = state.content.projects(page).await;

    let site_url = template.site_url().to_owned();
    template.render(AdminTemplate {
        username: claims.sub,
        site_url,
        quick_links,
        posts,
        projects,
        can_write: state.content.can_write(),
    })
}
