use askama::Template;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};

use crate::routes::AppState;

const STATIC_PAGES: [&str; 5] = ["", "/about", "/projects", "/blog", "/contact"];

struct Entry {
    loc: String,
    change_frequency: &'static str,
    priority: &'static str,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
struct SitemapTemplate {
    entries: Vec<Entry>,
    last_modified: String,
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let base = state.config.app.site_url.trim_end_matches('/');
    let (post_slugs, project_slugs) =
        tokio::join!(state.content.post_slugs(), state.content.project_slugs());

    let mut entries: Vec<Entry> = STATIC_PAGES
        .iter()
        .map(|path| Entry {
            loc: format!("{base}{path}"),
            change_frequency: "weekly",
            priority: if path.is_empty() { "1.0" } else { "0.8" },
        })
        .collect();

    entries.extend(post_slugs.into_iter().map(|item| Entry {
        loc: format!("{base}/blog/{}", item.slug),
        change_frequency: "monthly",
        priority: "0.7",
    }));
    entries.extend(project_slugs.into_iter().map(|item| Entry {
        loc: format!("{base}/projects/{}", item.slug),
        change_frequency: "monthly",
        priority: "0.75",
    }));

    let sitemap = SitemapTemplate {
        entries,
        last_modified: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    match sitemap.render() {
        Ok(xml) => {
            ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to render sitemap");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render sitemap.".to_owned(),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_escapes_locations() {
        let xml = SitemapTemplate {
            entries: vec![Entry {
                loc: "https://example.com/blog/a&b".to_owned(),
                change_frequency: "monthly",
                priority: "0.7",
            }],
            last_modified: "2025-01-01T00:00:00Z".to_owned(),
        }
        .render()
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.com/blog/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
