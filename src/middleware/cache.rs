use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

/// Fills in `Cache-Control` for responses whose handler did not choose one.
///
/// - `/sitemap.xml`: cacheable for an hour
/// - everything else: never stored, admin pages and session cookies included
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_sitemap = req.uri().path() == "/sitemap.xml";
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    if headers.contains_key(header::CACHE_CONTROL) {
        return response;
    }

    if is_sitemap {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    }

    response
}
