//! Route guard integration tests
//!
//! Covers the admin page surfaces:
//! - unauthenticated requests redirect to the login page with a sanitized `next`
//! - the login page stays reachable without a session
//! - valid sessions pass, expired or foreign ones do not
//! - logout clears the cookie

mod common;

use axum::http::{StatusCode, header};
use common::{SECRET, TestApp, USERNAME, body_text, get, set_cookie_headers};
use folio::auth::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS, SessionKeys};
use tower::ServiceExt;

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_admin_page_without_cookie_redirects_to_login() {
    let app = TestApp::without_store();

    let response = app
        .router
        .oneshot(get("/admin/dashboard", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login?next=%2Fadmin%2Fdashboard");
}

#[tokio::test]
async fn test_studio_without_cookie_redirects_to_login() {
    let app = TestApp::without_store();

    let response = app.router.oneshot(get("/studio", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login?next=%2Fstudio");
}

#[tokio::test]
async fn test_login_page_is_reachable_without_cookie() {
    let app = TestApp::without_store();

    let response = app
        .router
        .oneshot(get("/admin/login", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Admin Login"));
    assert!(body.contains("name=\"nextPath\""));
}

#[tokio::test]
async fn test_login_page_drops_foreign_next() {
    let app = TestApp::without_store();

    let response = app
        .router
        .oneshot(get("/admin/login?next=%2F%2Fevil.com", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("evil.com"));
}

#[tokio::test]
async fn test_studio_with_valid_cookie_passes() {
    let app = TestApp::without_store();
    let cookie = app.session_cookie();

    let response = app
        .router
        .oneshot(get("/studio", Some(&cookie)))
        .await
        .unwrap();

    // No Sanity project is configured in tests.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Sanity is not configured"));
}

#[tokio::test]
async fn test_dashboard_with_valid_cookie_renders() {
    let app = TestApp::without_store();
    let cookie = app.session_cookie();

    let response = app
        .router
        .oneshot(get("/admin", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Admin Control Center"));
    assert!(body.contains("Traffic Analytics"));
    assert!(body.contains("HEA Property Predictor"));
}

#[tokio::test]
async fn test_public_path_is_not_guarded() {
    let app = TestApp::without_store();

    let response = app.router.oneshot(get("/blog", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_unknown_admin_path_still_requires_session() {
    let app = TestApp::without_store();

    let response = app
        .router
        .oneshot(get("/admin/does-not-exist", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_expired_cookie_redirects() {
    let app = TestApp::without_store();
    let issued_long_ago = 1_600_000_000;
    let token = SessionKeys::new(SECRET)
        .issue_at(USERNAME, issued_long_ago)
        .unwrap();
    assert!(!SessionKeys::new(SECRET).verify_at(&token, issued_long_ago + SESSION_TTL_SECONDS));

    let cookie = format!("{SESSION_COOKIE_NAME}={token}");
    let response = app
        .router
        .oneshot(get("/admin", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login?next=%2Fadmin");
}

#[tokio::test]
async fn test_cookie_signed_with_other_secret_redirects() {
    let app = TestApp::without_store();
    let token = SessionKeys::new("some_other_secret_that_is_long_enough")
        .issue(USERNAME)
        .unwrap();
    let cookie = format!("{SESSION_COOKIE_NAME}={token}");

    let response = app
        .router
        .oneshot(get("/admin", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session_ends() {
    let app = TestApp::without_store();
    let cookie = app.session_cookie();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/admin/logout")
        .header(header::COOKIE, &cookie)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");

    let cleared = set_cookie_headers(&response)
        .into_iter()
        .find(|value| value.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .expect("logout must overwrite the session cookie");
    assert!(cleared.starts_with(&format!("{SESSION_COOKIE_NAME}=;")));
    assert!(cleared.contains("Max-Age=0"));

    // The browser now sends the emptied cookie.
    let after = app
        .router
        .oneshot(get("/admin", Some(&format!("{SESSION_COOKIE_NAME}="))))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_studio_redirects_to_hosted_studio_when_configured() {
    let mut config = common::test_config();
    config.sanity.project_id = "abc123".to_owned();
    let app = TestApp::build(config, None);
    let cookie = app.session_cookie();

    let response = app
        .router
        .oneshot(get("/studio/desk", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "https://abc123.sanity.studio");
}

#[tokio::test]
async fn test_sibling_of_admin_prefix_is_not_guarded() {
    let app = TestApp::without_store();

    let response = app
        .router
        .oneshot(get("/administrator", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::LOCATION).is_none());
}
