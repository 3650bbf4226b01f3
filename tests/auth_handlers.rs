//! Login, logout, registration and TOTP flows driven through the full router.

use axum::http::{header, Method, StatusCode};
use tower::ServiceExt;

use recipe_frontend::domain::ServiceRole;
use recipe_frontend::http::response::HX_REDIRECT;

mod common;

use common::{body_string, form, get, router_with_failing_auth, TestApp, PASSWORD, USERNAME};

fn credentials() -> String {
    format!("username={USERNAME}&password={PASSWORD}")
}

#[tokio::test]
async fn test_login_sets_cookie_and_redirects() {
    let app = TestApp::new();
    app.auth.seed_user(USERNAME, PASSWORD, ServiceRole::User);

    let response = app
        .send(form(Method::POST, "/login?redirectTo=%2Frecipes", None, &credentials()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[HX_REDIRECT], "/recipes");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("recipes_session="));
    assert_eq!(app.auth.active_sessions(), 1);

    // The issued cookie opens protected pages.
    let token = cookie.split(';').next().unwrap();
    let page = app.send(get("/recipes", Some(token))).await;
    assert_eq!(page.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_ignores_foreign_redirect_targets() {
    let app = TestApp::new();
    app.auth.seed_user(USERNAME, PASSWORD, ServiceRole::User);

    let response = app
        .send(form(
            Method::POST,
            "/login?redirectTo=https%3A%2F%2Fevil.example%2F",
            None,
            &credentials(),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[HX_REDIRECT], "/");
}

#[tokio::test]
async fn test_login_ignores_redirect_targets_with_control_characters() {
    let app = TestApp::new();
    app.auth.seed_user(USERNAME, PASSWORD, ServiceRole::User);

    for target in ["%2F%09%2Fevil.example%2Fphish", "%2F%0A%2Fevil.example"] {
        let response = app
            .send(form(
                Method::POST,
                &format!("/login?redirectTo={target}"),
                None,
                &credentials(),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HX_REDIRECT], "/");
    }
}

#[tokio::test]
async fn test_rejected_login_rerenders_prompt_without_cookie() {
    let app = TestApp::new();
    app.auth.seed_user(USERNAME, PASSWORD, ServiceRole::User);

    let response = app
        .send(form(Method::POST, "/login", None, "username=cook&password=wrong"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(response.headers().get(HX_REDIRECT).is_none());
    assert!(body_string(response).await.contains("id=\"login-prompt\""));
    assert_eq!(app.auth.active_sessions(), 0);
}

#[tokio::test]
async fn test_login_backend_failure_rerenders_prompt() {
    let response = router_with_failing_auth()
        .oneshot(form(Method::POST, "/login", None, &credentials()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_without_password_is_bad_request() {
    let app = TestApp::new();
    let response = app.send(form(Method::POST, "/login", None, "username=cook")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_page_and_prompt() {
    let app = TestApp::new();

    let page = body_string(app.send(get("/login?redirectTo=%2Frecipes", None)).await).await;
    assert!(page.contains("<html"));
    assert!(page.contains("hx-post=\"/login?redirectTo=%2Frecipes\""));

    let prompt = body_string(app.send(get("/components/login_prompt", None)).await).await;
    assert!(!prompt.contains("<html"));
    assert!(prompt.contains("name=\"totpToken\""));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let cookie = app.session_cookie().await;

    let response = app.send(form(Method::POST, "/logout", Some(&cookie), "")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[HX_REDIRECT], "/");
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
    assert_eq!(app.auth.active_sessions(), 0);
}

#[tokio::test]
async fn test_logout_requires_session() {
    let app = TestApp::new();
    let response = app.send(form(Method::POST, "/logout", None, "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_backend_failure_is_server_error() {
    let response = router_with_failing_auth()
        .oneshot(form(Method::POST, "/logout", Some("recipes_session=abc"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_registration_then_totp_verification() {
    let app = TestApp::new();

    let response = app
        .send(form(Method::POST, "/register", None, "username=baker&password=flour"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("id=\"totp-setup\""));
    assert!(body.contains("name=\"userID\" value=\"1\""));
    assert!(body.contains("otpauth://totp/"));

    let response = app
        .send(form(Method::POST, "/totp/verify", None, "userID=1&totpToken=123456"))
        .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(response.headers()[HX_REDIRECT], "/login");

    // Verified accounts need a code from now on.
    let without_code = app
        .send(form(Method::POST, "/login", None, "username=baker&password=flour"))
        .await;
    assert!(without_code.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_duplicate_registration_rerenders_prompt() {
    let app = TestApp::new();
    app.auth.seed_user("baker", "flour", ServiceRole::User);

    let response = app
        .send(form(Method::POST, "/register", None, "username=baker&password=other"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("id=\"registration-prompt\""));
}

#[tokio::test]
async fn test_registration_without_username_is_bad_request() {
    let app = TestApp::new();
    let response = app.send(form(Method::POST, "/register", None, "password=flour")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_totp_form_is_bad_request() {
    let app = TestApp::new();
    for body in ["userID=1&totpToken=12", "userID=abc&totpToken=123456", ""] {
        let response = app.send(form(Method::POST, "/totp/verify", None, body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_totp_backend_failure_is_server_error() {
    let response = router_with_failing_auth()
        .oneshot(form(Method::POST, "/totp/verify", None, "userID=1&totpToken=123456"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_home_reflects_login_state() {
    let app = TestApp::new();

    let anonymous = body_string(app.send(get("/", None)).await).await;
    assert!(anonymous.contains("href=\"/register\""));

    let cookie = app.session_cookie().await;
    let home = body_string(app.send(get("/dashboard", Some(&cookie))).await).await;
    assert!(home.contains("Welcome back, cook."));
    assert!(home.contains("hx-post=\"/logout\""));
}
