//! Integration tests for the cookie-session form flow.

mod helpers;

use http::StatusCode;

const REGISTER_ADA: &str = "name=Ada+Archivist&email=ada%40example.com&password=secret123&role=archivist";

async fn login_cookie(app: &helpers::TestApp) -> String {
    let response = app
        .form(
            "POST",
            "/servlet/login",
            "email=ADA%40example.com&password=secret123",
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/servlet/dashboard"));
    response.cookie_pair().expect("No session cookie")
}

#[tokio::test]
async fn test_register_then_login_and_dashboard() {
    let app = helpers::TestApp::new().await;

    let response = app.form("POST", "/servlet/register", REGISTER_ADA, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .text
        .contains("Registration successful! Please login with your credentials."));

    let cookie = login_cookie(&app).await;
    assert!(cookie.starts_with("ARCHIVE_SESSION="));

    let dashboard = app.form("GET", "/servlet/dashboard", "", Some(&cookie)).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.text.contains("Welcome, Ada Archivist (archivist)"));
    assert!(dashboard.text.contains("<td>Total users</td><td>1</td>"));

    let login_again = app.form("GET", "/servlet/login", "", Some(&cookie)).await;
    assert_eq!(login_again.status, StatusCode::SEE_OTHER);
    assert_eq!(login_again.location(), Some("/servlet/dashboard"));
}

#[tokio::test]
async fn test_register_validation_messages() {
    let app = helpers::TestApp::new().await;

    let cases = [
        ("name=&email=a%40b.com&password=secret123", "Name is required"),
        ("name=Ada&email=not-an-email&password=secret123", "Valid email is required"),
        ("name=Ada&email=a%40b.com&password=123", "Password must be at least 6 characters"),
    ];
    for (form, message) in cases {
        let response = app.form("POST", "/servlet/register", form, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.text.contains(message), "missing {message}");
    }

    app.form("POST", "/servlet/register", REGISTER_ADA, None).await;
    let response = app.form("POST", "/servlet/register", REGISTER_ADA, None).await;
    assert!(response.text.contains("Email already registered"));
}

#[tokio::test]
async fn test_login_failures_render_form() {
    let app = helpers::TestApp::new().await;

    let response = app
        .form("POST", "/servlet/login", "email=&password=", None)
        .await;
    assert!(response.text.contains("Email and password are required"));

    let response = app
        .form("POST", "/servlet/login", "email=ghost%40example.com&password=secret123", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Invalid email or password"));
    assert!(response.cookie_pair().is_none());

    app.form(
        "POST",
        "/servlet/register",
        "name=Rex&email=rex%40example.com&password=secret123&role=researcher",
        None,
    )
    .await;
    let response = app
        .form("POST", "/servlet/login", "email=rex%40example.com&password=secret123", None)
        .await;
    assert!(response.text.contains("Account pending approval"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = helpers::TestApp::new().await;
    app.form("POST", "/servlet/register", REGISTER_ADA, None).await;
    let cookie = login_cookie(&app).await;

    let response = app.form("GET", "/servlet/logout", "", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Logged Out Successfully"));
    assert!(response.text.contains("ada@example.com"));

    let dashboard = app.form("GET", "/servlet/dashboard", "", Some(&cookie)).await;
    assert_eq!(dashboard.status, StatusCode::SEE_OTHER);
    assert_eq!(dashboard.location(), Some("/servlet/login"));

    let again = app.form("GET", "/servlet/logout", "", Some(&cookie)).await;
    assert_eq!(again.status, StatusCode::SEE_OTHER);
    assert_eq!(again.location(), Some("/servlet/login"));
}

#[tokio::test]
async fn test_logout_post_returns_json() {
    let app = helpers::TestApp::new().await;

    let response = app.form("POST", "/servlet/logout", "", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_dashboard_without_session_redirects() {
    let app = helpers::TestApp::new().await;

    let response = app.form("POST", "/servlet/dashboard", "", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/servlet/login"));

    let response = app
        .form("GET", "/servlet/dashboard", "", Some("ARCHIVE_SESSION=forged"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}
