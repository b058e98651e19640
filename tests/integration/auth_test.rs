//! Integration tests for registration, login and user administration.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_maps_role_to_access_profile() {
    let app = helpers::TestApp::new().await;

    let archivist = app.register("Ada Archivist", "ada@example.com", "archivist").await;
    assert_eq!(archivist["accessLevel"], "full");
    assert_eq!(archivist["status"], "approved");

    let researcher = app.register("Rex Researcher", "rex@example.com", "researcher").await;
    assert_eq!(researcher["accessLevel"], "restricted");
    assert_eq!(researcher["status"], "pending");

    let visitor = app.register("Pat Public", "pat@example.com", "admin").await;
    assert_eq!(visitor["role"], "public");
    assert_eq!(visitor["accessLevel"], "public");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register("First", "dup@example.com", "public").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Second",
                "email": " DUP@example.com ",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Email already exists");
    assert_eq!(response.body["path"], "/api/auth/register");
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "name": "Shorty", "email": "s@example.com", "password": "123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
}

#[tokio::test]
async fn test_login_and_me() {
    let app = helpers::TestApp::new().await;
    app.register("Ada Archivist", "ada@example.com", "archivist").await;

    let token = app.login("ADA@example.com", "secret123").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ada@example.com");
    assert!(me.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures() {
    let app = helpers::TestApp::new().await;
    app.register("Ada Archivist", "ada@example.com", "archivist").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ghost@example.com", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pending_researcher_is_approved_by_archivist() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let researcher = app.register("Rex Researcher", "rex@example.com", "researcher").await;
    let researcher_id = researcher["userId"].as_i64().unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "rex@example.com", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Account pending approval");

    let pending = app
        .request("GET", "/api/users?status=pending", None, Some(&archivist))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.body.as_array().unwrap().len(), 1);

    let approved = app
        .request(
            "PUT",
            &format!("/api/users/{researcher_id}/access"),
            Some(json!({ "status": "approved" })),
            Some(&archivist),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["status"], "approved");
    assert_eq!(approved.body["accessLevel"], "restricted");

    app.login("rex@example.com", "secret123").await;
}

#[tokio::test]
async fn test_user_administration_permissions() {
    let app = helpers::TestApp::with_admin().await;
    let visitor = app.register("Pat Public", "pat@example.com", "public").await;
    let visitor_id = visitor["userId"].as_i64().unwrap();
    let visitor_token = visitor["token"].as_str().unwrap().to_string();

    let listing = app
        .request("GET", "/api/users", None, Some(&visitor_token))
        .await;
    assert_eq!(listing.status, StatusCode::FORBIDDEN);

    let own = app
        .request("GET", &format!("/api/users/{visitor_id}"), None, Some(&visitor_token))
        .await;
    assert_eq!(own.status, StatusCode::OK);

    let admin = app.login(helpers::ADMIN_EMAIL, "secret123").await;

    let stats = app
        .request("GET", "/api/users/stats/overview", None, Some(&admin))
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["totalUsers"], 2);
    assert_eq!(stats.body["approved"], 2);

    let deleted = app
        .request("DELETE", &format!("/api/users/{visitor_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .request("DELETE", &format!("/api/users/{visitor_id}"), None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_promotes_another_admin() {
    let app = helpers::TestApp::with_admin().await;
    let admin = app.login(helpers::ADMIN_EMAIL, "secret123").await;
    let head = app
        .register_token("Hana Head", "head@example.com", "archivist")
        .await;
    let visitor = app.register("Pat Public", "pat@example.com", "public").await;
    let visitor_id = visitor["userId"].as_i64().unwrap();
    let path = format!("/api/users/{visitor_id}/role");

    let response = app
        .request("PUT", &path, Some(json!({ "role": "admin" })), Some(&head))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &path, Some(json!({ "role": "admin" })), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "admin");
    assert_eq!(response.body["accessLevel"], "full");

    let promoted = app.login("pat@example.com", "secret123").await;
    let head_id = app
        .request("GET", "/api/auth/me", None, Some(&head))
        .await
        .body["id"]
        .as_i64()
        .unwrap();
    let response = app
        .request("DELETE", &format!("/api/users/{head_id}"), None, Some(&promoted))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_suspended_archivist_token_is_refused() {
    let app = helpers::TestApp::new().await;
    let head = app
        .register_token("Hana Head", "head@example.com", "archivist")
        .await;
    let deputy = app.register("Dev Deputy", "deputy@example.com", "archivist").await;
    let deputy_id = deputy["userId"].as_i64().unwrap();
    let deputy_token = deputy["token"].as_str().unwrap().to_string();
    let document = app.upload_document(&head, "Vestry Minutes", "public").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{deputy_id}/access"),
            Some(json!({ "status": "suspended" })),
            Some(&head),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("DELETE", &format!("/api/documents/{document}"), None, Some(&deputy_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{deputy_id}/access"),
            Some(json!({ "status": "approved" })),
            Some(&deputy_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/auth/me", None, Some(&deputy_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/api/users/{deputy_id}"), None, Some(&head))
        .await;
    assert_eq!(response.body["status"], "suspended");
    let response = app
        .request("GET", &format!("/api/documents/{document}"), None, Some(&head))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_pending_token_only_reaches_own_account() {
    let app = helpers::TestApp::new().await;
    let token = app
        .register_token("Rex Researcher", "rex@example.com", "researcher")
        .await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["status"], "pending");

    let response = app
        .upload(
            &token,
            &[("title", "Unapproved Upload")],
            Some(("notes.txt", b"draft")),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Account pending approval");

    let response = app.request("GET", "/api/documents", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_comes_from_stored_account() {
    let app = helpers::TestApp::new().await;
    let head = app
        .register_token("Hana Head", "head@example.com", "archivist")
        .await;
    let document = app.upload_document(&head, "Tithe Map", "public").await;
    let visitor = app.register("Pat Public", "pat@example.com", "public").await;
    let visitor_id = visitor["userId"].as_i64().unwrap();
    let visitor_token = visitor["token"].as_str().unwrap().to_string();

    // Promoted after the token was issued.
    sqlx::query("UPDATE users SET role = 'archivist', access_level = 'full' WHERE id = ?")
        .bind(visitor_id)
        .execute(app.db.pool())
        .await
        .unwrap();

    let response = app
        .request("DELETE", &format!("/api/documents/{document}"), None, Some(&visitor_token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}
