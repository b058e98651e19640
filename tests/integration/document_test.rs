//! Integration tests for document upload, visibility and curation.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_upload_auto_tags_and_sets_path() {
    let app = helpers::TestApp::new().await;
    let token = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;

    let response = app
        .upload(
            &token,
            &[
                ("title", "Census Records Census Wales"),
                ("description", "Census returns for Wales"),
                ("category", "census"),
            ],
            Some(("census.txt", b"1901 census")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["filePath"], "/uploads/census.txt");
    assert_eq!(response.body["fileSize"], 11);
    assert_eq!(response.body["accessLevel"], "public");
    let tags: Vec<&str> = response.body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert_eq!(tags.first(), Some(&"census"));
    assert!(tags.contains(&"wales"));
}

#[tokio::test]
async fn test_upload_keeps_explicit_tags() {
    let app = helpers::TestApp::new().await;
    let token = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;

    let response = app
        .upload(
            &token,
            &[("title", "Parish Ledger"), ("tags", "parish, ledger ,,1850")],
            Some(("ledger.txt", b"entries")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["tags"], json!(["parish", "ledger", "1850"]));
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;

    let response = app
        .upload(&visitor, &[("title", "Not Allowed")], Some(("x.txt", b"x")))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.upload(&archivist, &[("title", "No File")], None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "A file is required");

    let response = app
        .upload(&archivist, &[("title", "ab")], Some(("x.txt", b"x")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Title must be between 3 and 200 characters"
    );

    let response = app
        .upload(
            &archivist,
            &[("title", "Bad Level"), ("accessLevel", "secret")],
            Some(("x.txt", b"x")),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_access_levels_gate_reads() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register("Pat Public", "pat@example.com", "public").await;
    let visitor_id = visitor["userId"].as_i64().unwrap();
    let visitor_token = visitor["token"].as_str().unwrap().to_string();

    let open = app.upload_document(&archivist, "Open Letters", "public").await;
    let sealed = app.upload_document(&archivist, "Sealed Letters", "full").await;

    let response = app
        .request("GET", &format!("/api/documents/{open}"), None, Some(&visitor_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Open Letters");
    assert_eq!(response.body["uploader"]["email"], "ada@example.com");

    let response = app
        .request("GET", &format!("/api/documents/{sealed}"), None, Some(&visitor_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        format!(
            "User {visitor_id} does not have sufficient access level to view document {sealed}. Required: full"
        )
    );
    assert_eq!(response.body["details"]["requiredAccessLevel"], "full");
    assert_eq!(response.body["details"]["documentId"], sealed.to_string());

    let listing = app
        .request("GET", "/api/documents", None, Some(&visitor_token))
        .await;
    assert_eq!(listing.body.as_array().unwrap().len(), 1);

    let listing = app.request("GET", "/api/documents", None, Some(&archivist)).await;
    assert_eq!(listing.body.as_array().unwrap().len(), 2);

    let response = app
        .request("GET", "/api/documents/999", None, Some(&archivist))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Document not found with ID: 999");
}

#[tokio::test]
async fn test_suspended_user_cannot_read() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register("Pat Public", "pat@example.com", "public").await;
    let visitor_id = visitor["userId"].as_i64().unwrap();
    let visitor_token = visitor["token"].as_str().unwrap().to_string();
    let open = app.upload_document(&archivist, "Open Letters", "public").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{visitor_id}/access"),
            Some(json!({ "status": "suspended" })),
            Some(&archivist),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/documents/{open}"), None, Some(&visitor_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        format!("User {visitor_id} account is suspended and cannot access documents")
    );
}

#[tokio::test]
async fn test_search_and_filters() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    app.upload_document(&archivist, "Parish Register 1850", "public")
        .await;
    app.upload_document(&archivist, "Ship Manifest", "public").await;

    let response = app
        .request("GET", "/api/documents/search?query=Parish", None, Some(&archivist))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let response = app
        .request("GET", "/api/documents/search?query=", None, Some(&archivist))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let stats = app
        .request("GET", "/api/documents/stats/overview", None, Some(&archivist))
        .await;
    assert_eq!(stats.body["totalDocuments"], 2);
    assert_eq!(stats.body["userDocuments"], 2);
}

#[tokio::test]
async fn test_update_and_delete_permissions() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;
    let id = app.upload_document(&archivist, "Open Letters", "public").await;
    let path = format!("/api/documents/{id}");

    let response = app
        .request("PUT", &path, Some(json!({ "title": "Hijacked" })), Some(&visitor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "title": "Open Letters 1890", "tags": ["letters"] })),
            Some(&archivist),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Open Letters 1890");
    assert_eq!(response.body["tags"], json!(["letters"]));

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "tags": ["letters, 1890", "post"] })),
            Some(&archivist),
        )
        .await;
    assert_eq!(response.body["tags"], json!(["letters", "1890", "post"]));
    let response = app.request("GET", &path, None, Some(&archivist)).await;
    assert_eq!(response.body["tags"], json!(["letters", "1890", "post"]));

    let response = app.request("DELETE", &path, None, Some(&visitor)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&archivist)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &path, None, Some(&archivist)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
