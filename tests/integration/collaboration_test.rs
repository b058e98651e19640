//! Integration tests for annotations and feedback.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_annotation_lifecycle() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;
    let doc = app.upload_document(&archivist, "Open Letters", "public").await;

    let created = app
        .request(
            "POST",
            "/api/annotations",
            Some(json!({
                "documentId": doc,
                "content": "Signature is smudged",
                "page": 2,
                "annotationType": "highlight",
            })),
            Some(&visitor),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["page"], 2);
    assert_eq!(created.body["annotationType"], "highlight");
    let annotation = created.body["id"].as_i64().unwrap();

    let listed = app
        .request("GET", &format!("/api/annotations/document/{doc}"), None, Some(&archivist))
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let mine = app.request("GET", "/api/annotations/mine", None, Some(&visitor)).await;
    assert_eq!(mine.body.as_array().unwrap().len(), 1);

    let path = format!("/api/annotations/{annotation}");
    let response = app
        .request("PUT", &path, Some(json!({ "content": "Rewritten" })), Some(&archivist))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &path, Some(json!({ "content": "Ink faded" })), Some(&visitor))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["content"], "Ink faded");

    let response = app.request("DELETE", &path, None, Some(&archivist)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &path, None, Some(&archivist)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["message"],
        format!("Annotation not found with ID: {annotation}")
    );
}

#[tokio::test]
async fn test_annotation_requires_readable_document() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;
    let sealed = app.upload_document(&archivist, "Sealed Letters", "full").await;

    let response = app
        .request(
            "POST",
            "/api/annotations",
            Some(json!({ "documentId": sealed, "content": "Peeking" })),
            Some(&visitor),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/annotations",
            Some(json!({ "documentId": sealed, "content": "   " })),
            Some(&archivist),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", &format!("/api/annotations/document/{sealed}"), None, Some(&visitor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_feedback_triage() {
    let app = helpers::TestApp::new().await;
    let archivist = app
        .register_token("Ada Archivist", "ada@example.com", "archivist")
        .await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;
    let other = app.register_token("Olu Other", "olu@example.com", "public").await;
    let doc = app.upload_document(&archivist, "Open Letters", "public").await;

    let created = app
        .request(
            "POST",
            "/api/feedback",
            Some(json!({
                "documentId": doc,
                "subject": "Wrong date",
                "message": "The letter is dated 1891, not 1890",
            })),
            Some(&visitor),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["status"], "pending");
    assert_eq!(created.body["priority"], "normal");
    let feedback = created.body["id"].as_i64().unwrap();
    let path = format!("/api/feedback/{feedback}");

    let response = app
        .request(
            "POST",
            "/api/feedback",
            Some(json!({ "subject": "Site praise", "message": "Lovely archive" })),
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let own = app.request("GET", "/api/feedback", None, Some(&visitor)).await;
    assert_eq!(own.body.as_array().unwrap().len(), 1);
    let all = app.request("GET", "/api/feedback", None, Some(&archivist)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 2);

    let response = app.request("GET", &path, None, Some(&other)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &path, Some(json!({ "status": "resolved" })), Some(&visitor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "reviewed", "priority": "high" })),
            Some(&archivist),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "reviewed");
    assert_eq!(response.body["priority"], "high");

    let reviewed = app
        .request("GET", "/api/feedback?status=reviewed", None, Some(&archivist))
        .await;
    assert_eq!(reviewed.body.as_array().unwrap().len(), 1);

    let for_doc = app
        .request("GET", &format!("/api/feedback/document/{doc}"), None, Some(&other))
        .await;
    assert_eq!(for_doc.body.as_array().unwrap().len(), 0);

    let response = app.request("DELETE", &path, None, Some(&visitor)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_feedback_validation() {
    let app = helpers::TestApp::new().await;
    let visitor = app.register_token("Pat Public", "pat@example.com", "public").await;

    let response = app
        .request(
            "POST",
            "/api/feedback",
            Some(json!({ "subject": "", "message": "Body" })),
            Some(&visitor),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/feedback",
            Some(json!({ "documentId": 404, "subject": "Missing", "message": "Body" })),
            Some(&visitor),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
