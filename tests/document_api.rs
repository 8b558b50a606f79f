mod common;

use axum_test::TestServer;
use serde_json::Value;

use common::{multipart_body, register, spawn_server};

const BOUNDARY: &str = "----casalink-test-boundary";

async fn upload_document(
    server: &TestServer,
    path: &str,
    token: &str,
    file: Option<(&str, &str, &str, &[u8])>,
) -> axum_test::TestResponse {
    let body = multipart_body(BOUNDARY, &[], file);
    server
        .post(path)
        .authorization_bearer(token)
        .content_type(&format!("multipart/form-data; boundary={}", BOUNDARY))
        .bytes(body.into())
        .await
}

#[tokio::test]
async fn agent_uploads_verification_document() {
    let server = spawn_server().await;
    let (agent_token, agent_user) = register(&server, "Agent", "agent@example.com", "agent").await;

    let response = upload_document(
        &server,
        "/api/agents/upload-document",
        &agent_token,
        Some(("document", "license.pdf", "application/pdf", b"%PDF-1.4 license")),
    )
    .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["message"], "Document uploaded successfully");
    assert_eq!(body["file"]["user_id"], agent_user["id"]);
    assert!(body["file"]["file_url"].as_str().unwrap().ends_with("license.pdf"));
}

#[tokio::test]
async fn buyer_uploads_verification_document() {
    let server = spawn_server().await;
    let (buyer_token, buyer_user) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let response = upload_document(
        &server,
        "/api/buyers/upload-document",
        &buyer_token,
        Some(("document", "payslip.pdf", "application/pdf", b"%PDF-1.4 payslip")),
    )
    .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["message"], "Document uploaded successfully");
    assert_eq!(body["file"]["user_id"], buyer_user["id"]);
}

#[tokio::test]
async fn upload_routes_are_role_gated() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent", "agent@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let file = Some(("document", "id.pdf", "application/pdf", &b"%PDF-1.4"[..]));

    let response =
        upload_document(&server, "/api/agents/upload-document", &buyer_token, file).await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(
        response.json::<Value>()["error"],
        "Only agents can access this endpoint"
    );

    let response =
        upload_document(&server, "/api/buyers/upload-document", &agent_token, file).await;
    assert_eq!(response.status_code(), 403);
    assert_eq!(
        response.json::<Value>()["error"],
        "Only buyers can access this endpoint"
    );
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent", "agent@example.com", "agent").await;

    let response = upload_document(&server, "/api/agents/upload-document", &agent_token, None).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No file uploaded");
}

#[tokio::test]
async fn admin_lists_uploaded_documents_with_owner_details() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent Ana", "ana@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Buyer Ben", "ben@example.com", "buyer").await;
    let (admin_token, _) = register(&server, "Admin", "admin@example.com", "admin").await;

    upload_document(
        &server,
        "/api/agents/upload-document",
        &agent_token,
        Some(("document", "license.pdf", "application/pdf", b"%PDF license")),
    )
    .await;
    upload_document(
        &server,
        "/api/buyers/upload-document",
        &buyer_token,
        Some(("document", "payslip.pdf", "application/pdf", b"%PDF payslip")),
    )
    .await;

    let response = server
        .get("/api/admin/files")
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let files: Vec<Value> = response.json();
    assert_eq!(files.len(), 2);
    for file in &files {
        assert!(file["user_name"].is_string());
        assert!(file["user_role"].is_string());
        assert!(file["file_url"].is_string());
    }
    let roles: Vec<&str> = files.iter().map(|f| f["user_role"].as_str().unwrap()).collect();
    assert!(roles.contains(&"agent"));
    assert!(roles.contains(&"buyer"));

    // Non-admins cannot see the review list.
    let response = server
        .get("/api/admin/files")
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 403);
}
