mod common;

use serde_json::Value;

use common::{multipart_body, register, spawn_server};

const BOUNDARY: &str = "----casalink-test-boundary";

#[tokio::test]
async fn sos_requires_a_description() {
    let server = spawn_server().await;
    let (token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let body = multipart_body(BOUNDARY, &[("latitude", "14.5995")], None);
    let response = server
        .post("/api/sos/analyze")
        .authorization_bearer(&token)
        .content_type(&format!("multipart/form-data; boundary={}", BOUNDARY))
        .bytes(body.into())
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Description is required");
}

#[tokio::test]
async fn sos_report_is_stored_and_admins_are_alerted() {
    let server = spawn_server().await;
    let (admin_token, _) = register(&server, "Admin", "admin@example.com", "admin").await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let body = multipart_body(
        BOUNDARY,
        &[
            ("description", "Suspicious person at the open house"),
            ("latitude", "14.5995"),
            ("longitude", "120.9842"),
        ],
        None,
    );
    let response = server
        .post("/api/sos/analyze")
        .authorization_bearer(&buyer_token)
        .content_type(&format!("multipart/form-data; boundary={}", BOUNDARY))
        .bytes(body.into())
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let payload: Value = response.json();
    assert_eq!(
        payload["report"]["description"],
        "Suspicious person at the open house"
    );
    // No chat-completion key configured: the report survives without triage.
    assert!(payload["report"]["assessment"].is_null());

    let response = server
        .get("/api/notifications")
        .authorization_bearer(&admin_token)
        .await;
    let notifications: Value = response.json();
    let notifications = notifications.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "system");
}

#[tokio::test]
async fn sos_media_capture_is_stored_alongside_the_report() {
    let server = spawn_server().await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let body = multipart_body(
        BOUNDARY,
        &[("description", "Broken lock on the unit")],
        Some(("file", "capture.jpg", "image/jpeg", b"\xff\xd8\xff\xe0 fake jpeg")),
    );
    let response = server
        .post("/api/sos/analyze")
        .authorization_bearer(&buyer_token)
        .content_type(&format!("multipart/form-data; boundary={}", BOUNDARY))
        .bytes(body.into())
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
    let payload: Value = response.json();
    let media_path = payload["report"]["media_path"].as_str().unwrap();
    assert!(media_path.ends_with("capture.jpg"));
}
