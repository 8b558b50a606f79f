mod common;

use serde_json::{json, Value};

use common::{create_property, open_inquiry, post_message, register, spawn_server};

#[tokio::test]
async fn a_new_inquiry_notifies_the_agent_with_a_clipped_preview() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent", "agent@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Rosa Lim", "rosa@example.com", "buyer").await;
    let property_id = create_property(&server, &agent_token, "Palm Grove Estate").await;

    let long_message = "a".repeat(80);
    open_inquiry(&server, &buyer_token, property_id, &long_message).await;

    let response = server
        .get("/api/notifications")
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 200);
    let notifications: Value = response.json();
    let notifications = notifications.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "property_inquiry");
    assert_eq!(notifications[0]["is_read"], false);

    let expected_preview = format!("{}...", "a".repeat(50));
    let expected = format!(
        "New inquiry for \"Palm Grove Estate\" from Rosa Lim: \"{}\"",
        expected_preview
    );
    assert_eq!(notifications[0]["message"], expected);
}

#[tokio::test]
async fn a_reply_notifies_the_counterpart_only() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent Ana", "ana@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;
    let property_id = create_property(&server, &agent_token, "Hillside Duplex").await;
    let inquiry_id = open_inquiry(&server, &buyer_token, property_id, "Opening").await;

    post_message(&server, &agent_token, inquiry_id, "We can schedule a viewing").await;

    let response = server
        .get("/api/notifications")
        .authorization_bearer(&buyer_token)
        .await;
    let notifications: Value = response.json();
    let notifications = notifications.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0]["message"],
        "New message for property \"Hillside Duplex\" from Agent Ana"
    );

    // The agent still only has the original inquiry notification.
    let response = server
        .get("/api/notifications")
        .authorization_bearer(&agent_token)
        .await;
    let notifications: Value = response.json();
    assert_eq!(notifications.as_array().unwrap().len(), 1);
    assert_eq!(notifications[0]["type"], "property_inquiry");
}

#[tokio::test]
async fn unread_count_and_bulk_mark_read() {
    let server = spawn_server().await;
    let (agent_token, _) = register(&server, "Agent", "agent@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;
    let property_id = create_property(&server, &agent_token, "Casa Verde").await;
    open_inquiry(&server, &buyer_token, property_id, "One").await;
    open_inquiry(&server, &buyer_token, property_id, "Two").await;

    let response = server
        .get("/api/notifications/unread-count")
        .authorization_bearer(&agent_token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["count"], 2);

    let response = server
        .post("/api/notifications/mark-read")
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 200);

    let response = server
        .get("/api/notifications/unread-count")
        .authorization_bearer(&agent_token)
        .await;
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn purchase_requests_create_explicit_notifications() {
    let server = spawn_server().await;
    let (agent_token, agent_user) = register(&server, "Agent", "agent@example.com", "agent").await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let response = server
        .post("/api/notifications")
        .authorization_bearer(&buyer_token)
        .json(&json!({
            "recipient_id": agent_user["id"],
            "type": "property_purchase",
            "message": "Buyer wants to purchase Casa Verde",
            "related_id": 1,
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    let created: Value = response.json();
    assert_eq!(created["type"], "property_purchase");

    let response = server
        .get("/api/notifications")
        .authorization_bearer(&agent_token)
        .await;
    let notifications: Value = response.json();
    assert_eq!(notifications[0]["message"], "Buyer wants to purchase Casa Verde");
}
