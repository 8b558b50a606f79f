mod common;

use serde_json::Value;

use common::{create_property, register, spawn_server};

#[tokio::test]
async fn admin_routes_are_role_gated() {
    let server = spawn_server().await;
    let (buyer_token, _) = register(&server, "Buyer", "buyer@example.com", "buyer").await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(&buyer_token)
        .await;
    assert_eq!(response.status_code(), 403);

    let response = server
        .put("/api/admin/verify-agent/1")
        .authorization_bearer(&buyer_token)
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn dashboard_reports_totals_and_pending_counts() {
    let server = spawn_server().await;
    let (admin_token, _) = register(&server, "Admin", "admin@example.com", "admin").await;
    let (agent_token, _) = register(&server, "Agent", "agent@example.com", "agent").await;
    register(&server, "Buyer", "buyer@example.com", "buyer").await;
    create_property(&server, &agent_token, "Casa Uno").await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), 200);
    let dashboard: Value = response.json();
    assert_eq!(dashboard["total_users"], 3);
    assert_eq!(dashboard["total_agents"], 1);
    assert_eq!(dashboard["total_buyers"], 1);
    assert_eq!(dashboard["total_properties"], 1);
    assert_eq!(dashboard["pending_agents"], 1);
    assert_eq!(dashboard["pending_buyers"], 1);
    assert_eq!(dashboard["pending_properties"], 1);
}

#[tokio::test]
async fn verification_empties_the_pending_queues() {
    let server = spawn_server().await;
    let (admin_token, _) = register(&server, "Admin", "admin@example.com", "admin").await;
    register(&server, "Agent", "agent@example.com", "agent").await;

    let pending: Value = server
        .get("/api/admin/pending-agents")
        .authorization_bearer(&admin_token)
        .await
        .json();
    let agent_id = pending[0]["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/admin/verify-agent/{}", agent_id))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), 200);

    let pending: Value = server
        .get("/api/admin/pending-agents")
        .authorization_bearer(&admin_token)
        .await
        .json();
    assert!(pending.as_array().unwrap().is_empty());

    // Verifying the same id again still succeeds; a missing id does not.
    let response = server
        .put(&format!("/api/admin/verify-agent/{}", agent_id))
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), 200);

    let response = server
        .put("/api/admin/verify-agent/9999")
        .authorization_bearer(&admin_token)
        .await;
    assert_eq!(response.status_code(), 404);
}
