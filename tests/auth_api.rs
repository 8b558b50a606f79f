mod common;

use serde_json::{json, Value};

use common::{register, spawn_server};

#[tokio::test]
async fn register_returns_token_and_role_profile() {
    let server = spawn_server().await;

    let (token, user) = register(&server, "Maya Santos", "maya@example.com", "agent").await;
    assert!(!token.is_empty());
    assert_eq!(user["email"], "maya@example.com");
    assert_eq!(user["role"], "agent");
    assert!(user.get("password_hash").is_none());

    // The role-extension row exists and starts unverified.
    let response = server
        .get("/api/agents")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let agents: Value = response.json();
    assert_eq!(agents.as_array().unwrap().len(), 1);
    assert_eq!(agents[0]["is_verified"], false);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let server = spawn_server().await;
    register(&server, "First", "dup@example.com", "buyer").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Second",
            "email": "dup@example.com",
            "password": "password123",
            "role": "buyer",
        }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let server = spawn_server().await;
    register(&server, "Kai", "kai@example.com", "buyer").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "kai@example.com", "password": "not-the-password" }))
        .await;
    assert_eq!(response.status_code(), 401);

    // Unknown email gets the same answer as a bad password.
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn login_succeeds_and_token_opens_protected_routes() {
    let server = spawn_server().await;
    register(&server, "Lena", "lena@example.com", "buyer").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "lena@example.com", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let token = body["token"].as_str().unwrap();

    let response = server
        .get("/api/users/me")
        .authorization_bearer(token)
        .await;
    assert_eq!(response.status_code(), 200);
    let me: Value = response.json();
    assert_eq!(me["name"], "Lena");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_garbage_tokens() {
    let server = spawn_server().await;

    let response = server.get("/api/users/me").await;
    assert_eq!(response.status_code(), 401);

    let response = server
        .get("/api/users/me")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), 401);
}
