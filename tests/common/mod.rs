#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use casalink::{config::AppConfig, create_app};

/// In-memory database, one connection so every request sees the same data.
pub async fn spawn_server() -> TestServer {
    let (server, _pool) = spawn_server_with_pool().await;
    server
}

/// Like `spawn_server`, but hands back the pool for tests that need to
/// mutate the database directly.
pub async fn spawn_server_with_pool() -> (TestServer, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let storage = std::env::temp_dir().join(format!("casalink-test-{}", uuid::Uuid::new_v4()));

    let config = AppConfig {
        jwt_secret: "integration-test-secret".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        database_pool: pool.clone(),
        file_storage_path: storage.to_string_lossy().into_owned(),
        openrouter_api_key: None,
        openrouter_model: "openchat/openchat-7b".to_string(),
    };

    let server = TestServer::new(create_app(config)).expect("test server");
    (server, pool)
}

/// Registers a user and returns their token plus the user object.
pub async fn register(server: &TestServer, name: &str, email: &str, role: &str) -> (String, Value) {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123",
            "phone_number": "0123456789",
            "role": role,
        }))
        .await;
    assert_eq!(response.status_code(), 200, "register {}: {}", email, response.text());
    let body: Value = response.json();
    let token = body["token"].as_str().expect("token").to_string();
    (token, body["user"].clone())
}

pub async fn create_property(server: &TestServer, agent_token: &str, title: &str) -> i64 {
    let response = server
        .post("/api/properties")
        .authorization_bearer(agent_token)
        .json(&json!({
            "title": title,
            "description": "Two-storey house near the river",
            "price": 250_000,
            "location": "Riverside District",
            "beds": 3,
            "baths": 2,
            "listing_type": "for_sale",
        }))
        .await;
    assert_eq!(response.status_code(), 200, "create property: {}", response.text());
    let body: Value = response.json();
    body["id"].as_i64().expect("property id")
}

pub async fn open_inquiry(
    server: &TestServer,
    buyer_token: &str,
    property_id: i64,
    message: &str,
) -> i64 {
    let response = server
        .post(&format!("/api/properties/{}/inquire", property_id))
        .authorization_bearer(buyer_token)
        .json(&json!({ "message": message }))
        .await;
    assert_eq!(response.status_code(), 200, "open inquiry: {}", response.text());
    let body: Value = response.json();
    body["id"].as_i64().expect("inquiry id")
}

pub async fn post_message(
    server: &TestServer,
    token: &str,
    inquiry_id: i64,
    message: &str,
) -> Value {
    let response = server
        .post(&format!("/api/inquiries/{}/messages", inquiry_id))
        .authorization_bearer(token)
        .json(&json!({ "message": message }))
        .await;
    assert_eq!(response.status_code(), 200, "post message: {}", response.text());
    response.json()
}

/// Builds a raw multipart/form-data body; text fields then optional file part.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
