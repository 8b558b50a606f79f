mod common;

use serde_json::{json, Value};

use common::{multipart_body, register, spawn_server};

async fn setup_parties(server: &axum_test::TestServer) -> (String, i64, i64, i64) {
    let (agent_token, _) = register(server, "Agent", "agent@example.com", "agent").await;
    let (_, _) = register(server, "Buyer", "buyer@example.com", "buyer").await;

    let property_id = common::create_property(server, &agent_token, "Casa Contrato").await;

    let agents: Value = server
        .get("/api/agents")
        .authorization_bearer(&agent_token)
        .await
        .json();
    let agents_id = agents[0]["id"].as_i64().unwrap();

    let buyers: Value = server
        .get("/api/buyers")
        .authorization_bearer(&agent_token)
        .await
        .json();
    let buyer_id = buyers[0]["id"].as_i64().unwrap();

    (agent_token, property_id, buyer_id, agents_id)
}

#[tokio::test]
async fn contract_creation_validates_each_reference() {
    let server = spawn_server().await;
    let (agent_token, property_id, buyer_id, agents_id) = setup_parties(&server).await;

    let response = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": 9999,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
        }))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Property not found");

    let response = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": 9999,
            "agents_id": agents_id,
            "status": "draft",
        }))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Buyer not found");
}

#[tokio::test]
async fn contract_lifecycle_create_update_delete() {
    let server = spawn_server().await;
    let (agent_token, property_id, buyer_id, agents_id) = setup_parties(&server).await;

    let response = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
            "contract_detail": "Sale of Casa Contrato for 250000",
        }))
        .await;
    assert_eq!(response.status_code(), 200);
    let contract: Value = response.json();
    let contract_id = contract["id"].as_i64().unwrap();
    assert_eq!(contract["status"], "draft");

    // Partial update leaves untouched columns alone.
    let response = server
        .put(&format!("/api/contracts/{}", contract_id))
        .authorization_bearer(&agent_token)
        .json(&json!({ "status": "signed" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["status"], "signed");
    assert_eq!(updated["contract_detail"], "Sale of Casa Contrato for 250000");

    // Per-party listings join the property title and the counterpart name.
    let response = server
        .get(&format!("/api/contracts/buyer/{}", buyer_id))
        .authorization_bearer(&agent_token)
        .await;
    let listed: Value = response.json();
    assert_eq!(listed[0]["property_title"], "Casa Contrato");
    assert_eq!(listed[0]["counterpart_name"], "Agent");

    let response = server
        .delete(&format!("/api/contracts/{}", contract_id))
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 200);

    let response = server
        .get(&format!("/api/contracts/{}", contract_id))
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn pdf_upload_rejects_non_pdf_content() {
    let server = spawn_server().await;
    let (agent_token, property_id, buyer_id, agents_id) = setup_parties(&server).await;

    let contract: Value = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
        }))
        .await
        .json();
    let contract_id = contract["id"].as_i64().unwrap();

    let boundary = "----casalink-test-boundary";
    let body = multipart_body(
        boundary,
        &[("contract_id", &contract_id.to_string())],
        Some(("pdf", "notes.txt", "text/plain", b"plain text")),
    );
    let response = server
        .post("/api/contracts/upload-pdf")
        .authorization_bearer(&agent_token)
        .content_type(&format!("multipart/form-data; boundary={}", boundary))
        .bytes(body.into())
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"],
        "Only PDF files are allowed"
    );
}

#[tokio::test]
async fn pdf_upload_and_download_round_trip() {
    let server = spawn_server().await;
    let (agent_token, property_id, buyer_id, agents_id) = setup_parties(&server).await;

    let contract: Value = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
        }))
        .await
        .json();
    let contract_id = contract["id"].as_i64().unwrap();

    let pdf_bytes = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF";
    let boundary = "----casalink-test-boundary";
    let body = multipart_body(
        boundary,
        &[("contract_id", &contract_id.to_string())],
        Some(("pdf", "agreement.pdf", "application/pdf", pdf_bytes)),
    );
    let response = server
        .post("/api/contracts/upload-pdf")
        .authorization_bearer(&agent_token)
        .content_type(&format!("multipart/form-data; boundary={}", boundary))
        .bytes(body.into())
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());

    let response = server
        .get(&format!("/api/contracts/{}/pdf", contract_id))
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), &pdf_bytes[..]);

    // A contract without an attached PDF is a 404.
    let bare: Value = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
        }))
        .await
        .json();
    let response = server
        .get(&format!("/api/contracts/{}/pdf", bare["id"].as_i64().unwrap()))
        .authorization_bearer(&agent_token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn analysis_without_an_api_key_degrades_to_bad_gateway() {
    let server = spawn_server().await;
    let (agent_token, property_id, buyer_id, agents_id) = setup_parties(&server).await;

    let contract: Value = server
        .post("/api/contracts")
        .authorization_bearer(&agent_token)
        .json(&json!({
            "property_id": property_id,
            "buyer_id": buyer_id,
            "agents_id": agents_id,
            "status": "draft",
            "contract_detail": "Terms and conditions",
        }))
        .await
        .json();

    let response = server
        .post(&format!(
            "/api/contracts/{}/analyze",
            contract["id"].as_i64().unwrap()
        ))
        .authorization_bearer(&agent_token)
        .json(&json!({ "question": "Is the deposit refundable?" }))
        .await;
    assert_eq!(response.status_code(), 502);
}
