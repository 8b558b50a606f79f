use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: i64,
    pub property_id: i64,
    pub buyer_id: i64,
    pub agents_id: i64,
    pub status: String,
    pub contract_detail: Option<String>,
    pub pdf_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub property_id: i64,
    pub buyer_id: i64,
    pub agents_id: i64,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub contract_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContractRequest {
    pub status: Option<String>,
    pub contract_detail: Option<String>,
}

/// Contract joined with property title and counterpart name for the
/// per-party listing endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContractSummary {
    pub id: i64,
    pub property_id: i64,
    pub buyer_id: i64,
    pub agents_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub counterpart_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeContractRequest {
    /// Optional follow-up question; omitted means "summarize the contract".
    pub question: Option<String>,
}
