use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::contract::{Contract, ContractSummary, UpdateContractRequest};

const CONTRACT_COLUMNS: &str =
    "id, property_id, buyer_id, agents_id, status, contract_detail, pdf_path, created_at";

pub struct ContractRepository {
    pool: SqlitePool,
}

impl ContractRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        property_id: i64,
        buyer_id: i64,
        agents_id: i64,
        status: &str,
        contract_detail: Option<&str>,
    ) -> Result<Contract> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO contracts (property_id, buyer_id, agents_id, status, contract_detail, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(property_id)
        .bind(buyer_id)
        .bind(agents_id)
        .bind(status)
        .bind(contract_detail)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Contract {
            id,
            property_id,
            buyer_id,
            agents_id,
            status: status.to_string(),
            contract_detail: contract_detail.map(str::to_string),
            pdf_path: None,
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(contract)
    }

    pub async fn list(&self) -> Result<Vec<Contract>> {
        let contracts = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(contracts)
    }

    pub async fn update(&self, id: i64, request: &UpdateContractRequest) -> Result<Option<Contract>> {
        let result = sqlx::query(
            "UPDATE contracts
             SET status = COALESCE(?, status),
                 contract_detail = COALESCE(?, contract_detail)
             WHERE id = ?",
        )
        .bind(&request.status)
        .bind(&request.contract_detail)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_pdf_path(&self, id: i64, pdf_path: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE contracts SET pdf_path = ? WHERE id = ?")
            .bind(pdf_path)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Buyer's contracts with the agent's name as counterpart.
    pub async fn list_for_buyer(&self, buyer_id: i64) -> Result<Vec<ContractSummary>> {
        let contracts = sqlx::query_as::<_, ContractSummary>(
            "SELECT c.id, c.property_id, c.buyer_id, c.agents_id, c.status, c.created_at,
                    p.title AS property_title, u.name AS counterpart_name
             FROM contracts c
             JOIN properties p ON c.property_id = p.id
             JOIN agents a ON c.agents_id = a.id
             JOIN users u ON a.users_id = u.id
             WHERE c.buyer_id = ?
             ORDER BY c.created_at DESC",
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contracts)
    }

    /// Agent's contracts with the buyer's name as counterpart.
    pub async fn list_for_agent(&self, agents_id: i64) -> Result<Vec<ContractSummary>> {
        let contracts = sqlx::query_as::<_, ContractSummary>(
            "SELECT c.id, c.property_id, c.buyer_id, c.agents_id, c.status, c.created_at,
                    p.title AS property_title, u.name AS counterpart_name
             FROM contracts c
             JOIN properties p ON c.property_id = p.id
             JOIN buyers b ON c.buyer_id = b.id
             JOIN users u ON b.users_id = u.id
             WHERE c.agents_id = ?
             ORDER BY c.created_at DESC",
        )
        .bind(agents_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contracts)
    }
}
