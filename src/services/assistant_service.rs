//! Chat-completion client for the auxiliary AI features: contract
//! summarization/Q&A, property value estimates, and SOS triage notes.
//! Responses are surfaced verbatim to the caller; nothing here is parsed
//! back into structured data.

use serde_json::{json, Value};

use crate::middleware::error_handling::{AppError, Result};
use crate::models::contract::Contract;
use crate::models::property::EstimateRequest;

const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub struct AssistantService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl AssistantService {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Upstream("AI assistant is not configured".to_string()))?;

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Chat completion API returned {}", status);
            return Err(AppError::Upstream(format!(
                "Chat completion API returned {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Upstream("Malformed chat completion response".to_string()))
    }

    pub async fn estimate_property_value(&self, property: &EstimateRequest) -> Result<String> {
        let prompt = format!(
            "You are a real estate expert. Estimate the market value of this property in USD \
             and explain your reasoning.\n\
             Details:\n\
             - Location: {}\n\
             - Property Type: {}\n\
             - Floor Area: {} sqm\n\
             - Bedrooms: {}\n\
             - Bathrooms: {}\n\
             - Building Age: {} years\n\
             - Amenities: {}\n\
             - Nearby: {}",
            property.location,
            property.property_type.as_deref().unwrap_or("unspecified"),
            property.area.map(|a| a.to_string()).unwrap_or_else(|| "unspecified".into()),
            property.bedrooms.map(|b| b.to_string()).unwrap_or_else(|| "unspecified".into()),
            property.bathrooms.map(|b| b.to_string()).unwrap_or_else(|| "unspecified".into()),
            property.age.map(|a| a.to_string()).unwrap_or_else(|| "unspecified".into()),
            property.amenities.join(", "),
            property.nearby.join(", "),
        );
        self.chat(&prompt).await
    }

    /// Summarize or answer a follow-up question about a contract. The
    /// stored contract detail text is what gets forwarded; extracting text
    /// from the PDF itself happens upstream of this service.
    pub async fn analyze_contract(
        &self,
        contract: &Contract,
        question: Option<&str>,
    ) -> Result<String> {
        let detail = contract
            .contract_detail
            .as_deref()
            .unwrap_or("(no contract details on file)");

        let mut prompt = format!(
            "You are a real estate expert. You are given a contract created by a real estate \
             agent. Assist the buyer in summarizing and explaining the contract details, \
             including the terms, conditions, and any other relevant information. If the \
             contract is disadvantageous to the buyer, suggest renegotiating the terms and \
             provide a revision that would be fair for both parties.\n\
             Contract status: {}\n\
             Here is the contract: {}",
            contract.status, detail
        );
        if let Some(question) = question {
            prompt.push_str(&format!("\n\nThe buyer asks: {}", question));
        }
        self.chat(&prompt).await
    }

    pub async fn triage_sos(&self, description: &str) -> Result<String> {
        let prompt = format!(
            "You are an emergency dispatcher assistant. A user of a real estate platform has \
             sent an SOS report. Assess the urgency and suggest what responders should know, \
             in at most three sentences.\n\
             Report: {}",
            description
        );
        self.chat(&prompt).await
    }
}
