use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use super::error::StoreError;
use crate::model::income::IncomeRecord;

/// Reads the income table through a PostgREST endpoint (Supabase style).
pub struct RestIncomeStore {
    client: Client,
    endpoint: String,
    anon_key: String,
}

/// Full-column select, newest first.
pub fn records_endpoint(base_url: &str, table: &str) -> String {
    format!(
        "{}/rest/v1/{}?select=*&order=time.desc",
        base_url.trim_end_matches('/'),
        table
    )
}

impl RestIncomeStore {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: records_endpoint(base_url, table),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(name = "rest_fetch_all", skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_all(&self) -> Result<Vec<IncomeRecord>, StoreError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let records: Vec<IncomeRecord> = resp.json().await?;
        debug!(count = records.len(), "Income rows received");
        Ok(records)
    }
}
