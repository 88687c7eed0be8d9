//! Reference records and the read-only store client.
//!
//! Records are fetched fresh per request and discarded afterwards. The
//! store is a PostgREST-style hosted backend: an unfiltered `select=*` GET
//! per collection, authenticated with a server-side service key.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PipelineError;

/// One frequently-asked-question pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// One priced service line item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceItem {
    pub name: String,
    pub base_price: f64,
    pub unit_type: String,
    pub description: String,
}

/// Read-only access to the two reference collections. The handler composes
/// against this seam so tests can substitute canned data.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_faqs(&self) -> Result<Vec<FaqEntry>, PipelineError>;
    async fn fetch_pricing(&self) -> Result<Vec<PriceItem>, PipelineError>;
}

/// Store client over the hosted backend's REST interface.
pub struct RestReferenceStore {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl RestReferenceStore {
    pub fn new(base_url: String, service_key: String) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("copydesk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            client,
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, PipelineError> {
        let url = format!("{}/rest/v1/{}?select=*", self.base_url, collection);

        let res = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await
            .map_err(|e| PipelineError::DataSource(format!("{collection} fetch failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::DataSource(format!(
                "{collection} fetch returned {status}: {body}"
            )));
        }

        let rows: Vec<T> = res.json().await.map_err(|e| {
            PipelineError::DataSource(format!("Failed to parse {collection} rows: {e}"))
        })?;

        debug!(collection, count = rows.len(), "fetched reference records");
        Ok(rows)
    }
}

#[async_trait]
impl ReferenceSource for RestReferenceStore {
    async fn fetch_faqs(&self) -> Result<Vec<FaqEntry>, PipelineError> {
        self.fetch_rows("faqs").await
    }

    async fn fetch_pricing(&self) -> Result<Vec<PriceItem>, PipelineError> {
        self.fetch_rows("pricing").await
    }
}
