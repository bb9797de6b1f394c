// store/rest.rs - reqwest client for the remote table store
//
// Speaks the store's REST dialect: `/rest/v1/{table}` endpoints, equality
// filters as `column=eq.value` query parameters, `Range` header pagination,
// and `Prefer: return=representation` on inserts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RANGE;
use serde_json::Value;
use url::Url;

use crate::config::StoreConfig;

use super::{validate_identifier, ListQuery, Row, StoreError, TableStore};

pub struct RestTableStore {
    client: reqwest::Client,
    base: Url,
    api_key: String,
}

impl RestTableStore {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        if base_url.is_empty() {
            return Err(StoreError::Config("STORE_URL is not set".to_string()));
        }

        let base = Url::parse(base_url)
            .map_err(|e| StoreError::Config(format!("invalid STORE_URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base,
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(&config.url, &config.api_key, config.request_timeout_secs)
    }

    fn endpoint(&self, table: &str) -> Result<Url, StoreError> {
        if !validate_identifier(table) {
            return Err(StoreError::InvalidTable(table.to_string()));
        }
        self.base
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| StoreError::Config(format!("cannot build endpoint for {table}: {e}")))
    }

    async fn decode_rows(&self, table: &str, response: reqwest::Response) -> Result<Vec<Row>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                table: table.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Row>, StoreError> {
        let mut url = self.endpoint(table)?;

        for (column, _) in &query.filters {
            if !validate_identifier(column) {
                return Err(StoreError::InvalidColumn(column.clone()));
            }
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", query.select.as_deref().unwrap_or("*"));
            for (column, value) in &query.filters {
                pairs.append_pair(column, &format!("eq.{value}"));
            }
        }

        let mut request = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key);

        if let Some(page) = query.page {
            let (from, to) = page.range();
            request = request.header(RANGE, format!("{from}-{to}"));
        }

        let response = request.send().await?;
        self.decode_rows(table, response).await
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Row>, StoreError> {
        let rows = self
            .list(table, ListQuery::new().eq("id", id).page(1, 1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, table: &str, record: Value) -> Result<Vec<Row>, StoreError> {
        let url = self.endpoint(table)?;

        let response = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;

        self.decode_rows(table, response).await
    }
}
