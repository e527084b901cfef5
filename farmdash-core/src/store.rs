use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{
    Config,
    error::{StoreError, truncate_body},
    model::OrderRecord,
};

/// Read access to the `orders` table.
#[async_trait]
pub trait OrderStore: Send + Sync + Debug {
    /// All orders placed by `buyer_id`, filtered by the store.
    async fn orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<OrderRecord>, StoreError>;
}

/// PostgREST-style HTTP endpoint of a hosted Postgres project.
#[derive(Debug, Clone)]
pub struct RestOrderStore {
    base_url: String,
    api_key: String,
    http: Client,
}

impl RestOrderStore {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl OrderStore for RestOrderStore {
    async fn orders_for_buyer(&self, buyer_id: &str) -> Result<Vec<OrderRecord>, StoreError> {
        let url = format!("{}/rest/v1/orders", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("select", "*".to_string()), ("buyer_id", format!("eq.{buyer_id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Stand-in used when no store URL or key is configured; every query fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl OrderStore for UnconfiguredStore {
    async fn orders_for_buyer(&self, _buyer_id: &str) -> Result<Vec<OrderRecord>, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

/// Construct the order store from config.
pub fn store_from_config(config: &Config) -> Box<dyn OrderStore> {
    match (config.store_url(), config.store_api_key()) {
        (Some(url), Some(key)) => Box::new(RestOrderStore::new(url, key)),
        _ => Box::new(UnconfiguredStore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_store_reports_not_configured() {
        let store = store_from_config(&Config::default());
        let err = store.orders_for_buyer("buyer-1").await.unwrap_err();

        assert!(matches!(err, StoreError::NotConfigured));
    }

    #[test]
    fn rest_store_trims_base_url() {
        let store = RestOrderStore::new("https://project.example.co/", "key");
        assert_eq!(store.base_url, "https://project.example.co");
    }
}
