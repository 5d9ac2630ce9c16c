//! Record store backed by a json-server style REST resource

use crate::config::{ConfigError, ProxyConfig};
use crate::core::entity::MenuEntity;
use crate::core::store::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

/// HTTP client for one collection, e.g. `http://localhost:3001/menuItems`
///
/// The `reqwest::Client` is shared and pools its own connections. No
/// timeout is set beyond the client's defaults.
#[derive(Clone)]
pub struct HttpRecordStore {
    client: Client,
    collection: Url,
}

impl HttpRecordStore {
    /// Point at `resource` under `origin`
    pub fn new(origin: &str, resource: &str) -> Result<Self, ConfigError> {
        Self::with_client(Client::new(), origin, resource)
    }

    /// Same as [`new`](Self::new) with a caller-supplied client
    pub fn with_client(client: Client, origin: &str, resource: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: "store_origin".to_string(),
            reason,
        };

        let mut collection = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
        if collection.cannot_be_a_base() {
            return Err(invalid(format!("'{}' cannot be used as a base URL", origin)));
        }
        collection
            .path_segments_mut()
            .map_err(|_| invalid(format!("'{}' cannot be used as a base URL", origin)))?
            .pop_if_empty()
            .push(resource);

        Ok(Self { client, collection })
    }

    /// Store for `E`, honouring a configured collection name
    pub fn from_config<E: MenuEntity>(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let resource = config
            .store_resource
            .as_deref()
            .unwrap_or(E::store_resource());
        Self::new(&config.store_origin, resource)
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn send(request: reqwest::RequestBuilder) -> StoreResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "record store request failed");
            StoreError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::warn!(status = %status, url = %response.url(), "record store returned an error status");
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            other => Err(StoreError::Status(other)),
        }
    }

    async fn json(response: reqwest::Response) -> StoreResult<Value> {
        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, query: &[(String, String)]) -> StoreResult<Value> {
        let request = self
            .client
            .get(self.collection.clone())
            .query(query)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        Self::json(Self::send(request).await?).await
    }

    async fn get(&self, id: &str) -> StoreResult<Value> {
        let request = self.client.get(self.record_url(id));
        Self::json(Self::send(request).await?).await
    }

    async fn create(&self, record: Value) -> StoreResult<Value> {
        let request = self.client.post(self.collection.clone()).json(&record);
        Self::json(Self::send(request).await?).await
    }

    async fn update(&self, id: &str, record: Value) -> StoreResult<Value> {
        let request = self.client.put(self.record_url(id)).json(&record);
        Self::json(Self::send(request).await?).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        Self::send(self.client.delete(self.record_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FoodItem, MenuItem};

    #[test]
    fn test_collection_url_joins_resource() {
        let store = HttpRecordStore::new("http://localhost:3001", "menuItems").unwrap();
        assert_eq!(store.collection_url().as_str(), "http://localhost:3001/menuItems");

        let store = HttpRecordStore::new("http://store.local/api/", "menuItems").unwrap();
        assert_eq!(store.collection_url().as_str(), "http://store.local/api/menuItems");
    }

    #[test]
    fn test_record_url_escapes_id() {
        let store = HttpRecordStore::new("http://localhost:3001", "foodItems").unwrap();
        assert_eq!(
            store.record_url("a b").as_str(),
            "http://localhost:3001/foodItems/a%20b"
        );
    }

    #[test]
    fn test_invalid_origin() {
        assert!(HttpRecordStore::new("not a url", "menuItems").is_err());
        assert!(HttpRecordStore::new("mailto:chef@example.com", "menuItems").is_err());
    }

    #[test]
    fn test_from_config_uses_entity_resource() {
        let config = ProxyConfig::default();
        let store = HttpRecordStore::from_config::<FoodItem>(&config).unwrap();
        assert!(store.collection_url().as_str().ends_with("/foodItems"));

        let config = ProxyConfig {
            store_resource: Some("dishes".to_string()),
            ..ProxyConfig::default()
        };
        let store = HttpRecordStore::from_config::<MenuItem>(&config).unwrap();
        assert!(store.collection_url().as_str().ends_with("/dishes"));
    }
}
