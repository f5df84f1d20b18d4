use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin client for the PostgREST-style document store holding the
/// appointment collection.
pub struct DocumentStoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DocumentStoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            api_key: config.store_api_key.clone(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| anyhow!("store api key is not a valid header value"))?;
        headers.insert("apikey", key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| anyhow!("store api key is not a valid header value"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T>(&self, table: &str, row: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("Inserting row into {}", url);

        let mut headers = self.headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let response = self
            .client
            .request(Method::POST, &url)
            .headers(headers)
            .json(&row)
            .send()
            .await?;

        // The store answers inserts with an array of the written rows.
        let mut rows: Vec<T> = Self::decode(response).await?;
        rows.pop()
            .ok_or_else(|| anyhow!("store returned no representation for inserted row"))
    }

    /// Run a filtered select against one table.
    pub async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("Querying {} with {:?}", url, query);

        let response = self
            .client
            .request(Method::GET, &url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Store resource not found: {}", error_text),
                _ => anyhow!("Store API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}
