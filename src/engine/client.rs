//! Meilisearch HTTP client.
//!
//! One `reqwest::Client` shared across all tool calls, with the API key (when
//! configured) installed as a default bearer header so every request carries
//! it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::SearchEngine;
use super::error::{ApiError, EngineError, EngineResult};
use super::types::{
    Document, DocumentsPage, DocumentsQuery, Health, IndexView, IndexesPage, SearchQuery,
    SearchResults, TaskInfo,
};
use crate::config::MeilisearchConfig;

/// `POST /indexes` request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateIndexBody<'a> {
    uid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_key: Option<&'a str>,
}

pub struct MeilisearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl MeilisearchClient {
    /// Build a client from connection settings without touching the network.
    pub fn new(config: &MeilisearchConfig) -> EngineResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(EngineError::Init)?;

        Ok(Self {
            http,
            base_url: config.host.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client and verify the engine answers before using it.
    pub async fn connect(config: &MeilisearchConfig) -> EngineResult<Self> {
        let client = Self::new(config)?;
        let health = client.health().await?;
        tracing::info!(
            host = %client.base_url,
            status = %health.status,
            "connected to Meilisearch"
        );
        Ok(client)
    }

    /// Base URL this client talks to.
    pub fn host(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the response.
    ///
    /// Non-success statuses decode the engine's error payload when possible;
    /// otherwise the raw body is kept for diagnostics.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> EngineResult<T> {
        let request = request.build().map_err(EngineError::Request)?;
        let url = request.url().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| EngineError::Transport { url, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(error) => EngineError::Api {
                    status: status.as_u16(),
                    error,
                },
                Err(_) => EngineError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        response.json().await.map_err(EngineError::Decode)
    }
}

#[async_trait]
impl SearchEngine for MeilisearchClient {
    async fn health(&self) -> EngineResult<Health> {
        self.execute(self.http.get(self.url("/health"))).await
    }

    async fn list_indexes(&self, limit: i64) -> EngineResult<Vec<IndexView>> {
        let page: IndexesPage = self
            .execute(
                self.http
                    .get(self.url("/indexes"))
                    .query(&[("limit", limit)]),
            )
            .await?;
        Ok(page.results)
    }

    async fn create_index(
        &self,
        uid: &str,
        primary_key: Option<&str>,
    ) -> EngineResult<TaskInfo> {
        self.execute(
            self.http
                .post(self.url("/indexes"))
                .json(&CreateIndexBody { uid, primary_key }),
        )
        .await
    }

    async fn search(
        &self,
        index_uid: &str,
        query: SearchQuery,
    ) -> EngineResult<SearchResults> {
        self.execute(
            self.http
                .post(self.url(&format!("/indexes/{index_uid}/search")))
                .json(&query),
        )
        .await
    }

    async fn get_documents(
        &self,
        index_uid: &str,
        query: DocumentsQuery,
    ) -> EngineResult<DocumentsPage> {
        self.execute(
            self.http
                .get(self.url(&format!("/indexes/{index_uid}/documents")))
                .query(&query.to_query_pairs()),
        )
        .await
    }

    async fn add_documents(
        &self,
        index_uid: &str,
        documents: Vec<Document>,
        primary_key: Option<&str>,
    ) -> EngineResult<TaskInfo> {
        let mut request = self
            .http
            .post(self.url(&format!("/indexes/{index_uid}/documents")))
            .json(&documents);
        if let Some(primary_key) = primary_key {
            request = request.query(&[("primaryKey", primary_key)]);
        }
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> MeilisearchConfig {
        MeilisearchConfig {
            host: host.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_url_joins_path() {
        let client = MeilisearchClient::new(&config("http://localhost:7700")).unwrap();
        assert_eq!(client.url("/health"), "http://localhost:7700/health");
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = MeilisearchClient::new(&config("http://localhost:7700/")).unwrap();
        assert_eq!(
            client.url("/indexes/movies/search"),
            "http://localhost:7700/indexes/movies/search"
        );
    }

    #[test]
    fn test_new_accepts_api_key() {
        let mut cfg = config("http://localhost:7700");
        cfg.api_key = Some("masterKey".to_string());
        assert!(MeilisearchClient::new(&cfg).is_ok());
    }

    #[test]
    fn test_new_rejects_control_characters_in_api_key() {
        let mut cfg = config("http://localhost:7700");
        cfg.api_key = Some("bad\nkey".to_string());
        assert!(matches!(
            MeilisearchClient::new(&cfg),
            Err(EngineError::ApiKey(_))
        ));
    }

    #[test]
    fn test_create_index_body_omits_unset_primary_key() {
        let body = CreateIndexBody {
            uid: "movies",
            primary_key: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"uid":"movies"}"#);

        let body = CreateIndexBody {
            uid: "movies",
            primary_key: Some("id"),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"uid":"movies","primaryKey":"id"}"#
        );
    }
}
