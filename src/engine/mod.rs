//! Meilisearch engine access.
//!
//! Tool handlers talk to the engine through the [`SearchEngine`] trait so the
//! production HTTP client can be swapped for a test double. The wire types in
//! [`types`] mirror Meilisearch responses field-for-field; payloads pass
//! through the server without reshaping.

pub mod client;
pub mod error;
pub mod types;

pub use client::MeilisearchClient;
pub use error::{ApiError, EngineError, EngineResult};
pub use types::{
    Document, DocumentsPage, DocumentsQuery, Health, IndexView, IndexesPage, SearchQuery,
    SearchResults, TaskInfo,
};

use async_trait::async_trait;

/// Engine operations the MCP tools are built on.
///
/// One method per tool. Implementations are shared across concurrent tool
/// calls, so they take `&self` and must be `Send + Sync`.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> EngineResult<Health>;

    /// `GET /indexes` with an explicit page size.
    async fn list_indexes(&self, limit: i64) -> EngineResult<Vec<IndexView>>;

    /// `POST /indexes`. Returns the enqueued task.
    async fn create_index(
        &self,
        uid: &str,
        primary_key: Option<&str>,
    ) -> EngineResult<TaskInfo>;

    /// `POST /indexes/{uid}/search`.
    async fn search(
        &self,
        index_uid: &str,
        query: SearchQuery,
    ) -> EngineResult<SearchResults>;

    /// `GET /indexes/{uid}/documents`.
    async fn get_documents(
        &self,
        index_uid: &str,
        query: DocumentsQuery,
    ) -> EngineResult<DocumentsPage>;

    /// `POST /indexes/{uid}/documents`. Returns the enqueued task.
    async fn add_documents(
        &self,
        index_uid: &str,
        documents: Vec<Document>,
        primary_key: Option<&str>,
    ) -> EngineResult<TaskInfo>;
}
