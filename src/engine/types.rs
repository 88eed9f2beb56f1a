//! Wire types mirroring the Meilisearch HTTP API.
//!
//! Field names and declaration order follow the engine's JSON exactly, so a
//! decoded response re-serializes byte-for-byte. Documents stay raw ordered
//! maps; the server never interprets their contents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw engine document. Key order is preserved end to end.
pub type Document = Map<String, Value>;

/// `GET /health` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Health {
    pub status: String,
}

/// One index descriptor as returned by `GET /indexes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub uid: String,
    pub created_at: String,
    pub updated_at: String,
    /// Explicit `null` when the index has no primary key yet.
    pub primary_key: Option<String>,
}

/// Paginated `GET /indexes` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexesPage {
    pub results: Vec<IndexView>,
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

/// Summarized task returned by write endpoints (`202 Accepted`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_uid: u64,
    /// `null` for task types not tied to an index.
    pub index_uid: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub enqueued_at: String,
}

/// `POST /indexes/{uid}/search` request body.
///
/// Unset options are omitted from the body so engine defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

/// `POST /indexes/{uid}/search` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub hits: Vec<Document>,
    pub query: String,
    pub processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total_hits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_distribution: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_stats: Option<Value>,
}

/// Options for `GET /indexes/{uid}/documents`, sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub fields: Option<Vec<String>>,
}

impl DocumentsQuery {
    /// Query-string pairs in the engine's expected form.
    ///
    /// `fields` is comma-joined; an unset or empty list produces no
    /// parameter, which the engine treats as "all fields".
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(fields) = &self.fields {
            if !fields.is_empty() {
                pairs.push(("fields", fields.join(",")));
            }
        }
        pairs
    }
}

/// Paginated `GET /indexes/{uid}/documents` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsPage {
    pub results: Vec<Document>,
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}
