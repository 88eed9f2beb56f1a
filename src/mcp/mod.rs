//! MCP (Model Context Protocol) server implementation for Meilisearch
//!
//! This module provides MCP tools that allow AI assistants to query and
//! populate a Meilisearch instance.
//!
//! ## Architecture
//!
//! The MCP server can run in two modes:
//!
//! 1. **Standalone Server Mode**: Run with `meili-mcp serve`
//!    - Connects to Meilisearch once at startup
//!    - Listens for client connections via stdio
//!    - The mode AI assistants use
//!
//! 2. **Embedded Mode**: Used by the CLI directly
//!    - No separate server process needed
//!    - `meili-mcp mcp <tool>` calls a tool handler in-process
//!
//! Handlers are thin: validate arguments, call the engine seam, return the
//! engine's JSON payload as text content. Responses are never reshaped, so
//! clients see exactly what the engine said.

pub mod client;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::{Document, DocumentsQuery, EngineError, SearchEngine, SearchQuery};

/// Fixed page size for `list_indexes`. The engine's own default page is 20.
const INDEX_LIST_LIMIT: i64 = 100;

/// Treat empty strings as absent, matching the engine's optional parameters.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthCheckRequest {}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListIndexesRequest {}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreateIndexRequest {
    /// Unique identifier of the index to create (e.g., "movies")
    pub uid: String,
    /// Document field to use as the primary key (the engine infers one when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Index to search in
    pub index_uid: String,
    /// Search query text
    pub query: String,
    /// Maximum number of hits to return (engine default: 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Number of hits to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Filter expression, e.g. "genre = fantasy AND year > 2000"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Sort rules, e.g. ["year:desc", "title:asc"]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetDocumentsRequest {
    /// Index to fetch documents from
    pub index_uid: String,
    /// Maximum number of documents to return (engine default: 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Number of documents to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Restrict returned documents to these fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddDocumentsRequest {
    /// Index to add documents to (created on first write if missing)
    pub index_uid: String,
    /// JSON array of documents to add or replace
    pub documents: serde_json::Value,
    /// Document field to use as the primary key (the engine infers one when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

#[derive(Clone)]
pub struct MeilisearchToolServer {
    engine: Arc<dyn SearchEngine>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MeilisearchToolServer {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    /// The tool catalog as served to `tools/list`.
    pub fn catalog(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// True when `name` names a registered tool.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_router.has_route(name)
    }

    /// Serialize an engine payload into text content, unchanged.
    fn payload<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        match serde_json::to_string(value) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "failed to encode response: {e}"
            ))])),
        }
    }

    /// Report an engine failure to the caller without tearing down the session.
    fn engine_failure(
        operation: &'static str,
        error: EngineError,
    ) -> Result<CallToolResult, McpError> {
        tracing::warn!(target: "mcp", operation, error = %error, "engine call failed");
        Ok(CallToolResult::error(vec![Content::text(format!(
            "failed to {operation}: {error}"
        ))]))
    }

    #[tool(description = "Check Meilisearch server health status")]
    pub async fn health_check(
        &self,
        Parameters(HealthCheckRequest {}): Parameters<HealthCheckRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", "executing health check");

        match self.engine.health().await {
            Ok(health) => Self::payload(&health),
            Err(e) => Self::engine_failure("check health", e),
        }
    }

    #[tool(description = "List all indexes in the Meilisearch server")]
    pub async fn list_indexes(
        &self,
        Parameters(ListIndexesRequest {}): Parameters<ListIndexesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", "executing list indexes");

        match self.engine.list_indexes(INDEX_LIST_LIMIT).await {
            Ok(indexes) => Self::payload(&indexes),
            Err(e) => Self::engine_failure("list indexes", e),
        }
    }

    #[tool(description = "Create a new index in Meilisearch")]
    pub async fn create_index(
        &self,
        Parameters(CreateIndexRequest { uid, primary_key }): Parameters<CreateIndexRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", uid = %uid, primary_key = ?primary_key, "executing create index");

        if uid.is_empty() {
            return Ok(CallToolResult::error(vec![Content::text(
                "uid must not be empty",
            )]));
        }

        match self
            .engine
            .create_index(&uid, non_empty(primary_key.as_deref()))
            .await
        {
            Ok(task) => Self::payload(&task),
            Err(e) => Self::engine_failure("create index", e),
        }
    }

    #[tool(description = "Search for documents in a Meilisearch index")]
    pub async fn search(
        &self,
        Parameters(SearchRequest {
            index_uid,
            query,
            limit,
            offset,
            filter,
            sort,
        }): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", index_uid = %index_uid, query = %query, "executing search");

        let search_query = SearchQuery {
            q: query,
            limit,
            offset,
            filter: filter.filter(|f| !f.is_empty()),
            sort: sort.filter(|s| !s.is_empty()),
        };

        match self.engine.search(&index_uid, search_query).await {
            Ok(results) => Self::payload(&results),
            Err(e) => Self::engine_failure("execute search", e),
        }
    }

    #[tool(description = "Get documents from a Meilisearch index")]
    pub async fn get_documents(
        &self,
        Parameters(GetDocumentsRequest {
            index_uid,
            limit,
            offset,
            fields,
        }): Parameters<GetDocumentsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", index_uid = %index_uid, "executing get documents");

        let query = DocumentsQuery {
            limit,
            offset,
            fields: fields.filter(|f| !f.is_empty()),
        };

        match self.engine.get_documents(&index_uid, query).await {
            Ok(page) => Self::payload(&page),
            Err(e) => Self::engine_failure("get documents", e),
        }
    }

    #[tool(description = "Add documents to a Meilisearch index")]
    pub async fn add_documents(
        &self,
        Parameters(AddDocumentsRequest {
            index_uid,
            documents,
            primary_key,
        }): Parameters<AddDocumentsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(target: "mcp", index_uid = %index_uid, "executing add documents");

        // The whole batch is decoded up front; one malformed entry rejects
        // the call before anything reaches the engine.
        let documents: Vec<Document> = match serde_json::from_value(documents) {
            Ok(docs) => docs,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "documents must be a JSON array of objects: {e}"
                ))]));
            }
        };

        match self
            .engine
            .add_documents(&index_uid, documents, non_empty(primary_key.as_deref()))
            .await
        {
            Ok(task) => Self::payload(&task),
            Err(e) => Self::engine_failure("add documents", e),
        }
    }
}

#[tool_handler]
impl ServerHandler for MeilisearchToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "meili-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Meilisearch MCP Server".to_string()),
                website_url: Some("https://github.com/meili-community/meili-mcp".to_string()),
                icons: None,
            },
            instructions: Some(
                "This server exposes a Meilisearch instance to MCP clients. \
                WORKFLOW: Call 'health_check' to verify connectivity, then 'list_indexes' to discover what is searchable. \
                Use 'search' for queries; pass 'filter' and 'sort' only when needed. \
                Use 'get_documents' to browse index contents, and 'create_index' plus 'add_documents' to load data. \
                Responses are raw Meilisearch JSON. Write operations return a task descriptor; \
                the engine applies them asynchronously in the background."
                    .to_string(),
            ),
        }
    }
}
