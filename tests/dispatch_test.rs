//! Tool handler behavior against a recording engine stub.
//!
//! Exercises argument validation, option mapping, and payload pass-through
//! without a running Meilisearch instance.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meili_mcp::engine::{
    ApiError, Document, DocumentsPage, DocumentsQuery, EngineError, EngineResult, Health,
    IndexView, SearchEngine, SearchQuery, SearchResults, TaskInfo,
};
use meili_mcp::mcp::{
    AddDocumentsRequest, CreateIndexRequest, GetDocumentsRequest, HealthCheckRequest,
    ListIndexesRequest, MeilisearchToolServer, SearchRequest,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};

/// One recorded engine invocation with the arguments the handler passed down.
#[derive(Debug, Clone, PartialEq)]
enum EngineCall {
    Health,
    ListIndexes {
        limit: i64,
    },
    CreateIndex {
        uid: String,
        primary_key: Option<String>,
    },
    Search {
        index_uid: String,
        query: SearchQuery,
    },
    GetDocuments {
        index_uid: String,
        query: DocumentsQuery,
    },
    AddDocuments {
        index_uid: String,
        documents: Vec<Document>,
        primary_key: Option<String>,
    },
}

#[derive(Default)]
struct StubEngine {
    calls: Mutex<Vec<EngineCall>>,
    fail: bool,
}

impl StubEngine {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome<T>(&self, value: T) -> EngineResult<T> {
        if self.fail {
            Err(index_not_found())
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl SearchEngine for StubEngine {
    async fn health(&self) -> EngineResult<Health> {
        self.record(EngineCall::Health);
        self.outcome(sample_health())
    }

    async fn list_indexes(&self, limit: i64) -> EngineResult<Vec<IndexView>> {
        self.record(EngineCall::ListIndexes { limit });
        self.outcome(sample_indexes())
    }

    async fn create_index(&self, uid: &str, primary_key: Option<&str>) -> EngineResult<TaskInfo> {
        self.record(EngineCall::CreateIndex {
            uid: uid.to_string(),
            primary_key: primary_key.map(str::to_string),
        });
        self.outcome(sample_task())
    }

    async fn search(&self, index_uid: &str, query: SearchQuery) -> EngineResult<SearchResults> {
        let results = sample_results(&query.q);
        self.record(EngineCall::Search {
            index_uid: index_uid.to_string(),
            query,
        });
        self.outcome(results)
    }

    async fn get_documents(
        &self,
        index_uid: &str,
        query: DocumentsQuery,
    ) -> EngineResult<DocumentsPage> {
        self.record(EngineCall::GetDocuments {
            index_uid: index_uid.to_string(),
            query,
        });
        self.outcome(sample_page())
    }

    async fn add_documents(
        &self,
        index_uid: &str,
        documents: Vec<Document>,
        primary_key: Option<&str>,
    ) -> EngineResult<TaskInfo> {
        self.record(EngineCall::AddDocuments {
            index_uid: index_uid.to_string(),
            documents,
            primary_key: primary_key.map(str::to_string),
        });
        self.outcome(sample_task())
    }
}

fn sample_health() -> Health {
    Health {
        status: "available".to_string(),
    }
}

fn sample_indexes() -> Vec<IndexView> {
    vec![IndexView {
        uid: "movies".to_string(),
        created_at: "2024-03-05T12:00:00Z".to_string(),
        updated_at: "2024-03-06T08:15:00Z".to_string(),
        primary_key: Some("id".to_string()),
    }]
}

fn sample_task() -> TaskInfo {
    TaskInfo {
        task_uid: 42,
        index_uid: Some("movies".to_string()),
        status: "enqueued".to_string(),
        task_type: "documentAdditionOrUpdate".to_string(),
        enqueued_at: "2024-03-06T09:00:00.000Z".to_string(),
    }
}

fn sample_results(query: &str) -> SearchResults {
    SearchResults {
        hits: vec![document(r#"{"id":1,"title":"Dune"}"#)],
        query: query.to_string(),
        processing_time_ms: 2,
        limit: Some(20),
        offset: Some(0),
        estimated_total_hits: Some(1),
        facet_distribution: None,
        facet_stats: None,
    }
}

fn sample_page() -> DocumentsPage {
    DocumentsPage {
        results: vec![document(r#"{"id":1,"title":"Dune"}"#)],
        offset: 0,
        limit: 20,
        total: 1,
    }
}

fn document(json: &str) -> Document {
    serde_json::from_str(json).unwrap()
}

fn index_not_found() -> EngineError {
    EngineError::Api {
        status: 404,
        error: ApiError {
            message: "Index `missing` not found.".to_string(),
            code: "index_not_found".to_string(),
            error_type: "invalid_request".to_string(),
            link: "https://docs.meilisearch.com/errors#index_not_found".to_string(),
        },
    }
}

fn text(result: &CallToolResult) -> &str {
    let content = result
        .content
        .first()
        .expect("tool result should carry content");
    match &**content {
        RawContent::Text(text) => &text.text,
        other => panic!("expected text content, got {other:?}"),
    }
}

fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

#[tokio::test]
async fn test_health_check_returns_raw_engine_json() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .health_check(Parameters(HealthCheckRequest {}))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(text(&result), r#"{"status":"available"}"#);
    assert_eq!(stub.calls(), vec![EngineCall::Health]);
}

#[tokio::test]
async fn test_list_indexes_uses_fixed_page_size() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .list_indexes(Parameters(ListIndexesRequest {}))
        .await
        .unwrap();

    assert!(!is_error(&result));
    // The payload is the results array alone, not the paginated wrapper.
    assert_eq!(
        text(&result),
        serde_json::to_string(&sample_indexes()).unwrap()
    );
    assert_eq!(stub.calls(), vec![EngineCall::ListIndexes { limit: 100 }]);
}

#[tokio::test]
async fn test_create_index_rejects_empty_uid_before_engine_call() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .create_index(Parameters(CreateIndexRequest {
            uid: String::new(),
            primary_key: Some("id".to_string()),
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert_eq!(text(&result), "uid must not be empty");
    assert!(stub.calls().is_empty(), "engine must not be called");
}

#[tokio::test]
async fn test_create_index_maps_empty_primary_key_to_none() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .create_index(Parameters(CreateIndexRequest {
            uid: "books".to_string(),
            primary_key: Some(String::new()),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(
        stub.calls(),
        vec![EngineCall::CreateIndex {
            uid: "books".to_string(),
            primary_key: None,
        }]
    );
}

#[tokio::test]
async fn test_create_index_returns_task_payload_verbatim() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .create_index(Parameters(CreateIndexRequest {
            uid: "books".to_string(),
            primary_key: Some("isbn".to_string()),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(text(&result), serde_json::to_string(&sample_task()).unwrap());
    assert_eq!(
        stub.calls(),
        vec![EngineCall::CreateIndex {
            uid: "books".to_string(),
            primary_key: Some("isbn".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_search_defaults_keep_options_unset() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .search(Parameters(SearchRequest {
            index_uid: "movies".to_string(),
            query: "dune".to_string(),
            limit: None,
            offset: None,
            filter: None,
            sort: None,
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(
        stub.calls(),
        vec![EngineCall::Search {
            index_uid: "movies".to_string(),
            query: SearchQuery {
                q: "dune".to_string(),
                ..Default::default()
            },
        }]
    );
}

#[tokio::test]
async fn test_search_drops_empty_filter_and_sort() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    server
        .search(Parameters(SearchRequest {
            index_uid: "movies".to_string(),
            query: "dune".to_string(),
            limit: None,
            offset: None,
            filter: Some(String::new()),
            sort: Some(Vec::new()),
        }))
        .await
        .unwrap();

    assert_eq!(
        stub.calls(),
        vec![EngineCall::Search {
            index_uid: "movies".to_string(),
            query: SearchQuery {
                q: "dune".to_string(),
                ..Default::default()
            },
        }]
    );
}

#[tokio::test]
async fn test_search_passes_options_through() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .search(Parameters(SearchRequest {
            index_uid: "movies".to_string(),
            query: "dune".to_string(),
            limit: Some(5),
            offset: Some(10),
            filter: Some("year > 2000".to_string()),
            sort: Some(vec!["year:desc".to_string()]),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(
        text(&result),
        serde_json::to_string(&sample_results("dune")).unwrap()
    );
    assert_eq!(
        stub.calls(),
        vec![EngineCall::Search {
            index_uid: "movies".to_string(),
            query: SearchQuery {
                q: "dune".to_string(),
                limit: Some(5),
                offset: Some(10),
                filter: Some("year > 2000".to_string()),
                sort: Some(vec!["year:desc".to_string()]),
            },
        }]
    );
}

#[tokio::test]
async fn test_get_documents_drops_empty_field_list() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .get_documents(Parameters(GetDocumentsRequest {
            index_uid: "movies".to_string(),
            limit: Some(20),
            offset: None,
            fields: Some(Vec::new()),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(text(&result), serde_json::to_string(&sample_page()).unwrap());
    assert_eq!(
        stub.calls(),
        vec![EngineCall::GetDocuments {
            index_uid: "movies".to_string(),
            query: DocumentsQuery {
                limit: Some(20),
                offset: None,
                fields: None,
            },
        }]
    );
}

#[tokio::test]
async fn test_add_documents_rejects_non_array_payload() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .add_documents(Parameters(AddDocumentsRequest {
            index_uid: "movies".to_string(),
            documents: serde_json::json!({"id": 1}),
            primary_key: None,
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("documents must be a JSON array of objects"));
    assert!(stub.calls().is_empty(), "engine must not be called");
}

#[tokio::test]
async fn test_add_documents_rejects_batch_with_non_object_entry() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .add_documents(Parameters(AddDocumentsRequest {
            index_uid: "movies".to_string(),
            documents: serde_json::json!([{"id": 1}, 42]),
            primary_key: None,
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(stub.calls().is_empty(), "whole batch must be rejected");
}

#[tokio::test]
async fn test_add_documents_passes_batch_and_primary_key() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .add_documents(Parameters(AddDocumentsRequest {
            index_uid: "movies".to_string(),
            documents: serde_json::json!([
                {"id": 1, "title": "Dune"},
                {"id": 2, "title": "Dune: Part Two"},
            ]),
            primary_key: Some("id".to_string()),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(text(&result), serde_json::to_string(&sample_task()).unwrap());
    assert_eq!(
        stub.calls(),
        vec![EngineCall::AddDocuments {
            index_uid: "movies".to_string(),
            documents: vec![
                document(r#"{"id":1,"title":"Dune"}"#),
                document(r#"{"id":2,"title":"Dune: Part Two"}"#),
            ],
            primary_key: Some("id".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_add_documents_without_primary_key_passes_none() {
    let stub = Arc::new(StubEngine::default());
    let server = MeilisearchToolServer::new(stub.clone());

    server
        .add_documents(Parameters(AddDocumentsRequest {
            index_uid: "movies".to_string(),
            documents: serde_json::json!([{"id": 1}]),
            primary_key: None,
        }))
        .await
        .unwrap();

    match stub.calls().as_slice() {
        [EngineCall::AddDocuments { primary_key, .. }] => assert_eq!(*primary_key, None),
        other => panic!("unexpected calls: {other:?}"),
    }
}

#[tokio::test]
async fn test_engine_failure_reports_operation_and_cause() {
    let stub = Arc::new(StubEngine::failing());
    let server = MeilisearchToolServer::new(stub.clone());

    let result = server
        .search(Parameters(SearchRequest {
            index_uid: "missing".to_string(),
            query: "dune".to_string(),
            limit: None,
            offset: None,
            filter: None,
            sort: None,
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    let message = text(&result);
    assert!(
        message.starts_with("failed to execute search:"),
        "message should name the operation: {message}"
    );
    assert!(
        message.contains("index_not_found"),
        "message should carry the engine cause: {message}"
    );
}

#[tokio::test]
async fn test_engine_failure_does_not_tear_down_the_server() {
    let stub = Arc::new(StubEngine::failing());
    let server = MeilisearchToolServer::new(stub.clone());

    let failed = server
        .health_check(Parameters(HealthCheckRequest {}))
        .await
        .unwrap();
    assert!(is_error(&failed));

    // The same server instance keeps serving calls after a failure.
    let again = server
        .health_check(Parameters(HealthCheckRequest {}))
        .await
        .unwrap();
    assert!(is_error(&again));
    assert_eq!(stub.calls(), vec![EngineCall::Health, EngineCall::Health]);
}
