//! MCP direct tool invocation command.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::engine::MeilisearchClient;
use crate::mcp::{
    AddDocumentsRequest, CreateIndexRequest, GetDocumentsRequest, HealthCheckRequest,
    ListIndexesRequest, MeilisearchToolServer, SearchRequest,
};

const AVAILABLE_TOOLS: &str =
    "health_check, list_indexes, create_index, search, get_documents, add_documents";

/// Run the MCP direct tool invocation command.
pub async fn run(tool: String, args: Option<String>, config: &Settings) {
    // Parse JSON arguments if provided
    let arguments = match &args {
        Some(args_str) => match serde_json::from_str::<serde_json::Value>(args_str) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            Ok(_) => {
                eprintln!("Error: Arguments must be a JSON object");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error parsing arguments: {e}");
                std::process::exit(1);
            }
        },
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    let engine = match MeilisearchClient::connect(&config.meilisearch).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to connect to Meilisearch: {e}");
            std::process::exit(1);
        }
    };
    let server = MeilisearchToolServer::new(Arc::new(engine));

    let result = match tool.as_str() {
        "health_check" => server.health_check(Parameters(HealthCheckRequest {})).await,
        "list_indexes" => server.list_indexes(Parameters(ListIndexesRequest {})).await,
        "create_index" => {
            let request: CreateIndexRequest = decode(&tool, arguments);
            server.create_index(Parameters(request)).await
        }
        "search" => {
            let request: SearchRequest = decode(&tool, arguments);
            server.search(Parameters(request)).await
        }
        "get_documents" => {
            let request: GetDocumentsRequest = decode(&tool, arguments);
            server.get_documents(Parameters(request)).await
        }
        "add_documents" => {
            let request: AddDocumentsRequest = decode(&tool, arguments);
            server.add_documents(Parameters(request)).await
        }
        _ => {
            eprintln!("Error: Unknown tool '{tool}'");
            eprintln!("Available tools: {AVAILABLE_TOOLS}");
            std::process::exit(1);
        }
    };

    match result {
        Ok(call_result) => {
            for content in &call_result.content {
                match &**content {
                    rmcp::model::RawContent::Text(text_content) => {
                        println!("{}", text_content.text);
                    }
                    _ => {
                        eprintln!("Warning: Non-text content returned");
                    }
                }
            }
            if call_result.is_error.unwrap_or(false) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error calling tool: {}", e.message);
            std::process::exit(1);
        }
    }
}

/// Decode the parsed `--args` object into the tool's typed request.
fn decode<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> T {
    match serde_json::from_value(arguments) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: Invalid arguments for '{tool}': {e}");
            std::process::exit(1);
        }
    }
}
