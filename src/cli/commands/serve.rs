//! Serve command - MCP server on stdio.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::engine::MeilisearchClient;
use crate::mcp::MeilisearchToolServer;

/// Run the serve command.
///
/// Connects to Meilisearch before binding the transport. An unreachable
/// engine is a startup failure, not a per-call one.
pub async fn run(config: Settings) {
    eprintln!("Starting MCP server on stdio transport");
    eprintln!("To test: npx @modelcontextprotocol/inspector cargo run -- serve");

    let engine = match MeilisearchClient::connect(&config.meilisearch).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to connect to Meilisearch: {e}");
            eprintln!("Check the [meilisearch] section of meili-mcp.toml or MEILISEARCH_HOST");
            std::process::exit(1);
        }
    };

    tracing::debug!(target: "mcp", "creating server for engine at {}", engine.host());
    let server = MeilisearchToolServer::new(Arc::new(engine));

    // Start server with stdio transport
    use rmcp::{ServiceExt, transport::stdio};
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| {
            eprintln!("Failed to start MCP server: {e}");
            std::process::exit(1);
        })
        .unwrap();

    // Wait for server to complete
    service
        .waiting()
        .await
        .map_err(|e| {
            eprintln!("MCP server error: {e}");
            std::process::exit(1);
        })
        .unwrap();
}

/// Run the MCP test command.
pub async fn run_mcp_test(
    server_binary: Option<PathBuf>,
    cli_config: Option<PathBuf>,
    tool: Option<String>,
    args: Option<String>,
) {
    use crate::mcp::client::MeilisearchToolClient;

    // Get server binary path (default to current executable)
    let server_path = server_binary
        .unwrap_or_else(|| std::env::current_exe().expect("Failed to get current executable path"));

    // Run the test
    if let Err(e) = MeilisearchToolClient::test_server(server_path, cli_config, tool, args).await {
        eprintln!("MCP test failed: {e}");
        std::process::exit(1);
    }
}
