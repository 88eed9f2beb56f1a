pub mod cli;
pub mod config;
pub mod engine;
pub mod logging;
pub mod mcp;

pub use config::Settings;
pub use engine::{
    Document, DocumentsPage, DocumentsQuery, EngineError, EngineResult, Health, IndexView,
    MeilisearchClient, SearchEngine, SearchQuery, SearchResults, TaskInfo,
};
pub use mcp::MeilisearchToolServer;
