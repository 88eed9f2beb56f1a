//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Meilisearch MCP server
#[derive(Parser)]
#[command(
    name = "meili-mcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "Meilisearch MCP server",
    long_about = "Expose Meilisearch search, index, and document operations as MCP tools.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom meili-mcp.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start MCP server
    #[command(
        about = "Start MCP server on stdio",
        long_about = "Start the MCP server on the stdio transport.\n\nThe process connects to Meilisearch at startup and exits if the engine is unreachable.",
        after_help = "Examples:\n  meili-mcp serve\n  meili-mcp --config ./meili-mcp.toml serve\n  MEILISEARCH_HOST=http://search:7700 meili-mcp serve"
    )]
    Serve,

    /// Initialize configuration
    #[command(about = "Write a default meili-mcp.toml to the current directory")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Test MCP connection
    #[command(name = "mcp-test", about = "Test MCP connection and list tools")]
    McpTest {
        /// Path to server binary (defaults to current binary)
        #[arg(long)]
        server_binary: Option<PathBuf>,

        /// Tool to call (if not specified, just lists tools)
        #[arg(long)]
        tool: Option<String>,

        /// Tool arguments as JSON
        #[arg(long)]
        args: Option<String>,
    },

    /// Call MCP tools directly (advanced)
    #[command(
        about = "Execute MCP tools directly",
        long_about = "Execute MCP tools directly without spawning a server process.\n\nTool arguments are passed as a JSON object via --args.",
        after_help = "Tools:\n  health_check                        Engine health status\n  list_indexes                        All indexes on the engine\n  create_index                        Create an index (uid, primary_key)\n  search                              Search documents in an index\n  get_documents                       Fetch documents from an index\n  add_documents                       Add documents to an index\n\nExamples:\n  meili-mcp mcp health_check\n  meili-mcp mcp search --args '{\"index_uid\":\"movies\",\"query\":\"dune\"}'\n  meili-mcp mcp create_index --args '{\"uid\":\"movies\",\"primary_key\":\"id\"}'\n  meili-mcp mcp add_documents --args '{\"index_uid\":\"movies\",\"documents\":[{\"id\":1}]}'"
    )]
    Mcp {
        /// Tool to call
        tool: String,

        /// Tool arguments as JSON
        #[arg(long)]
        args: Option<String>,
    },
}
