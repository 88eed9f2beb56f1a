use clap::Parser;
use meili_mcp::cli::{Cli, Commands, commands};
use meili_mcp::config::Settings;
use meili_mcp::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Serve => commands::serve::run(settings).await,
        Commands::Init { force } => commands::init::run_init(force),
        Commands::Config => commands::init::run_config(&settings),
        Commands::McpTest {
            server_binary,
            tool,
            args,
        } => commands::serve::run_mcp_test(server_binary, cli.config, tool, args).await,
        Commands::Mcp { tool, args } => commands::mcp::run(tool, args, &settings).await,
    }
}
