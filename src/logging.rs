//! Unified logging for debug output.
//!
//! Provides compact timestamped logging with per-module level configuration.
//! Supports `RUST_LOG` environment variable for runtime overrides.
//!
//! All console output goes to stderr: stdout is reserved for MCP frames when
//! the server runs on the stdio transport. An optional log file receives a
//! plain copy of the same output.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"  # quiet by default
//! # file = "meili-mcp.log"
//!
//! [logging.modules]
//! "meili_mcp::mcp" = "debug"     # enable tool-call debug logs
//! ```
//!
//! # Environment Variable
//!
//! `RUST_LOG` takes precedence over config:
//! ```bash
//! RUST_LOG=debug meili-mcp mcp-test
//! RUST_LOG=meili_mcp::engine=trace meili-mcp serve
//! ```

use std::sync::Arc;
use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize logging with configuration.
///
/// Call once at startup. Safe to call multiple times (only first call takes effect).
///
/// Log levels control visibility:
/// - `error` - errors only (quietest)
/// - `warn` - errors + warnings (default, quiet operation)
/// - `info` - normal operation logs
/// - `debug` - detailed debugging
/// - `trace` - everything
///
/// The `RUST_LOG` environment variable takes precedence over config settings.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        // RUST_LOG env var takes precedence over config
        let filter_str = match std::env::var("RUST_LOG") {
            Ok(env) => env,
            Err(_) => {
                // Build filter string from config
                let mut filter_str = config.default.clone();
                for (module, level) in &config.modules {
                    filter_str.push_str(&format!(",{module}={level}"));
                }
                filter_str
            }
        };

        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_target(true) // Show target for filtering visibility
            .with_timer(CompactTime)
            .with_level(true)
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new(&filter_str));

        // EnvFilter is not Clone, so the file layer builds its own
        let file_layer = config.file.as_ref().and_then(|path| {
            match std::fs::OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_timer(CompactTime)
                        .with_level(true)
                        .with_ansi(false)
                        .with_writer(Arc::new(file))
                        .with_filter(EnvFilter::new(&filter_str)),
                ),
                Err(e) => {
                    eprintln!("Cannot open log file {}: {e}", path.display());
                    None
                }
            }
        });

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .init();
    });
}

/// Initialize logging with default configuration.
///
/// Uses `LoggingConfig::default()` which sets `default = "warn"` for quiet operation.
/// Use `RUST_LOG=debug` environment variable for verbose output.
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
