//! Configuration for the Meilisearch MCP server.
//!
//! Layered configuration:
//! - Default values
//! - TOML configuration file (`meili-mcp.toml`, or the `--config` path)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! The Meilisearch connection honors the conventional variables directly:
//! - `MEILISEARCH_HOST` sets `meilisearch.host`
//! - `MEILISEARCH_API_KEY` sets `meilisearch.api_key`
//!
//! Any setting can be overridden with the `MEILI_MCP_` prefix, using double
//! underscores to separate nested levels:
//! - `MEILI_MCP_MEILISEARCH__HOST=http://search:7700` sets `meilisearch.host`
//! - `MEILI_MCP_MEILISEARCH__TIMEOUT_SECS=10` sets `meilisearch.timeout_secs`
//! - `MEILI_MCP_LOGGING__DEFAULT=debug` sets `logging.default`
//!
//! Prefixed variables win over the bare `MEILISEARCH_*` ones when both are set.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "meili-mcp.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Meilisearch connection settings
    #[serde(default)]
    pub meilisearch: MeilisearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MeilisearchConfig {
    /// Base URL of the Meilisearch instance
    #[serde(default = "default_host")]
    pub host: String,

    /// API key sent as a bearer token (master or search key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `"meili_mcp::mcp" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,

    /// Append a copy of the log output to this file.
    /// stdout carries the MCP transport, so console logs go to stderr only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_host() -> String {
    "http://localhost:7700".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            meilisearch: MeilisearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MeilisearchConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
            file: None,
        }
    }
}

impl Settings {
    /// Load configuration from all sources.
    ///
    /// `config_path` overrides the default `meili-mcp.toml` lookup. A missing
    /// file is not an error; defaults and environment variables still apply.
    pub fn load(config_path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::figment(&path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file, ignoring environment variables.
    ///
    /// Used by tests that need deterministic results.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()
            .map_err(Box::new)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Conventional Meilisearch variables map straight onto the
            // [meilisearch] section
            .merge(
                Env::raw()
                    .only(&["MEILISEARCH_HOST", "MEILISEARCH_API_KEY"])
                    .map(|key| {
                        key.as_str()
                            .to_lowercase()
                            .replace("meilisearch_", "meilisearch.")
                            .into()
                    }),
            )
            // Prefixed variables cover every key; double underscore
            // separates nested levels, single underscores stay in field names
            .merge(Env::prefixed("MEILI_MCP_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Save current configuration to file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in the working directory.
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;

        Ok(config_path)
    }
}
