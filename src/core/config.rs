//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults overridden by environment
//! variables (a `.env` file in the working directory is loaded first).

use super::transport::TransportConfig;
use crate::domains::chembl::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// ChEMBL REST API access.
    pub chembl: ChemblConfig,

    /// Tool reply behaviour.
    pub tools: ToolsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// ChEMBL client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemblConfig {
    /// Root of the REST API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Page size used when a request does not carry its own limit.
    pub page_size: usize,
}

/// Tool reply configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Report not-found, invalid and failed replies with `isError: true`.
    /// Off by default: every reply is a successful result whose text tells
    /// the outcome.
    pub flag_errors: bool,
}

impl Default for ChemblConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            page_size: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "chembl".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            chembl: ChemblConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Parse `var` when set, keeping `current` (with a warning) when the value
/// does not parse.
fn parse_env<T: FromStr>(var: &str, current: T) -> T {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid value", var, raw);
            current
        }),
        Err(_) => current,
    }
}

fn parse_flag(var: &str, current: bool) -> bool {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                warn!("Ignoring {}={:?}: expected a boolean", var, raw);
                current
            }
        },
        Err(_) => current,
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `MCP_TRANSPORT` (with `MCP_TCP_HOST` / `MCP_TCP_PORT`),
    /// `CHEMBL_BASE_URL`, `CHEMBL_TIMEOUT_SECS`, `CHEMBL_PAGE_SIZE` and
    /// `CHEMBL_FLAG_ERRORS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("CHEMBL_BASE_URL") {
            config.chembl.base_url = base_url.trim_end_matches('/').to_string();
        }
        config.chembl.timeout_secs = parse_env("CHEMBL_TIMEOUT_SECS", config.chembl.timeout_secs);
        config.chembl.page_size = parse_env("CHEMBL_PAGE_SIZE", config.chembl.page_size);
        config.tools.flag_errors = parse_flag("CHEMBL_FLAG_ERRORS", config.tools.flag_errors);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "MCP_SERVER_NAME",
        "CHEMBL_BASE_URL",
        "CHEMBL_TIMEOUT_SECS",
        "CHEMBL_PAGE_SIZE",
        "CHEMBL_FLAG_ERRORS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "chembl");
        assert_eq!(config.chembl.base_url, "https://www.ebi.ac.uk/chembl/api/data");
        assert_eq!(config.chembl.timeout_secs, 30);
        assert_eq!(config.chembl.page_size, 20);
        assert!(!config.tools.flag_errors);
    }

    #[test]
    fn test_chembl_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "chembl-test");
            std::env::set_var("CHEMBL_BASE_URL", "http://localhost:8000/chembl/api/data/");
            std::env::set_var("CHEMBL_TIMEOUT_SECS", "5");
            std::env::set_var("CHEMBL_PAGE_SIZE", "50");
            std::env::set_var("CHEMBL_FLAG_ERRORS", "true");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.server.name, "chembl-test");
        assert_eq!(config.chembl.base_url, "http://localhost:8000/chembl/api/data");
        assert_eq!(config.chembl.timeout_secs, 5);
        assert_eq!(config.chembl.page_size, 50);
        assert!(config.tools.flag_errors);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("CHEMBL_TIMEOUT_SECS", "soon");
            std::env::set_var("CHEMBL_PAGE_SIZE", "-3");
            std::env::set_var("CHEMBL_FLAG_ERRORS", "maybe");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.chembl, ChemblConfig::default());
        assert!(!config.tools.flag_errors);
    }
}
