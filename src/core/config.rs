//! Configuration management for the application.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main configuration structure for the application.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// HTTP bind configuration.
    pub http: HttpConfig,

    /// Database configuration.
    pub database: DatabaseConfig,

    /// Session and credential configuration.
    pub auth: AuthConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in logs.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// HTTP bind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port number to listen on.
    pub port: u16,

    /// Enable CORS for browser clients of the JSON API.
    pub enable_cors: bool,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL. The file is created on first run.
    pub url: String,
}

/// Session and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an issued session token, in seconds.
    pub token_lifetime_secs: i64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "tool-inventory".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                enable_cors: true,
            },
            database: DatabaseConfig {
                url: "sqlite:tools.db".to_string(),
            },
            auth: AuthConfig {
                token_lifetime_secs: 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `TOOL_INVENTORY_`, for example
    /// `TOOL_INVENTORY_DATABASE_URL` or `TOOL_INVENTORY_LOG_LEVEL`. A `.env`
    /// file is honored when present. Unparseable values fall back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("TOOL_INVENTORY_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(url) = std::env::var("TOOL_INVENTORY_DATABASE_URL") {
            config.database.url = url;
        }

        if let Ok(host) = std::env::var("TOOL_INVENTORY_HTTP_HOST") {
            config.http.host = host;
        }

        if let Ok(port) = std::env::var("TOOL_INVENTORY_HTTP_PORT") {
            match port.parse() {
                Ok(port) => config.http.port = port,
                Err(_) => warn!("Invalid TOOL_INVENTORY_HTTP_PORT {port:?}, using default"),
            }
        }

        if let Ok(enable_cors) = std::env::var("TOOL_INVENTORY_ENABLE_CORS") {
            config.http.enable_cors = enable_cors.parse().unwrap_or(true);
        }

        if let Ok(lifetime) = std::env::var("TOOL_INVENTORY_TOKEN_LIFETIME") {
            match lifetime.parse() {
                Ok(secs) => config.auth.token_lifetime_secs = secs,
                Err(_) => warn!("Invalid TOOL_INVENTORY_TOKEN_LIFETIME {lifetime:?}, using default"),
            }
        }

        if let Ok(level) = std::env::var("TOOL_INVENTORY_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.database.url, "sqlite:tools.db");
        assert_eq!(config.auth.token_lifetime_secs, 3600);
    }

    #[test]
    fn test_database_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOL_INVENTORY_DATABASE_URL", "sqlite::memory:");
        }
        let config = Config::from_env();
        assert_eq!(config.database.url, "sqlite::memory:");
        unsafe {
            std::env::remove_var("TOOL_INVENTORY_DATABASE_URL");
        }
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("TOOL_INVENTORY_HTTP_PORT", "not-a-port");
        }
        let config = Config::from_env();
        assert_eq!(config.http.port, 8000);
        unsafe {
            std::env::remove_var("TOOL_INVENTORY_HTTP_PORT");
        }
    }
}
