//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `JSHOP_DATABASE_URL` - database connection string
//!   (default: `sqlite://jshop.db?mode=rwc`, a local file next to the binary)
//! - `JSHOP_HOST` - bind address (default: 127.0.0.1)
//! - `JSHOP_PORT` - listen port (default: 8000)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default connection string: a file-backed SQLite database, created on
/// first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://jshop.db?mode=rwc";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL.
    pub database_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `JSHOP_HOST` or `JSHOP_PORT` is set but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("JSHOP_DATABASE_URL", DEFAULT_DATABASE_URL);
        let host = get_env_or_default("JSHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("JSHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("JSHOP_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("JSHOP_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
