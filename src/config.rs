//! Server configuration.
//!
//! # Environment Variables
//!
//! - `PORT`: listen port (default: `8080`)
//!
//! # Example
//!
//! ```
//! use task_store_api::config::ServerConfig;
//!
//! let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "9090".to_string()))?;
//! assert_eq!(config.port, 9090);
//! assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9090");
//! # Ok::<(), task_store_api::config::ConfigurationError>(())
//! ```

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

/// Port used when `PORT` is unset or blank.
pub const DEFAULT_PORT: u16 = 8080;

/// How long in-flight requests may keep running after a shutdown signal.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

// =============================================================================
// Configuration Error
// =============================================================================

/// Errors that can occur while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `PORT` is set but is not a valid port number.
    #[error("Invalid PORT: '{0}'. Expected an integer between 0 and 65535")]
    InvalidPort(String),
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind; always all interfaces.
    pub host: IpAddr,
    /// Port to bind.
    pub port: u16,
    /// Drain deadline after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPort` if `PORT` is not a valid port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let port = match lookup("PORT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            ..Self::default()
        })
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
