//! HTTP server configuration.
//!
//! Loaded once at startup. Unset variables fall back to defaults; a value
//! that is set but unparsable aborts startup.

use std::env;
use std::net::SocketAddr;

use super::ConfigurationError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const ANY_ORIGIN: &str = "*";

/// Bind address and CORS origin for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Value of `ALLOWED_ORIGIN`; `*` allows any origin.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origin: ANY_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: Server host (optional, default: `0.0.0.0`)
    /// - `PORT`: Server port (optional, default: `3000`)
    /// - `ALLOWED_ORIGIN`: CORS origin (optional, default: `*`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a valid port.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = read("PORT").map_or(Ok(DEFAULT_PORT), |value| {
            value
                .parse::<u16>()
                .map_err(|error| ConfigurationError::InvalidValue {
                    key: "PORT".to_string(),
                    message: error.to_string(),
                })
        })?;
        let allowed_origin = read("ALLOWED_ORIGIN").unwrap_or_else(|| ANY_ORIGIN.to_string());

        Ok(Self {
            host,
            port,
            allowed_origin,
        })
    }

    /// Resolves `host:port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `HOST` is not an IP address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|error: std::net::AddrParseError| ConfigurationError::InvalidValue {
                key: "HOST".to_string(),
                message: error.to_string(),
            })
    }

    /// Returns true when every origin is allowed.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origin == ANY_ORIGIN
    }
}
