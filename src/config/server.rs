//! # Server Configuration
//!
//! HTTP server and cache settings loaded from environment variables.

use super::{env_var_non_empty, env_var_or_default};
use std::net::SocketAddr;
use std::time::Duration;

/// HTTP server configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP server port
    pub port: u16,
    /// Cache time-to-live (seconds)
    /// An entry older than this is refetched on the next read
    pub cache_ttl_secs: u64,
    /// Origins allowed by CORS
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        Self {
            host: env_var_non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env_var_or_default("PORT", DEFAULT_PORT),
            cache_ttl_secs: env_var_or_default("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
            cors_allowed_origins: env_var_non_empty("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }

    /// Cache TTL as a `Duration`
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Socket address to bind
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not a valid IP address.
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: std::net::IpAddr = self
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid HOST '{}': {e}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(ToString::to_string)
        .collect()
}
