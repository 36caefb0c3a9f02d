//! # Gateway Configuration
//!
//! Process-level configuration loaded from environment variables.
//!
//! All configuration has sensible defaults and can be overridden via environment variables.
//! Command-line flags (see `main.rs`) take precedence over the environment.

mod aws;
mod server;

pub use aws::AwsConfig;
pub use server::ServerConfig;

/// Complete gateway configuration
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP server and cache settings
    pub server: ServerConfig,
    /// Upstream Secrets Manager client settings
    pub aws: AwsConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            aws: AwsConfig::from_env(),
        }
    }
}

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty environment variable
pub(crate) fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
