//! # Constants
//!
//! Default values shared by configuration, the cache and the HTTP boundary.

/// Default bind address for the HTTP server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region for the Secrets Manager client
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default cache time-to-live (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default page size for `ListSecrets`
pub const DEFAULT_LIST_MAX_RESULTS: i32 = 100;

/// Largest page size Secrets Manager accepts for `ListSecrets`
pub const MAX_LIST_MAX_RESULTS: i32 = 100;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "secret-cache-gateway";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "secret_cache_gateway=info,tower_http=info";
