//! # Secret Cache Gateway
//!
//! HTTP service that serves AWS Secrets Manager secrets through an in-process cache.
//!
//! ## Overview
//!
//! 1. **List** - `GET /secrets` returns secret metadata, always live
//! 2. **Fetch** - `GET /secrets/{name}` returns a decoded secret, cached for the TTL
//! 3. **Batch** - `POST /secrets/batch` fetches many secrets concurrently
//! 4. **Invalidate** - `DELETE /secrets/{name}/cache` and `DELETE /secrets/cache`
//!
//! Configuration comes from environment variables; flags override them.

use anyhow::Result;
use clap::Parser;
use secret_cache_gateway::config::GatewayConfig;
use secret_cache_gateway::runtime::{initialize, shutdown_signal};
use secret_cache_gateway::server::start_server;

#[derive(Parser, Debug)]
#[command(name = "secret-cache-gateway")]
#[command(about = "HTTP gateway for AWS Secrets Manager with an in-process cache", long_about = None)]
#[command(version)]
struct Cli {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port (overrides PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Cache TTL in seconds (overrides CACHE_TTL_SECS)
    #[arg(long)]
    cache_ttl_secs: Option<u64>,
}

impl Cli {
    fn apply(self, config: &mut GatewayConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(region) = self.region {
            config.aws.region = region;
        }
        if let Some(ttl) = self.cache_ttl_secs {
            config.server.cache_ttl_secs = ttl;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = GatewayConfig::from_env();
    Cli::parse().apply(&mut config);

    let init_result = initialize(config).await?;

    start_server(
        &init_result.config.server,
        init_result.state,
        shutdown_signal(),
    )
    .await
}
