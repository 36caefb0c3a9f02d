//! # AWS Secrets Manager Authentication
//!
//! Handles AWS SDK configuration and authentication setup.

use crate::config::AwsConfig;
use aws_config::SdkConfig;
use tracing::info;

/// Create AWS SDK config using the default credential chain
///
/// `endpoint_url` routes requests to a local emulator instead of real AWS.
pub async fn create_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        info!(
            "Routing AWS Secrets Manager requests to {} (region {})",
            endpoint, config.region
        );
        builder = builder.endpoint_url(endpoint);
    } else {
        info!("Using AWS Secrets Manager in region {}", config.region);
    }

    builder.load().await
}
