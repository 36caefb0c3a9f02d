//! # AWS Configuration
//!
//! Settings for the upstream AWS Secrets Manager client.

use super::env_var_non_empty;

/// AWS Secrets Manager client configuration
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// AWS region, e.g. `us-east-1`
    pub region: String,
    /// Optional endpoint override (LocalStack, moto, or a mock server)
    pub endpoint_url: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: crate::constants::DEFAULT_AWS_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl AwsConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// `AWS_REGION` wins over `AWS_DEFAULT_REGION`.
    pub fn from_env() -> Self {
        let region = env_var_non_empty("AWS_REGION")
            .or_else(|| env_var_non_empty("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| crate::constants::DEFAULT_AWS_REGION.to_string());
        Self {
            region,
            endpoint_url: env_var_non_empty("AWS_SECRETS_MANAGER_ENDPOINT"),
        }
    }
}
