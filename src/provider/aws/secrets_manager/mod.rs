//! # AWS Secrets Manager Client
//!
//! Client for interacting with AWS Secrets Manager API.
//!
//! This module provides functionality to:
//! - Retrieve secret values (`GetSecretValue`)
//! - List secret metadata (`ListSecrets`)
//! - Classify SDK failures into `UpstreamError`

mod auth;
mod operations;

use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use crate::config::AwsConfig;

use self::auth::create_sdk_config;

/// AWS Secrets Manager provider implementation
pub struct AwsSecretManager {
    pub(crate) client: SecretsManagerClient,
    region: String,
}

impl std::fmt::Debug for AwsSecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretManager")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSecretManager {
    /// Create a new AWS Secrets Manager client
    ///
    /// Credentials come from the SDK default chain (environment, profile,
    /// web identity, instance metadata).
    pub async fn new(config: &AwsConfig) -> Self {
        let sdk_config = create_sdk_config(config).await;
        Self::from_client(SecretsManagerClient::new(&sdk_config), &config.region)
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: SecretsManagerClient, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }

    /// Region this client talks to
    pub fn region(&self) -> &str {
        &self.region
    }
}
