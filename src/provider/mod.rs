//! # Secret Store Providers
//!
//! The upstream secret store the gateway reads from, behind a trait seam so the
//! retrieval layer can be exercised against an in-memory store in tests.
//!
//! - `aws`: AWS Secrets Manager (production)
//! - `memory`: in-memory store with call accounting (tests and local runs)

pub mod aws;
mod error;
pub mod memory;

pub use error::{classify_error_code, UpstreamError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload returned by `GetSecretValue`
///
/// The secret store populates at most one of the two fields in practice, but
/// both are optional on the wire.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UpstreamPayload {
    /// `SecretString`
    pub text: Option<String>,
    /// `SecretBinary` bytes
    pub binary: Option<Vec<u8>>,
}

impl std::fmt::Debug for UpstreamPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secret material
        f.debug_struct("UpstreamPayload")
            .field("has_text", &self.text.is_some())
            .field("has_binary", &self.binary.is_some())
            .finish()
    }
}

impl UpstreamPayload {
    /// Payload carrying a `SecretString`
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            binary: None,
        }
    }

    /// Payload carrying a `SecretBinary`
    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        Self {
            text: None,
            binary: Some(value.into()),
        }
    }
}

/// Metadata for one secret as returned by `ListSecrets`
///
/// Passed through to callers untouched, using the upstream field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SecretMetadata {
    /// Friendly name of the secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Full ARN of the secret
    #[serde(rename = "ARN", skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// User-supplied description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last time the secret was changed
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub last_changed_date: Option<DateTime<Utc>>,
}

/// Upstream secret store
///
/// Implementations translate their client's failures into `UpstreamError` at
/// this boundary; callers never see SDK error types.
#[async_trait]
pub trait SecretStoreProvider: Send + Sync + std::fmt::Debug {
    /// Fetch the current value of a secret
    async fn get_secret_value(&self, secret_id: &str) -> Result<UpstreamPayload, UpstreamError>;

    /// List secret metadata, at most `max_results` records
    async fn list_secrets(&self, max_results: i32) -> Result<Vec<SecretMetadata>, UpstreamError>;

    /// Short provider name used in logs and metrics
    fn provider_name(&self) -> &'static str;
}
