//! # Secret Retrieval Errors
//!
//! User-facing error taxonomy of the retrieval layer. Every message names the
//! secret involved so callers can report it without extra context.

use crate::provider::UpstreamError;
use thiserror::Error;

/// Retrieval failure
///
/// `Clone` so a single coalesced upstream result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    /// Secret does not exist upstream
    #[error("Secret '{name}' not found")]
    NotFound { name: String },

    /// Credentials lack permission to read the secret
    #[error("Access denied to secret '{name}'. Check IAM permissions and credentials.")]
    AccessDenied { name: String },

    /// Upstream could not decrypt the stored value
    #[error("Failed to decrypt secret '{name}'")]
    DecryptionFailure { name: String },

    /// Upstream returned neither a string nor a binary value
    #[error("Secret '{name}' has no value")]
    EmptySecret { name: String },

    /// Any other failure while fetching a secret
    #[error("Failed to retrieve secret '{name}': {message}")]
    RetrievalFailed { name: String, message: String },

    /// Credentials lack permission to list secrets
    #[error("Access denied when listing secrets. Check IAM permissions and credentials.")]
    ListAccessDenied,

    /// Any other failure while listing secrets
    #[error("Failed to list secrets: {message}")]
    ListFailed { message: String },
}

impl SecretError {
    /// Map a `GetSecretValue` failure for `name`
    pub fn from_fetch(name: &str, error: UpstreamError) -> Self {
        let name = name.to_string();
        match error {
            UpstreamError::NotFound(_) => SecretError::NotFound { name },
            UpstreamError::AccessDenied(_) => SecretError::AccessDenied { name },
            UpstreamError::DecryptionFailure(_) => SecretError::DecryptionFailure { name },
            UpstreamError::Other(message) => SecretError::RetrievalFailed { name, message },
        }
    }

    /// Map a `ListSecrets` failure
    pub fn from_list(error: UpstreamError) -> Self {
        match error {
            UpstreamError::AccessDenied(_) => SecretError::ListAccessDenied,
            other => SecretError::ListFailed {
                message: other.message().to_string(),
            },
        }
    }

    /// Get label string for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SecretError::NotFound { .. } => "not_found",
            SecretError::AccessDenied { .. } | SecretError::ListAccessDenied => "access_denied",
            SecretError::DecryptionFailure { .. } => "decryption_failure",
            SecretError::EmptySecret { .. } => "empty_secret",
            SecretError::RetrievalFailed { .. } => "retrieval_failed",
            SecretError::ListFailed { .. } => "list_failed",
        }
    }
}
