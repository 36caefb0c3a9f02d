//! # Upstream Error Types
//!
//! Closed classification of secret store failures, produced at the provider boundary.

use thiserror::Error;

/// Failure reported by the upstream secret store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The secret id does not exist
    #[error("secret not found: {0}")]
    NotFound(String),
    /// The caller lacks permission for the operation
    #[error("access denied: {0}")]
    AccessDenied(String),
    /// The store could not decrypt the stored value
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),
    /// Anything else: throttling, invalid requests, transport errors
    #[error("{0}")]
    Other(String),
}

impl UpstreamError {
    /// Get label string for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamError::NotFound(_) => "not_found",
            UpstreamError::AccessDenied(_) => "access_denied",
            UpstreamError::DecryptionFailure(_) => "decryption_failure",
            UpstreamError::Other(_) => "other",
        }
    }

    /// Upstream message without the classification prefix
    pub fn message(&self) -> &str {
        match self {
            UpstreamError::NotFound(m)
            | UpstreamError::AccessDenied(m)
            | UpstreamError::DecryptionFailure(m)
            | UpstreamError::Other(m) => m,
        }
    }
}

/// Classify an upstream failure from its service error code
///
/// Codes follow the Secrets Manager API error names. Access denial is not a
/// modeled error for `GetSecretValue`, so it arrives as an unhandled error
/// carrying the generic IAM code; both spellings are accepted.
/// A missing code (transport or dispatch failure) is `Other`.
pub fn classify_error_code(code: Option<&str>, message: impl Into<String>) -> UpstreamError {
    let message = message.into();
    match code {
        Some("ResourceNotFoundException") => UpstreamError::NotFound(message),
        Some("AccessDeniedException" | "AccessDenied" | "UnauthorizedException") => {
            UpstreamError::AccessDenied(message)
        }
        Some("DecryptionFailure" | "DecryptionFailureException") => {
            UpstreamError::DecryptionFailure(message)
        }
        _ => UpstreamError::Other(message),
    }
}
