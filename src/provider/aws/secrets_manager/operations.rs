//! # AWS Secrets Manager Operations
//!
//! `SecretStoreProvider` implementation on top of the SDK client.

use super::AwsSecretManager;
use crate::provider::{
    classify_error_code, SecretMetadata, SecretStoreProvider, UpstreamError, UpstreamPayload,
};
use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::types::SecretListEntry;
use tracing::debug;

#[async_trait]
impl SecretStoreProvider for AwsSecretManager {
    async fn get_secret_value(&self, secret_id: &str) -> Result<UpstreamPayload, UpstreamError> {
        debug!(secret.name = secret_id, "GetSecretValue");
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| classify_get_error(&e))?;

        Ok(UpstreamPayload {
            text: output.secret_string().map(ToString::to_string),
            binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
        })
    }

    async fn list_secrets(&self, max_results: i32) -> Result<Vec<SecretMetadata>, UpstreamError> {
        debug!(max_results, "ListSecrets");
        let output = self
            .client
            .list_secrets()
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(output.secret_list().iter().map(to_metadata).collect())
    }

    fn provider_name(&self) -> &'static str {
        "aws-secrets-manager"
    }
}

/// Classify a `GetSecretValue` failure
///
/// Modeled exceptions are matched by variant; anything else falls back to the
/// error code carried in the response metadata.
fn classify_get_error<R>(err: &SdkError<GetSecretValueError, R>) -> UpstreamError
where
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(e) if e.is_resource_not_found_exception() => {
            UpstreamError::NotFound(error_message(err))
        }
        Some(e) if e.is_decryption_failure() => UpstreamError::DecryptionFailure(error_message(err)),
        _ => classify_sdk_error(err),
    }
}

/// Classify an SDK failure by its service error code
fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> UpstreamError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    classify_error_code(err.code(), error_message(err))
}

fn error_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    err.message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), ToString::to_string)
}

fn to_metadata(entry: &SecretListEntry) -> SecretMetadata {
    SecretMetadata {
        name: entry.name().map(ToString::to_string),
        arn: entry.arn().map(ToString::to_string),
        description: entry.description().map(ToString::to_string),
        last_changed_date: entry
            .last_changed_date()
            .and_then(|d| chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())),
    }
}
