//! # API Errors
//!
//! Translation of retrieval errors into HTTP responses.
//!
//! Every failure is rendered as `{"error": {"message": ..., "statusCode": ...}}`.

use crate::secrets::SecretError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Error envelope returned by every failing request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub message: String,
    pub status_code: u16,
}

/// Error returned by HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Retrieval layer failure
    #[error(transparent)]
    Secret(#[from] SecretError),
    /// Malformed request
    #[error("{0}")]
    BadRequest(String),
    /// No route matched
    #[error("{0}")]
    NotFound(String),
    /// Unexpected server-side failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Secret(e) => match e {
                SecretError::NotFound { .. } => StatusCode::NOT_FOUND,
                SecretError::AccessDenied { .. } | SecretError::ListAccessDenied => {
                    StatusCode::FORBIDDEN
                }
                SecretError::DecryptionFailure { .. }
                | SecretError::EmptySecret { .. }
                | SecretError::RetrievalFailed { .. }
                | SecretError::ListFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", message);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", message);
        }

        let body = ErrorBody {
            error: ErrorDetail {
                message,
                status_code: status.as_u16(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(err: SecretError) -> StatusCode {
        ApiError::from(err).status_code()
    }

    #[test]
    fn test_secret_error_status_mapping() {
        let name = || "s".to_string();
        assert_eq!(secret(SecretError::NotFound { name: name() }), StatusCode::NOT_FOUND);
        assert_eq!(secret(SecretError::AccessDenied { name: name() }), StatusCode::FORBIDDEN);
        assert_eq!(secret(SecretError::ListAccessDenied), StatusCode::FORBIDDEN);
        assert_eq!(
            secret(SecretError::DecryptionFailure { name: name() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            secret(SecretError::EmptySecret { name: name() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            secret(SecretError::ListFailed {
                message: "x".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_the_secret_error_message() {
        let err = ApiError::from(SecretError::NotFound {
            name: "db".to_string(),
        });
        assert_eq!(err.to_string(), "Secret 'db' not found");
    }

    #[test]
    fn test_envelope_shape() {
        let body = ErrorBody {
            error: ErrorDetail {
                message: "Secret 'db' not found".to_string(),
                status_code: 404,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serializes"),
            serde_json::json!({"error": {"message": "Secret 'db' not found", "statusCode": 404}})
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ApiError::BadRequest("names required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
