//! # Secret Values
//!
//! Normalized secret representation and the payload decoding rules.
//!
//! A `SecretString` that parses as JSON becomes `SecretValue::Structured`;
//! anything else is kept verbatim as `SecretValue::Raw`. A `SecretBinary` is
//! base64-decoded to text first and then goes through the same rule.

use super::SecretError;
use crate::provider::UpstreamPayload;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

/// Decoded secret payload
#[derive(Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SecretValue {
    /// Payload parsed as JSON
    Structured(serde_json::Value),
    /// Payload that is not JSON, unchanged
    Raw(String),
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretValue::Structured(_) => f.write_str("Structured(<redacted>)"),
            SecretValue::Raw(_) => f.write_str("Raw(<redacted>)"),
        }
    }
}

impl SecretValue {
    /// Decode textual secret material
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(parsed) => SecretValue::Structured(parsed),
            Err(_) => SecretValue::Raw(text.to_string()),
        }
    }

    /// Decode binary secret material
    ///
    /// The bytes are treated as base64 text and decoded. Raw binary that
    /// happens to fall entirely within the base64 alphabet (e.g. `b"test"`)
    /// is therefore decoded a second time. Bytes that are not valid base64
    /// are read as text directly.
    pub fn from_binary(bytes: &[u8]) -> Self {
        let decoded = STANDARD.decode(bytes);
        let text = match &decoded {
            Ok(raw) => String::from_utf8_lossy(raw),
            Err(_) => String::from_utf8_lossy(bytes),
        };
        Self::from_text(&text)
    }

    /// Structured JSON view, if this value parsed as JSON
    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            SecretValue::Structured(v) => Some(v),
            SecretValue::Raw(_) => None,
        }
    }

    /// Raw text view, if this value is not JSON
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            SecretValue::Structured(_) => None,
            SecretValue::Raw(s) => Some(s),
        }
    }
}

/// Decode an upstream payload for secret `name`
///
/// Text takes precedence over binary; a payload with neither is `EmptySecret`.
///
/// # Errors
///
/// Returns `SecretError::EmptySecret` when the payload carries no value.
pub fn decode_payload(name: &str, payload: &UpstreamPayload) -> Result<SecretValue, SecretError> {
    if let Some(text) = &payload.text {
        return Ok(SecretValue::from_text(text));
    }
    if let Some(bytes) = &payload.binary {
        return Ok(SecretValue::from_binary(bytes));
    }
    Err(SecretError::EmptySecret {
        name: name.to_string(),
    })
}
