//! # Secret Retrieval
//!
//! The caching retrieval layer: decoded values, the error taxonomy and the
//! service that fetches-or-serves-from-cache.

mod error;
mod service;
mod value;

pub use error::SecretError;
pub use service::{BatchResult, SecretService};
pub use value::{decode_payload, SecretValue};
