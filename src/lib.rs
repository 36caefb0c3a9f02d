//! Secret Cache Gateway Library
//!
//! HTTP façade over AWS Secrets Manager with an in-process TTL cache.
//! The retrieval layer (`secrets`) is usable on its own; `server` wires it
//! into an axum router.

pub mod cache;
pub mod config;
pub mod constants;
pub mod observability;
pub mod provider;
pub mod runtime;
pub mod secrets;
pub mod server;

pub use cache::SecretCache;
pub use secrets::{BatchResult, SecretError, SecretService, SecretValue};
