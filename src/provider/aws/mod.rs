//! # AWS Providers
//!
//! - `secrets_manager`: AWS Secrets Manager, the gateway's upstream store

pub mod secrets_manager;

pub use secrets_manager::AwsSecretManager;
