//! HTTP API integration tests
//!
//! Organized by endpoint group.

pub mod batch;
pub mod cache;
pub mod common;
pub mod operational;
pub mod secrets;
