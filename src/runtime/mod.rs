//! # Runtime Module
//!
//! Process bootstrap: crypto provider, tracing, metrics, upstream client and
//! shutdown signal handling.

pub mod initialization;

pub use initialization::*;
