//! Shared utilities for opref
//!
//! Retry/backoff for calls to external tools and tracing setup used by the
//! binary.

pub mod resilience;
pub mod tracing;

pub use resilience::*;
