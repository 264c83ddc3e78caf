//! Resilience patterns for calls to flaky external tools.
//!
//! - **`config`**: `RetryConfig`, the attempt budget and backoff sequence.
//! - **`retry`**: a blocking retry loop that honours
//!   `Error::is_retryable` and backs off between attempts.

pub mod config;
pub mod retry;

pub use config::RetryConfig;
pub use retry::retry;
