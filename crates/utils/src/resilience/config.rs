//! Retry configuration.

use opref_core::DEFAULT_RETRY_ATTEMPTS;
use std::time::Duration;

/// Default base delay for exponential backoff
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: usize,
    /// Unit the backoff sequence is expressed in
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryConfig {
    /// Create a retry config with the given attempt budget and base delay
    #[must_use]
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// A config that never waits between attempts
    #[must_use]
    pub fn immediate(max_attempts: usize) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Delay to wait after the failed attempt `attempt` (0-indexed).
    ///
    /// The sequence is `base_delay * (2 << attempt)`: 2, 4, 8, 16, 32 units.
    #[must_use]
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX).saturating_add(1);
        self.base_delay.saturating_mul(2u32.saturating_pow(exponent))
    }
}
