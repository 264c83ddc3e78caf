//! Blocking retry loop with exponential backoff.

use super::config::RetryConfig;
use opref_core::Result;
use std::thread::sleep;

/// Execute an operation with retry logic
///
/// Only errors for which [`opref_core::Error::is_retryable`] holds are retried;
/// anything else is returned immediately. Every retryable failure is followed
/// by a backoff sleep, the last one included, so a spent budget has waited out
/// the whole sequence before the last error is returned. The sleep blocks the
/// calling thread.
pub fn retry<F, T>(config: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation() {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!("Operation succeeded after {attempt} retries");
                }
                return Ok(result);
            }
            Err(error) if error.is_retryable() => {
                let delay = config.calculate_delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    "retrying in {:.0} seconds...",
                    delay.as_secs_f64()
                );
                sleep(delay);
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(error);
                }
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opref_core::Error;
    use std::time::{Duration, Instant};

    fn transient() -> Error {
        Error::command_execution("op", vec![], "see https://status.1password.com", Some(1), true)
    }

    fn permanent() -> Error {
        Error::command_execution("op", vec![], "not signed in", Some(1), false)
    }

    #[test]
    fn test_returns_output_without_error() {
        let mut calls = 0;
        let result = retry(&RetryConfig::immediate(3), || {
            calls += 1;
            Ok("output")
        });
        assert_eq!(result.unwrap(), "output");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_retries_until_budget_is_spent() {
        let mut calls = 0;
        let result: Result<()> = retry(&RetryConfig::immediate(5), || {
            calls += 1;
            Err(transient())
        });
        let err = result.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "see https://status.1password.com");
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_recovers_on_later_attempt() {
        let mut calls = 0;
        let result = retry(&RetryConfig::immediate(3), || {
            calls += 1;
            if calls > 2 {
                Ok("success")
            } else {
                Err(transient())
            }
        });
        assert_eq!(result.unwrap(), "success");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_non_retryable_stops_immediately() {
        let mut calls = 0;
        let config = RetryConfig::default();
        let result: Result<()> = retry(&config, || {
            calls += 1;
            Err(permanent())
        });
        assert_eq!(result.unwrap_err().to_string(), "not signed in");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let mut calls = 0;
        let result: Result<()> = retry(&RetryConfig::immediate(0), || {
            calls += 1;
            Err(transient())
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_sleeps_after_every_retryable_failure() {
        let mut calls = 0;
        let start = Instant::now();
        let result: Result<()> = retry(&RetryConfig::new(3, Duration::from_millis(10)), || {
            calls += 1;
            Err(transient())
        });
        let elapsed = start.elapsed();

        assert!(result.is_err());
        assert_eq!(calls, 3);
        // 20ms + 40ms + 80ms
        assert!(elapsed >= Duration::from_millis(140), "elapsed {elapsed:?}");
    }

    #[test]
    fn test_non_retryable_failure_does_not_sleep() {
        let start = Instant::now();
        let result: Result<()> =
            retry(&RetryConfig::new(5, Duration::from_secs(10)), || Err(permanent()));

        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
