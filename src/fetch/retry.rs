//! Bounded retry schedule for page requests.

use std::time::Duration;

/// Exponential backoff with a fixed number of attempts.
///
/// The delay before attempt `n + 1` is `base_delay * multiplier^(n - 1)`, so
/// three attempts with a one second base and a 1.5 multiplier wait 1 s and
/// then 1.5 s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made and the
    /// multiplier never shrinks the delay.
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            multiplier: multiplier.max(1.0),
        }
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Waits between consecutive attempts (`max_attempts - 1` entries).
    ///
    /// Suitable as a `tokio_retry` strategy.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let base = self.base_delay;
        let multiplier = self.multiplier;
        (0..self.max_attempts - 1).map(move |retry| base.mul_f64(multiplier.powi(retry as i32)))
    }
}
