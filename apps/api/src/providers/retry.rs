use std::time::Duration;

use rand::Rng;

/// Why an attempt is being retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// HTTP 429, with the server's `Retry-After` if it sent one.
    RateLimited { retry_after: Option<Duration> },
    /// Network error, non-200 status or malformed body.
    Failed,
}

/// Retry schedule shared by every provider integration.
///
/// Attempt `n` (0-based) waits `base_delay * multiplier^n`, capped at `max_delay`,
/// plus uniform jitter in `[0, jitter)` where the bound depends on the reason.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    pub rate_limit_jitter: Duration,
    pub error_jitter: Duration,
    pub respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
            rate_limit_jitter: Duration::from_secs(1),
            error_jitter: Duration::from_millis(500),
            respect_retry_after: true,
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        self.base_delay.mul_f64(factor).min(self.max_delay)
    }

    /// Delay before the retry that follows attempt `attempt`, without jitter.
    /// A server-provided `Retry-After` is capped at `max_delay`.
    pub fn base_delay_for(&self, attempt: u32, reason: RetryReason) -> Duration {
        match reason {
            RetryReason::RateLimited {
                retry_after: Some(server_delay),
            } if self.respect_retry_after => server_delay.min(self.max_delay),
            _ => self.backoff(attempt),
        }
    }

    pub fn jitter_bound(&self, reason: RetryReason) -> Duration {
        match reason {
            RetryReason::RateLimited { .. } => self.rate_limit_jitter,
            RetryReason::Failed => self.error_jitter,
        }
    }

    pub fn delay_for(&self, attempt: u32, reason: RetryReason) -> Duration {
        self.base_delay_for(attempt, reason) + random_jitter(self.jitter_bound(reason))
    }
}

fn random_jitter(bound: Duration) -> Duration {
    if bound.is_zero() {
        return Duration::ZERO;
    }
    let millis = rand::thread_rng().gen_range(0..bound.as_millis() as u64);
    Duration::from_millis(millis)
}
