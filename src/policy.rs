use std::time::Duration;

use rand::Rng;

/// Backoff configuration for a retry loop.
///
/// Built once before use and never mutated afterwards; callers wanting
/// different settings build a separate policy. An attempt budget of 0 is
/// clamped to 1: the operation always runs at least once.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    pub fn default_policy() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
        }
    }

    /// Jittered delay to wait after failed attempt `attempt` (0-based):
    /// uniform in `[0, min(base_delay * 2^attempt, max_delay))`.
    ///
    /// A zero backoff yields a zero wait without sampling an empty range.
    /// When `base_delay` exceeds `max_delay` the backoff clamps to
    /// `max_delay` from the first attempt on.
    pub fn backoff_for_attempt(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let backoff = self.base_delay.saturating_mul(factor).min(self.max_delay);
        let nanos = backoff.as_nanos().min(u64::MAX as u128) as u64;
        if nanos == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rng.gen_range(0..nanos))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}
