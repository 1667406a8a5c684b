use std::fmt;
use std::future::Future;

use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::errors::RetryError;
use crate::outcome::RetryOutcome;
use crate::policy::RetryPolicy;
use crate::sink::{DiagnosticSink, DiscardSink};

type RetryCondition<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Runs an operation under a bounded-retry, exponential-backoff-with-jitter
/// policy, honoring external cancellation.
///
/// Configuration is fixed at construction; build a separate executor for
/// different settings. A single executor may be shared across tasks.
pub struct RetryExecutor<E> {
    policy: RetryPolicy,
    condition: RetryCondition<E>,
    sink: Box<dyn DiagnosticSink>,
    rng: Mutex<StdRng>,
}

impl<E> RetryExecutor<E> {
    /// Executor retrying every error, with a discarding diagnostic sink.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            condition: Box::new(|_| true),
            sink: Box::new(DiscardSink),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Replaces the predicate deciding whether a failed attempt is retried.
    /// Called with the error from the most recent attempt; returning false
    /// surfaces that error immediately.
    pub fn with_retry_condition(
        mut self,
        condition: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.condition = Box::new(condition);
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Injects a seeded RNG for deterministic jitter.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }
}

impl<E: fmt::Display> RetryExecutor<E> {
    /// Invokes `op` until it succeeds, the retry condition rejects its error,
    /// the attempt budget is exhausted, or `cancel` fires.
    ///
    /// A token already cancelled at call time returns
    /// [`RetryError::Cancelled`] without invoking the operation. Cancellation
    /// during an inter-attempt wait wakes the wait early and takes precedence
    /// over the pending retry. No delay is inserted after the final attempt.
    pub async fn run<F, Fut, T>(
        &self,
        cancel: &CancellationToken,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let budget = self.policy.max_attempts;
        let start = Instant::now();
        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                self.finish(attempt, false, start);
                return Err(RetryError::Cancelled);
            }

            match op().await {
                Ok(value) => {
                    self.finish(attempt + 1, true, start);
                    return Ok(value);
                }
                Err(err) => {
                    if !(self.condition)(&err) || attempt + 1 >= budget {
                        self.finish(attempt + 1, false, start);
                        return Err(RetryError::Operation(err));
                    }

                    self.sink.append(&format!(
                        "Attempt {}/{} failed: {}",
                        attempt + 1,
                        budget,
                        err
                    ));

                    let delay = {
                        let mut rng = self.rng.lock().await;
                        self.policy.backoff_for_attempt(attempt, &mut *rng)
                    };
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = budget,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retry.scheduling"
                    );

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            self.finish(attempt + 1, false, start);
                            return Err(RetryError::Cancelled);
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn finish(&self, attempts: u32, success: bool, start: Instant) {
        RetryOutcome {
            attempts,
            success,
            total_delay: start.elapsed(),
        }
        .log();
    }
}

impl<E> Default for RetryExecutor<E> {
    fn default() -> Self {
        Self::new(RetryPolicy::default_policy())
    }
}
