use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use retryer::{RetryExecutor, RetryPolicy};

#[tokio::test]
async fn recovery_within_jitter_bounds() {
    let executor = RetryExecutor::new(RetryPolicy::new(
        3,
        Duration::from_millis(10),
        Duration::from_millis(20),
    ))
    .with_rng(StdRng::seed_from_u64(42));

    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();
    let start = Instant::now();

    let result = executor
        .run(&CancellationToken::new(), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("busy".to_string())
                } else {
                    Ok(42u32)
                }
            }
        })
        .await;

    let elapsed = start.elapsed();

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    // Waits drawn from [0, 10ms) and [0, 20ms), plus scheduling slack.
    assert!(
        elapsed <= Duration::from_millis(130),
        "elapsed {:?} exceeds jitter bounds",
        elapsed
    );
}
