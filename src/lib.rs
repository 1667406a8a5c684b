mod errors;
mod executor;
mod outcome;
mod policy;
mod sink;

pub use errors::RetryError;
pub use executor::RetryExecutor;
pub use outcome::RetryOutcome;
pub use policy::RetryPolicy;
pub use sink::{DiagnosticSink, DiscardSink, WriteSink};

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn it_works() {
        let executor: RetryExecutor<std::io::Error> = RetryExecutor::default();
        let result = executor
            .run(&CancellationToken::new(), || async { Ok(7u64) })
            .await
            .expect("first attempt should succeed");
        assert_eq!(result, 7);
    }
}
