//! Bounded retries for network stages.

use backon::{ExponentialBuilder, Retryable};
use std::{fmt::Display, future::Future, time::Duration};

/// Retry policy for network calls.
///
/// A call is attempted once and then retried up to `max_retries` times, with
/// exponentially growing delays between `min_delay` and `max_delay`.
///
/// The [`Default`] policy allows three retries. Pipeline components start with
/// [`RetryConfig::disabled`] and only retry once a policy is passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: usize,
    /// Delay before the first retry.
    pub min_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub const fn disabled() -> Self {
        Self { max_retries: 0, min_delay: Duration::ZERO, max_delay: Duration::ZERO }
    }

    /// Returns the backoff schedule for this policy.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
    }

    /// Runs `op`, retrying failures for which `is_retryable` holds.
    ///
    /// `stage` names the operation in retry logs.
    pub async fn run<T, E, F, Fut>(
        &self,
        stage: &'static str,
        is_retryable: fn(&E) -> bool,
        op: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        op.retry(self.backoff())
            .when(is_retryable)
            .notify(|err: &E, after: Duration| {
                warn!(target: "ingest", stage, %err, ?after, "Retrying after transient failure");
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Failure {
        transient: bool,
    }

    impl Display for Failure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "transient: {}", self.transient)
        }
    }

    fn quick(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let calls = &AtomicUsize::new(0);
        let res = quick(3)
            .run("test", |e: &Failure| e.transient, move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Failure { transient: true })
                } else {
                    Ok(7)
                }
            })
            .await;
        assert_eq!(res.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = &AtomicUsize::new(0);
        let res: Result<(), _> = quick(2)
            .run("test", |e: &Failure| e.transient, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Failure { transient: true })
            })
            .await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = &AtomicUsize::new(0);
        let res: Result<(), _> = quick(5)
            .run("test", |e: &Failure| e.transient, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Failure { transient: false })
            })
            .await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_policy_tries_once() {
        let calls = &AtomicUsize::new(0);
        let res: Result<(), _> = RetryConfig::disabled()
            .run("test", |e: &Failure| e.transient, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Failure { transient: true })
            })
            .await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
