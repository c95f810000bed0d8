//! Stage bookkeeping shared by ingestion and queries.

use std::future::Future;

/// Awaits one pipeline stage, recording its outcome.
pub(crate) async fn observe<T, E>(
    stage: &'static str,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    #[cfg(feature = "metrics")]
    let start = std::time::Instant::now();

    let res = fut.await;
    trace!(target: "ingest", stage, ok = res.is_ok(), "Stage finished");

    #[cfg(feature = "metrics")]
    crate::Metrics::record_stage(stage, start.elapsed(), res.is_ok());
    res
}
