//! Metrics recorded by the ingestion pipeline.

use std::time::Duration;

/// Metric names and recording helpers for the [`Ingestor`](crate::Ingestor).
#[derive(Debug, Clone, Copy)]
pub struct Metrics;

impl Metrics {
    /// Blocks fetched, decoded and written.
    pub const INGESTED_BLOCKS_TOTAL: &'static str = "blockdex_ingest_blocks_total";
    /// Failed stages, labeled by `stage`.
    pub const STAGE_ERRORS_TOTAL: &'static str = "blockdex_ingest_stage_errors_total";
    /// Stage latency including retries, labeled by `stage`.
    pub const STAGE_DURATION_SECONDS: &'static str = "blockdex_ingest_stage_duration_seconds";

    /// The labeled pipeline stages.
    pub const STAGES: [&'static str; 5] = ["fetch", "decode", "schema", "write", "query"];

    /// Describes and zeroes all metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::INGESTED_BLOCKS_TOTAL,
            metrics::Unit::Count,
            "Total number of blocks written to the index",
        );
        metrics::describe_counter!(
            Self::STAGE_ERRORS_TOTAL,
            metrics::Unit::Count,
            "Total number of failed pipeline stages",
        );
        metrics::describe_histogram!(
            Self::STAGE_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Latency of pipeline stages, including retries",
        );
    }

    fn zero() {
        metrics::counter!(Self::INGESTED_BLOCKS_TOTAL).increment(0);
        for stage in Self::STAGES {
            metrics::counter!(Self::STAGE_ERRORS_TOTAL, "stage" => stage).increment(0);
        }
    }

    /// Records the outcome of one stage.
    pub fn record_stage(stage: &'static str, elapsed: Duration, ok: bool) {
        metrics::histogram!(Self::STAGE_DURATION_SECONDS, "stage" => stage)
            .record(elapsed.as_secs_f64());
        if !ok {
            metrics::counter!(Self::STAGE_ERRORS_TOTAL, "stage" => stage).increment(1);
        }
    }

    /// Records a fully ingested block.
    pub fn record_ingested() {
        metrics::counter!(Self::INGESTED_BLOCKS_TOTAL).increment(1);
    }
}
