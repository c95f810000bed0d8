//! Global arguments for the CLI.

use super::{RetryArgs, StoreArgs};
use blockdex_cli::{LogArgs, MetricsArgs};
use clap::Parser;

/// Global arguments for the CLI.
#[derive(Parser, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Document store arguments.
    #[command(flatten)]
    pub store: StoreArgs,
    /// Retry policy for network calls.
    #[command(flatten)]
    pub retry: RetryArgs,
    /// Prometheus CLI arguments.
    #[command(flatten)]
    pub metrics: MetricsArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = GlobalArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.log_args.level, 0);
        assert_eq!(args.store.index, "block");
        assert_eq!(args.retry, RetryArgs::default());
        assert!(!args.metrics.enabled);
    }
}
