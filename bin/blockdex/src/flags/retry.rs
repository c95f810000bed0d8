//! Retry flags.

use blockdex_ingest::RetryConfig;
use clap::Parser;
use std::time::Duration;

/// Bounded exponential backoff for network calls.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
pub struct RetryArgs {
    /// Retries after the first attempt of a failed network call.
    #[arg(long = "retry.max", global = true, default_value_t = 3, env = "BLOCKDEX_RETRY_MAX")]
    pub max_retries: usize,
    /// Delay before the first retry, in milliseconds.
    #[arg(
        long = "retry.min-delay",
        global = true,
        default_value_t = 100,
        env = "BLOCKDEX_RETRY_MIN_DELAY"
    )]
    pub min_delay_ms: u64,
    /// Upper bound on any retry delay, in milliseconds.
    #[arg(
        long = "retry.max-delay",
        global = true,
        default_value_t = 2_000,
        env = "BLOCKDEX_RETRY_MAX_DELAY"
    )]
    pub max_delay_ms: u64,
}

impl Default for RetryArgs {
    fn default() -> Self {
        Self { max_retries: 3, min_delay_ms: 100, max_delay_ms: 2_000 }
    }
}

impl From<&RetryArgs> for RetryConfig {
    fn from(args: &RetryArgs) -> Self {
        Self {
            max_retries: args.max_retries,
            min_delay: Duration::from_millis(args.min_delay_ms),
            max_delay: Duration::from_millis(args.max_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_opts_into_library_default() {
        assert_eq!(RetryConfig::from(&RetryArgs::default()), RetryConfig::default());
        assert_ne!(RetryConfig::from(&RetryArgs::default()), RetryConfig::disabled());
    }

    #[test]
    fn test_retry_flags() {
        let args = RetryArgs::try_parse_from([
            "test",
            "--retry.max",
            "5",
            "--retry.min-delay",
            "10",
            "--retry.max-delay",
            "50",
        ])
        .unwrap();
        let config = RetryConfig::from(&args);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.min_delay, Duration::from_millis(10));
        assert_eq!(config.max_delay, Duration::from_millis(50));
    }
}
