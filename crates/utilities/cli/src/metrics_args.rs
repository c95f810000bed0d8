//! Prometheus metrics CLI arguments.

use crate::{PrometheusError, init_prometheus_server};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

/// Configuration for the Prometheus exporter.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct MetricsArgs {
    /// Serve metrics over HTTP.
    #[arg(
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "BLOCKDEX_METRICS_ENABLED"
    )]
    pub enabled: bool,
    /// Port of the metrics server.
    #[arg(long = "metrics.port", global = true, default_value_t = 9090, env = "BLOCKDEX_METRICS_PORT")]
    pub port: u16,
    /// Address of the metrics server.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "BLOCKDEX_METRICS_ADDR"
    )]
    pub addr: IpAddr,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, port: 9090, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    }
}

impl MetricsArgs {
    /// Starts the exporter if metrics are enabled.
    pub fn init_metrics(&self) -> Result<(), PrometheusError> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        metrics: MetricsArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.metrics, MetricsArgs::default());
    }

    #[test]
    fn test_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "--metrics.enabled",
            "--metrics.port",
            "9191",
            "--metrics.addr",
            "127.0.0.1",
        ])
        .unwrap();
        assert!(cli.metrics.enabled);
        assert_eq!(cli.metrics.port, 9191);
        assert_eq!(cli.metrics.addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_disabled_does_nothing() {
        MetricsArgs::default().init_metrics().unwrap();
    }
}
