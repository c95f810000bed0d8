//! Utilities for spinning up a prometheus metrics server.

use crate::PrometheusError;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{IpAddr, SocketAddr, TcpListener};
use tracing::info;

/// Starts a Prometheus metrics server on `addr:port` and returns the bound address.
///
/// Port `0` picks a free port.
pub fn init_prometheus_server(addr: IpAddr, port: u16) -> Result<SocketAddr, PrometheusError> {
    let addr = if port == 0 {
        // PrometheusBuilder binds on its own; resolve the port first.
        TcpListener::bind((addr, 0))?.local_addr()?
    } else {
        SocketAddr::from((addr, port))
    };

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    info!(target: "prometheus", "Serving metrics at: http://{}", addr);
    Ok(addr)
}
