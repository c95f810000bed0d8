//! Node RPC flags.

use blockdex_rpc::RpcClientConfig;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Connection to the Ethereum JSON-RPC node.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
pub struct RpcArgs {
    /// URL of the node's JSON-RPC endpoint.
    #[arg(long = "rpc.url", visible_alias = "rpc", env = "BLOCKDEX_RPC_URL")]
    pub url: Url,
    /// Request timeout in seconds.
    #[arg(long = "rpc.timeout", default_value_t = 30, env = "BLOCKDEX_RPC_TIMEOUT")]
    pub timeout: u64,
}

impl From<&RpcArgs> for RpcClientConfig {
    fn from(args: &RpcArgs) -> Self {
        Self::new(args.url.clone()).with_timeout(Duration::from_secs(args.timeout))
    }
}
