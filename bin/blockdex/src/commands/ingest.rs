//! Ingest Subcommand

use crate::flags::{GlobalArgs, RpcArgs};
use anyhow::Result;
use blockdex_rpc::{HttpBlockSource, RpcClientConfig};
use blockdex_store::IndexStatus;
use clap::Parser;
use std::sync::Arc;

/// The `ingest` Subcommand
///
/// Fetches one block from the node and writes it to the block index, creating
/// the index first if it does not exist.
///
/// # Usage
///
/// ```sh
/// blockdex ingest <BLOCK> --rpc.url <URL> [OPTIONS]
/// ```
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Fetches a block from the node and indexes it")]
pub struct IngestCommand {
    /// The block number to fetch.
    pub block: u64,
    /// Document id to write the block under. Defaults to the block number.
    #[arg(long = "doc-id", env = "BLOCKDEX_DOC_ID")]
    pub doc_id: Option<String>,
    /// Node RPC flags.
    #[command(flatten)]
    pub rpc: RpcArgs,
}

impl IngestCommand {
    /// Runs the subcommand.
    pub async fn run(self, args: &GlobalArgs) -> Result<()> {
        let store = super::connect_store(args).await?;
        let source = HttpBlockSource::new(RpcClientConfig::from(&self.rpc))?;
        tracing::info!(target: "rpc", url = %source.url(), block = self.block, "Fetching block");

        let ingestor = super::ingestor(args, Arc::new(source), store);
        let report = ingestor
            .ingest(self.block, self.doc_id.as_deref())
            .await
            .inspect_err(|err| {
                tracing::error!(
                    target: "ingest",
                    stage = err.stage(),
                    block = self.block,
                    "Ingestion failed"
                )
            })?;

        let index = ingestor.index();
        match report.index_status {
            IndexStatus::Created => tracing::info!(target: "store", index, "Created block index"),
            IndexStatus::Existing => {
                tracing::info!(target: "store", index, "Block index already exists")
            }
        }
        tracing::info!(
            target: "ingest",
            block = report.number,
            hash = %report.hash,
            transactions = report.transactions,
            id = %report.ack.id,
            index = %report.ack.index,
            result = %report.ack.result,
            "Indexed block"
        );
        Ok(())
    }
}
