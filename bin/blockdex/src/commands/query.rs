//! Query Subcommand

use crate::flags::GlobalArgs;
use anyhow::Result;
use clap::Parser;

/// The `query` Subcommand
///
/// Runs an exact-match query against the block index and logs the hits.
///
/// # Usage
///
/// ```sh
/// blockdex query --value <VALUE> [--field <FIELD>] [OPTIONS]
/// ```
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Looks up indexed blocks by field value")]
pub struct QueryCommand {
    /// Field to match, as a dotted path into the stored document.
    #[arg(long, default_value = "id")]
    pub field: String,
    /// Value the field must equal.
    #[arg(long)]
    pub value: String,
    /// Number of matches to skip.
    #[arg(long, default_value_t = 0)]
    pub from: u64,
    /// Maximum number of matches to return.
    #[arg(long, default_value_t = 10)]
    pub size: u64,
}

impl QueryCommand {
    /// Runs the subcommand.
    pub async fn run(self, args: &GlobalArgs) -> Result<()> {
        let store = super::connect_store(args).await?;
        let index = args.store.index.as_str();
        let res = super::querier(args, store)
            .find_by_field(&self.field, &self.value, self.from, self.size)
            .await
            .inspect_err(|err| {
                tracing::error!(
                    target: "ingest",
                    stage = err.stage(),
                    field = %self.field,
                    "Query failed"
                )
            })?;

        tracing::info!(
            target: "store",
            index,
            took_ms = res.took_millis,
            "Query took {} milliseconds",
            res.took_millis
        );
        for hit in &res.hits {
            tracing::info!(
                target: "store",
                id = %hit.id,
                number = %hit.block.result.number,
                hash = %hit.block.result.hash,
                "Block {}: {}",
                hit.block.result.number,
                hit.block.result.hash
            );
        }
        tracing::info!(
            target: "store",
            total = res.total_hits,
            "Found a total of {} blocks",
            res.total_hits
        );
        Ok(())
    }
}
