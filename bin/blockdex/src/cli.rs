//! Contains the blockdex CLI.

use crate::{
    commands::{IngestCommand, QueryCommand},
    flags::GlobalArgs,
};
use anyhow::Result;
use blockdex_cli::cli_styles;
use clap::{Parser, Subcommand};
use std::future::Future;

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetches a block and writes it to the index.
    #[command(alias = "i")]
    Ingest(IngestCommand),
    /// Looks up indexed blocks by field value.
    #[command(alias = "q")]
    Query(QueryCommand),
}

/// The blockdex CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.log_args.init_tracing_subscriber()?;
        self.global.metrics.init_metrics()?;

        let Self { global, subcommand } = self;
        Self::run_until_complete(async move {
            match subcommand {
                Commands::Ingest(cmd) => cmd.run(&global).await,
                Commands::Query(cmd) => cmd.run(&global).await,
            }
        })
    }

    /// Drives `fut` to completion on a fresh multi-threaded runtime.
    pub fn run_until_complete<F>(fut: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(fut)
    }
}
