//! Twinsync CLI
//!
//! Keeps a local Neo4j infrastructure graph and a remote IoT platform in
//! step: author drafts locally, push them out, pull remote state back in.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "twinsync=debug"
    } else {
        "twinsync=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute().await
}
