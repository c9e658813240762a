//! Push, pull and bulk ETL commands.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use twinsync_core::EntityKind;

use crate::output;

use super::{graph_store, parse_kind, platform};

#[derive(Args)]
pub struct PushArgs {
    /// Restrict the push to one kind (asset or device)
    #[arg(long)]
    pub kind: Option<String>,
}

pub async fn push(args: PushArgs) -> Result<()> {
    let store = graph_store().await?;
    let directory = platform();

    let kinds: Vec<EntityKind> = match args.kind {
        Some(raw) => vec![parse_kind(&raw)?],
        None => EntityKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!(
            "{}",
            format!("Pushing draft {}...", kind.api_collection()).bold()
        );
        let report = twinsync_engine::push_entities(&store, &directory, kind).await?;
        output::print_severity_line(report.severity(), &report.summary());
    }

    Ok(())
}

#[derive(Args)]
pub struct PullArgs {
    /// Also delete local entities that no longer exist remotely
    #[arg(long)]
    pub align: bool,
}

pub async fn pull(args: PullArgs) -> Result<()> {
    let store = graph_store().await?;
    let directory = platform();

    println!("{}", "Pulling from platform...".bold());
    let report = twinsync_engine::pull(&store, &directory, args.align).await?;
    println!("{}", report.summary().green());

    Ok(())
}

#[derive(Args)]
pub struct EtlArgs {
    /// Wipe local Asset and Device nodes before importing
    #[arg(long)]
    pub wipe: bool,

    /// Confirm the destructive wipe
    #[arg(long)]
    pub confirm: bool,
}

/// Full refresh from the platform, printing progress as it goes. Without
/// `--wipe` this is an aligned pull; with it, the graph is cleared first
/// and rebuilt from remote state alone.
pub async fn etl(args: EtlArgs) -> Result<()> {
    let store = graph_store().await?;
    let directory = platform();

    println!("{}", "Starting ETL process...".bold());

    if args.wipe {
        if !args.confirm {
            println!(
                "{}",
                "This will delete every Asset and Device node in the local graph."
                    .red()
                    .bold()
            );
            println!("Run with {} to confirm.", "--confirm".bold());
            return Ok(());
        }
        store.clear().await?;
        println!("  {} Local graph cleared", "✓".green());
    }

    // A wiped graph has nothing left to align against.
    let report = twinsync_engine::pull(&store, &directory, !args.wipe).await?;

    println!();
    println!("{} {}", "ETL complete!".green().bold(), report.summary());
    Ok(())
}
