//! Schema, status and connectivity commands.

use anyhow::Result;
use colored::Colorize;

use twinsync_core::{Directory, EntityKind};

use super::{graph_store, platform};

/// Initialize uniqueness constraints in Neo4j.
pub async fn init() -> Result<()> {
    let store = graph_store().await?;
    twinsync_graph::schema::initialize_schema(store.client()).await?;
    println!("{}", "Graph constraints initialized.".green().bold());
    Ok(())
}

/// Show node/relationship counts and how much is still unsynced.
pub async fn status() -> Result<()> {
    let store = graph_store().await?;
    let counts = store.counts().await?;

    println!("{}", "Local Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Assets:        {}", counts.assets.to_string().cyan());
    println!("  Devices:       {}", counts.devices.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());
    let drafts = if counts.drafts > 0 {
        counts.drafts.to_string().yellow()
    } else {
        counts.drafts.to_string().green()
    };
    println!("  Unsynced:      {drafts}");
    println!("{}", "─".repeat(40));

    Ok(())
}

/// Authenticate against the platform and list remote assets, as a smoke
/// test for credentials and reachability.
pub async fn check() -> Result<()> {
    let directory = platform();

    let token = directory.authenticate().await?;
    println!("{}", "Authentication successful.".green());

    let assets = directory.list_entities(&token, EntityKind::Asset).await?;
    println!("Found {} assets on the platform.", assets.len().to_string().bold());
    for asset in &assets {
        println!(
            "  {} {} {}",
            "•".dimmed(),
            asset.name,
            format!("({})", asset.entity_type).dimmed()
        );
    }

    Ok(())
}
