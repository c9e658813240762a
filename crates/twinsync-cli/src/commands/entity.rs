//! Asset and device commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use twinsync_core::EntityStore;

use crate::output;

use super::{graph_store, parse_kind, platform, PolicyArg};

#[derive(Subcommand)]
pub enum EntityCommands {
    /// List entities of a kind, drafts first
    List {
        /// asset or device
        kind: String,
    },

    /// Create a draft entity in the local graph
    Create {
        /// asset or device
        kind: String,
        /// Unique entity name
        name: String,
        /// Category, e.g. Building or Sensor
        #[arg(long = "type")]
        entity_type: String,
        /// Descriptive tag (devices only, defaults to "Device")
        #[arg(long)]
        label: Option<String>,
    },

    /// Delete an entity by id
    Delete {
        /// Entity id (local draft id or canonical id)
        id: String,
        /// How far the delete reaches
        #[arg(long, value_enum, default_value = "local")]
        policy: PolicyArg,
    },
}

pub async fn execute(cmd: EntityCommands) -> Result<()> {
    let store = graph_store().await?;

    match cmd {
        EntityCommands::List { kind } => {
            let kind = parse_kind(&kind)?;
            let entities = store.list_entities(kind).await?;
            output::print_entities_table(&entities);
            Ok(())
        }

        EntityCommands::Create {
            kind,
            name,
            entity_type,
            label,
        } => {
            let kind = parse_kind(&kind)?;
            let id = store
                .create_draft(kind, &name, &entity_type, label.as_deref())
                .await?;
            println!(
                "{} {} {}",
                "Draft created:".green().bold(),
                name,
                format!("({id})").dimmed()
            );
            println!("Run {} to sync it to the platform.", "twinsync push".bold());
            Ok(())
        }

        EntityCommands::Delete { id, policy } => {
            let outcome =
                twinsync_engine::delete_entity(&store, &platform(), &id, policy.into()).await?;
            output::print_deletion_outcome(&outcome);
            Ok(())
        }
    }
}
