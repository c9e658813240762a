//! Relationship commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use twinsync_core::{EntityStore, RelationType};

use crate::output;

use super::{graph_store, platform, PolicyArg};

#[derive(Subcommand)]
pub enum LinkCommands {
    /// List all relationships
    List,

    /// Create a draft relationship between two named entities
    Create {
        /// Source entity name
        from: String,
        /// Target entity name
        to: String,
        /// Relationship type, e.g. Contains
        #[arg(long = "type")]
        rel_type: String,
    },

    /// Push one relationship to the platform
    Push {
        from: String,
        to: String,
        #[arg(long = "type")]
        rel_type: String,
    },

    /// Delete a relationship
    Delete {
        from: String,
        to: String,
        #[arg(long = "type")]
        rel_type: String,
        /// How far the delete reaches
        #[arg(long, value_enum, default_value = "local")]
        policy: PolicyArg,
    },
}

pub async fn execute(cmd: LinkCommands) -> Result<()> {
    let store = graph_store().await?;

    match cmd {
        LinkCommands::List => {
            let relationships = store.list_relationships().await?;
            output::print_relationships_table(&relationships);
            Ok(())
        }

        LinkCommands::Create { from, to, rel_type } => {
            let rel_type = RelationType::new(&rel_type)?;
            store.create_relationship(&from, &to, &rel_type).await?;
            println!(
                "{} {} -[{}]-> {}",
                "Draft relationship:".green().bold(),
                from,
                rel_type,
                to
            );
            Ok(())
        }

        LinkCommands::Push { from, to, rel_type } => {
            let rel_type = RelationType::new(&rel_type)?;
            match twinsync_engine::push_relationship(&store, &platform(), &from, &to, &rel_type)
                .await
            {
                Ok(()) => {
                    println!("{}", "Relationship synced to platform.".green().bold());
                    Ok(())
                }
                Err(e) if e.is_blocking_warning() => {
                    println!("{}", e.to_string().yellow());
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }

        LinkCommands::Delete {
            from,
            to,
            rel_type,
            policy,
        } => {
            let rel_type = RelationType::new(&rel_type)?;
            let outcome = twinsync_engine::delete_relationship(
                &store,
                &platform(),
                &from,
                &to,
                &rel_type,
                policy.into(),
            )
            .await?;
            output::print_deletion_outcome(&outcome);
            Ok(())
        }
    }
}
