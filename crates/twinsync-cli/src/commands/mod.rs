//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use twinsync_core::{DeletionPolicy, EntityKind};
use twinsync_graph::{GraphClient, GraphConfig, GraphStore};
use twinsync_platform::PlatformClient;

pub mod admin;
pub mod entity;
pub mod link;
pub mod sync;

/// Twinsync - IoT infrastructure graph synchronization
#[derive(Parser)]
#[command(name = "twinsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize graph constraints
    Init,

    /// Show graph contents and sync state
    Status,

    /// Verify platform credentials and connectivity
    Check,

    /// Manage assets and devices
    #[command(subcommand)]
    Entity(entity::EntityCommands),

    /// Manage relationships between entities
    #[command(subcommand)]
    Link(link::LinkCommands),

    /// Push local drafts to the platform
    Push(sync::PushArgs),

    /// Pull platform state into the local graph
    Pull(sync::PullArgs),

    /// Run the bulk ETL refresh end-to-end
    Etl(sync::EtlArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Init => admin::init().await,
            Commands::Status => admin::status().await,
            Commands::Check => admin::check().await,
            Commands::Entity(cmd) => entity::execute(cmd).await,
            Commands::Link(cmd) => link::execute(cmd).await,
            Commands::Push(args) => sync::push(args).await,
            Commands::Pull(args) => sync::pull(args).await,
            Commands::Etl(args) => sync::etl(args).await,
        }
    }
}

/// Deletion reach, from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Remove from the local graph only
    Local,
    /// Remove from the remote platform first, then the local graph
    Both,
}

impl From<PolicyArg> for DeletionPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Local => DeletionPolicy::LocalOnly,
            PolicyArg::Both => DeletionPolicy::LocalAndRemote,
        }
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<EntityKind> {
    EntityKind::parse(raw)
        .ok_or_else(|| anyhow::anyhow!("Unknown entity kind '{raw}' (expected asset or device)"))
}

/// Connect to Neo4j and wrap the pool in the entity store. One connection
/// per invocation, shared by every operation the command runs.
pub(crate) async fn graph_store() -> Result<GraphStore> {
    let config = GraphConfig::from_env();
    let client = GraphClient::connect(&config).await?;
    Ok(GraphStore::new(client))
}

pub(crate) fn platform() -> PlatformClient {
    PlatformClient::from_env()
}
