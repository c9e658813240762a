//! Neo4j schema initialization (constraints).

use neo4rs::Query;
use tracing::info;

use twinsync_core::SyncResult;

use crate::GraphClient;

/// Cypher statements for schema initialization.
///
/// Ids are unique per label. Names are unique per label too: the name is
/// the join key for relationship operations, so a collision would make
/// endpoint lookups ambiguous.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT asset_id IF NOT EXISTS FOR (a:Asset) REQUIRE a.id IS UNIQUE",
    "CREATE CONSTRAINT device_id IF NOT EXISTS FOR (d:Device) REQUIRE d.id IS UNIQUE",
    "CREATE CONSTRAINT asset_name IF NOT EXISTS FOR (a:Asset) REQUIRE a.name IS UNIQUE",
    "CREATE CONSTRAINT device_name IF NOT EXISTS FOR (d:Device) REQUIRE d.name IS UNIQUE",
];

/// Initialize constraints. Safe to run multiple times — every statement
/// carries IF NOT EXISTS.
pub async fn initialize_schema(client: &GraphClient) -> SyncResult<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new((*statement).to_string())).await?;
    }

    info!(
        "Neo4j schema initialized ({} statements)",
        SCHEMA_STATEMENTS.len()
    );
    Ok(())
}
