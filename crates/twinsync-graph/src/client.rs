//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;

use twinsync_core::{SyncError, SyncResult};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
        }
    }
}

impl GraphConfig {
    /// Read `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD` from the
    /// environment, falling back to local-development defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: std::env::var("NEO4J_URI").unwrap_or(defaults.uri),
            user: std::env::var("NEO4J_USER").unwrap_or(defaults.user),
            password: std::env::var("NEO4J_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

/// Client owning the Neo4j connection pool.
///
/// Acquired once per process and shared across every store operation; the
/// pool is the long-lived graph handle.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect and verify the connection.
    ///
    /// neo4rs uses a lazy pool — `Graph::connect` only creates the pool
    /// object without opening a bolt connection. A cheap `RETURN 1` ping
    /// forces the handshake so an unreachable Neo4j fails fast here rather
    /// than hanging inside the first real operation.
    pub async fn connect(config: &GraphConfig) -> SyncResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(4)
            .fetch_size(50)
            .build()
            .map_err(SyncError::graph)?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(SyncError::graph)?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| SyncError::Graph(format!("Neo4j is not responding: {e}")))?;

        Ok(Self { graph })
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> SyncResult<()> {
        self.graph.run(query).await.map_err(SyncError::graph)?;
        Ok(())
    }

    /// Execute a Cypher query and collect all rows.
    pub async fn query(&self, query: Query) -> SyncResult<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await.map_err(SyncError::graph)?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> SyncResult<Option<T>> {
        let rows = self.query(query).await?;
        match rows.into_iter().next() {
            Some(row) => {
                let val: T = row
                    .get(field)
                    .map_err(|e| SyncError::Graph(format!("missing field '{field}': {e:?}")))?;
                Ok(Some(val))
            }
            None => Ok(None),
        }
    }
}
