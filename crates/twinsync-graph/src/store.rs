//! The entity store contract on top of Neo4j.
//!
//! Relationships are addressed by the `(from_name, rel_type, to_name)`
//! triple and endpoints are resolved by name at operation time. Renaming an
//! entity is unsupported: existing relationships would silently fall out of
//! lookup.

use async_trait::async_trait;
use neo4rs::{Query, Row};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use twinsync_core::{
    Entity, EntityKind, EntityStore, RelationType, Relationship, SyncError, SyncResult, SyncStatus,
};

use crate::GraphClient;

/// Entity store backed by the shared [`GraphClient`] pool.
#[derive(Clone)]
pub struct GraphStore {
    client: GraphClient,
}

/// Node and relationship tallies for status display.
#[derive(Debug, Clone)]
pub struct StoreCounts {
    pub assets: i64,
    pub devices: i64,
    pub relationships: i64,
    pub drafts: i64,
}

fn get_field<T: DeserializeOwned>(row: &Row, field: &str) -> SyncResult<T> {
    row.get(field)
        .map_err(|e| SyncError::Graph(format!("bad row field '{field}': {e:?}")))
}

/// Build an [`Entity`] from a row carrying id/name/type/label/status.
fn entity_from_row(row: &Row, kind: EntityKind) -> SyncResult<Entity> {
    let status: Option<String> = get_field(row, "status")?;
    Ok(Entity {
        local_id: get_field(row, "id")?,
        name: get_field(row, "name")?,
        entity_type: get_field::<Option<String>>(row, "type")?.unwrap_or_default(),
        kind,
        label: get_field(row, "label")?,
        status: SyncStatus::parse(status.as_deref()),
    })
}

/// Same, but the kind comes from the node's labels.
fn entity_from_labeled_row(row: &Row) -> SyncResult<Entity> {
    let labels: Vec<String> = get_field(row, "labels")?;
    let kind = labels
        .iter()
        .find_map(|l| EntityKind::parse(l))
        .ok_or_else(|| SyncError::Graph(format!("node has no entity label: {labels:?}")))?;
    entity_from_row(row, kind)
}

const ENTITY_FIELDS: &str =
    "n.id AS id, n.name AS name, n.type AS type, n.label AS label, n.status AS status";

impl GraphStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Node and relationship counts for the status display.
    pub async fn counts(&self) -> SyncResult<StoreCounts> {
        Ok(StoreCounts {
            assets: self.count("MATCH (n:Asset) RETURN count(n) AS count").await?,
            devices: self.count("MATCH (n:Device) RETURN count(n) AS count").await?,
            relationships: self
                .count(
                    "MATCH (a)-[r]->(b) \
                     WHERE (a:Asset OR a:Device) AND (b:Asset OR b:Device) \
                     RETURN count(r) AS count",
                )
                .await?,
            drafts: self
                .count(
                    "MATCH (n) WHERE (n:Asset OR n:Device) AND n.status = 'draft' \
                     RETURN count(n) AS count",
                )
                .await?,
        })
    }

    async fn count(&self, cypher: &str) -> SyncResult<i64> {
        let count = self
            .client
            .query_scalar::<i64>(Query::new(cypher.to_string()), "count")
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Remove every Asset and Device node (and their relationships).
    /// Destructive; only the explicit ETL wipe path calls this.
    pub async fn clear(&self) -> SyncResult<()> {
        warn!("Clearing all Asset and Device nodes from the graph");
        self.client
            .execute(Query::new(
                "MATCH (n) WHERE (n:Asset OR n:Device) DETACH DELETE n".to_string(),
            ))
            .await
    }
}

#[async_trait]
impl EntityStore for GraphStore {
    async fn list_entities(&self, kind: EntityKind) -> SyncResult<Vec<Entity>> {
        // "draft" sorts before "synced", so ASC surfaces drafts first.
        let query = Query::new(format!(
            "MATCH (n:{label}) RETURN {ENTITY_FIELDS} ORDER BY n.status ASC, n.name ASC",
            label = kind.node_label()
        ));

        let rows = self.client.query(query).await?;
        rows.iter().map(|row| entity_from_row(row, kind)).collect()
    }

    async fn list_drafts(&self, kind: EntityKind) -> SyncResult<Vec<Entity>> {
        let query = Query::new(format!(
            "MATCH (n:{label} {{status: 'draft'}}) RETURN {ENTITY_FIELDS} ORDER BY n.name ASC",
            label = kind.node_label()
        ));

        let rows = self.client.query(query).await?;
        rows.iter().map(|row| entity_from_row(row, kind)).collect()
    }

    async fn create_draft(
        &self,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        label: Option<&str>,
    ) -> SyncResult<String> {
        if self.find_by_name(name).await?.is_some() {
            return Err(SyncError::DuplicateName(name.to_string()));
        }

        let temp_id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        let query = match kind {
            EntityKind::Asset => Query::new(
                "CREATE (n:Asset {id: $id, name: $name, type: $type, \
                 status: 'draft', created_at: $created_at})"
                    .to_string(),
            ),
            EntityKind::Device => Query::new(
                "CREATE (n:Device {id: $id, name: $name, type: $type, label: $label, \
                 status: 'draft', created_at: $created_at})"
                    .to_string(),
            )
            .param("label", label.unwrap_or("Device")),
        }
        .param("id", temp_id.as_str())
        .param("name", name)
        .param("type", entity_type)
        .param("created_at", created_at.as_str());

        self.client.execute(query).await?;
        debug!(name, id = %temp_id, ?kind, "Created draft");
        Ok(temp_id)
    }

    async fn rewrite_identity(
        &self,
        kind: EntityKind,
        old_id: &str,
        new_id: &str,
        status: SyncStatus,
    ) -> SyncResult<()> {
        let query = Query::new(format!(
            "MATCH (n:{label} {{id: $old_id}}) SET n.id = $new_id, n.status = $status",
            label = kind.node_label()
        ))
        .param("old_id", old_id)
        .param("new_id", new_id)
        .param("status", status.as_str());

        self.client.execute(query).await?;
        debug!(old_id, new_id, "Rewrote entity identity");
        Ok(())
    }

    async fn upsert_synced(
        &self,
        kind: EntityKind,
        remote_id: &str,
        name: &str,
        entity_type: &str,
    ) -> SyncResult<()> {
        let query = Query::new(format!(
            "MERGE (n:{label} {{id: $id}}) \
             SET n.name = $name, n.type = $type, n.status = 'synced'",
            label = kind.node_label()
        ))
        .param("id", remote_id)
        .param("name", name)
        .param("type", entity_type);

        self.client.execute(query).await
    }

    async fn list_relationships(&self) -> SyncResult<Vec<Relationship>> {
        let query = Query::new(
            "MATCH (a)-[r]->(b) \
             WHERE (a:Asset OR a:Device) AND (b:Asset OR b:Device) \
             RETURN a.name AS from_name, type(r) AS rel_type, b.name AS to_name, \
                    r.status AS status \
             ORDER BY from_name ASC, to_name ASC"
                .to_string(),
        );

        let rows = self.client.query(query).await?;
        let mut relationships = Vec::with_capacity(rows.len());
        for row in &rows {
            let raw_type: String = get_field(row, "rel_type")?;
            let rel_type = match RelationType::new(&raw_type) {
                Ok(t) => t,
                Err(_) => {
                    warn!(rel_type = %raw_type, "Skipping relationship with unusable type");
                    continue;
                }
            };
            let status: Option<String> = get_field(row, "status")?;
            relationships.push(Relationship {
                from_name: get_field(row, "from_name")?,
                to_name: get_field(row, "to_name")?,
                rel_type,
                status: SyncStatus::parse(status.as_deref()),
            });
        }
        Ok(relationships)
    }

    async fn create_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        for name in [from_name, to_name] {
            if self.find_by_name(name).await?.is_none() {
                return Err(SyncError::not_found(format!("entity '{name}'")));
            }
        }

        // The relationship type was validated at construction; Cypher has
        // no parameter slot for it.
        let query = Query::new(format!(
            "MATCH (a {{name: $from}}), (b {{name: $to}}) \
             WHERE (a:Asset OR a:Device) AND (b:Asset OR b:Device) \
             MERGE (a)-[r:{rel}]->(b) \
             ON CREATE SET r.status = 'draft'",
            rel = rel_type.as_str()
        ))
        .param("from", from_name)
        .param("to", to_name);

        self.client.execute(query).await?;
        debug!(from = from_name, to = to_name, rel = %rel_type, "Merged relationship");
        Ok(())
    }

    async fn mark_relationship_synced(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        let query = Query::new(format!(
            "MATCH (a {{name: $from}})-[r:{rel}]->(b {{name: $to}}) \
             SET r.status = 'synced'",
            rel = rel_type.as_str()
        ))
        .param("from", from_name)
        .param("to", to_name);

        self.client.execute(query).await
    }

    async fn merge_relation_by_id(
        &self,
        from_id: &str,
        to_id: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        let query = Query::new(format!(
            "MATCH (a {{id: $from_id}}), (b {{id: $to_id}}) \
             WHERE (a:Asset OR a:Device) AND (b:Asset OR b:Device) \
             MERGE (a)-[r:{rel}]->(b) \
             SET r.status = 'synced'",
            rel = rel_type.as_str()
        ))
        .param("from_id", from_id)
        .param("to_id", to_id);

        self.client.execute(query).await
    }

    async fn find_by_name(&self, name: &str) -> SyncResult<Option<Entity>> {
        let query = Query::new(format!(
            "MATCH (n) WHERE (n:Asset OR n:Device) AND n.name = $name \
             RETURN {ENTITY_FIELDS}, labels(n) AS labels"
        ))
        .param("name", name);

        let rows = self.client.query(query).await?;
        rows.first().map(entity_from_labeled_row).transpose()
    }

    async fn get_entity(&self, id: &str) -> SyncResult<Option<Entity>> {
        let query = Query::new(format!(
            "MATCH (n) WHERE (n:Asset OR n:Device) AND n.id = $id \
             RETURN {ENTITY_FIELDS}, labels(n) AS labels"
        ))
        .param("id", id);

        let rows = self.client.query(query).await?;
        rows.first().map(entity_from_labeled_row).transpose()
    }

    async fn delete_entity(&self, id: &str) -> SyncResult<bool> {
        if self.get_entity(id).await?.is_none() {
            return Ok(false);
        }

        let query = Query::new(
            "MATCH (n) WHERE (n:Asset OR n:Device) AND n.id = $id DETACH DELETE n".to_string(),
        )
        .param("id", id);

        self.client.execute(query).await?;
        debug!(id, "Deleted entity and incident relationships");
        Ok(true)
    }

    async fn delete_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<bool> {
        let count_query = Query::new(format!(
            "MATCH (a {{name: $from}})-[r:{rel}]->(b {{name: $to}}) \
             RETURN count(r) AS count",
            rel = rel_type.as_str()
        ))
        .param("from", from_name)
        .param("to", to_name);

        let existing: i64 = self
            .client
            .query_scalar(count_query, "count")
            .await?
            .unwrap_or(0);
        if existing == 0 {
            return Ok(false);
        }

        let delete_query = Query::new(format!(
            "MATCH (a {{name: $from}})-[r:{rel}]->(b {{name: $to}}) DELETE r",
            rel = rel_type.as_str()
        ))
        .param("from", from_name)
        .param("to", to_name);

        self.client.execute(delete_query).await?;
        Ok(true)
    }

    async fn ids_not_in(&self, kind: EntityKind, current: &[String]) -> SyncResult<Vec<String>> {
        let query = Query::new(format!(
            "MATCH (n:{label}) WHERE NOT n.id IN $ids RETURN n.id AS id",
            label = kind.node_label()
        ))
        .param("ids", current.to_vec());

        let rows = self.client.query(query).await?;
        rows.iter().map(|row| get_field(row, "id")).collect()
    }
}
