//! Entity store seam.
//!
//! The sync engine talks to the local graph through this trait so the
//! orchestration logic stays independent of the Neo4j driver. The real
//! implementation lives in `twinsync-graph`; tests use an in-memory fake.

use async_trait::async_trait;

use crate::entity::{Entity, EntityKind, SyncStatus};
use crate::error::SyncResult;
use crate::relation::{RelationType, Relationship};

#[async_trait]
pub trait EntityStore {
    /// All entities of a kind, drafts first then by name.
    async fn list_entities(&self, kind: EntityKind) -> SyncResult<Vec<Entity>>;

    /// Only the draft entities of a kind.
    async fn list_drafts(&self, kind: EntityKind) -> SyncResult<Vec<Entity>>;

    /// Create a draft with a fresh opaque local id; returns that id.
    /// Fails with `DuplicateName` when the name is already taken.
    async fn create_draft(
        &self,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        label: Option<&str>,
    ) -> SyncResult<String>;

    /// Atomically replace an entity's id and status. Used after the remote
    /// accepts a draft and assigns the canonical id.
    async fn rewrite_identity(
        &self,
        kind: EntityKind,
        old_id: &str,
        new_id: &str,
        status: SyncStatus,
    ) -> SyncResult<()>;

    /// Create-or-update by canonical id; always leaves the entity synced.
    async fn upsert_synced(
        &self,
        kind: EntityKind,
        remote_id: &str,
        name: &str,
        entity_type: &str,
    ) -> SyncResult<()>;

    /// Every relationship in the graph, endpoints joined by name.
    async fn list_relationships(&self) -> SyncResult<Vec<Relationship>>;

    /// Idempotent draft edge between two named entities.
    async fn create_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()>;

    /// Flip a relationship to synced after the remote accepted it.
    async fn mark_relationship_synced(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()>;

    /// Idempotent synced edge between two nodes addressed by id. Used
    /// during pull, where both endpoints already carry canonical ids.
    async fn merge_relation_by_id(
        &self,
        from_id: &str,
        to_id: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()>;

    /// Look up an entity by its (unique) name.
    async fn find_by_name(&self, name: &str) -> SyncResult<Option<Entity>>;

    /// Look up an entity by id, whatever its kind.
    async fn get_entity(&self, id: &str) -> SyncResult<Option<Entity>>;

    /// Remove an entity and every relationship touching it. Returns
    /// whether the node existed.
    async fn delete_entity(&self, id: &str) -> SyncResult<bool>;

    /// Remove a relationship by its name triple. Returns whether it existed.
    async fn delete_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<bool>;

    /// Local ids of a kind that are absent from `current` — the orphans an
    /// alignment pull removes.
    async fn ids_not_in(&self, kind: EntityKind, current: &[String]) -> SyncResult<Vec<String>>;
}
