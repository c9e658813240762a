//! Remote directory seam.
//!
//! Abstraction over the IoT platform's HTTP API, as much of it as the sync
//! flows need. The real implementation lives in `twinsync-platform`; tests
//! use an in-memory fake. No call is retried — failures surface to the
//! caller as typed errors.

use async_trait::async_trait;

use crate::entity::EntityKind;
use crate::error::SyncResult;
use crate::relation::RelationType;

/// An entity as the remote platform reports it.
#[derive(Debug, Clone)]
pub struct RemoteEntity {
    /// Canonical id assigned by the platform.
    pub id: String,
    pub name: String,
    pub entity_type: String,
    pub kind: EntityKind,
}

/// One outbound relation of a remote entity.
#[derive(Debug, Clone)]
pub struct RelationLink {
    pub to_id: String,
    pub rel_type: String,
}

#[async_trait]
pub trait Directory {
    /// Obtain a session token. Callers authenticate once per logical
    /// operation; there is no token caching or refresh.
    async fn authenticate(&self) -> SyncResult<String>;

    /// Every entity of a kind the tenant owns, across all pages.
    async fn list_entities(&self, token: &str, kind: EntityKind) -> SyncResult<Vec<RemoteEntity>>;

    /// Create an entity; returns the canonical id the platform assigned.
    async fn create_entity(
        &self,
        token: &str,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        label: Option<&str>,
    ) -> SyncResult<String>;

    async fn delete_entity(&self, token: &str, kind: EntityKind, id: &str) -> SyncResult<()>;

    /// Outbound relations of one entity.
    async fn list_relations(
        &self,
        token: &str,
        id: &str,
        kind: EntityKind,
    ) -> SyncResult<Vec<RelationLink>>;

    async fn create_relation(
        &self,
        token: &str,
        from_id: &str,
        from_kind: EntityKind,
        to_id: &str,
        to_kind: EntityKind,
        rel_type: &RelationType,
    ) -> SyncResult<()>;

    async fn delete_relation(
        &self,
        token: &str,
        from_id: &str,
        from_kind: EntityKind,
        rel_type: &RelationType,
        to_id: &str,
        to_kind: EntityKind,
    ) -> SyncResult<()>;
}
