//! In-memory fakes for the store and directory seams.
//!
//! `MemStore` mirrors the graph store's semantics (name joins, cascades,
//! merge idempotency); `MemDirectory` mirrors the platform (canonical id
//! assignment, per-name failure injection) and records every call so tests
//! can assert "no remote side effect observed".

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use twinsync_core::{
    entity::sort_for_listing, Directory, Entity, EntityKind, EntityStore, RelationLink,
    RelationType, Relationship, RemoteEntity, SyncError, SyncResult, SyncStatus,
};

// ── Fake entity store ───────────────────────────────────────────────

#[derive(Default)]
pub struct MemStore {
    entities: Mutex<Vec<Entity>>,
    relationships: Mutex<Vec<Relationship>>,
    next_id: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_entity(
        &self,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        status: SyncStatus,
    ) -> String {
        let id = format!("local-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.seed_entity_with_id(kind, &id, name, entity_type, status)
            .await;
        id
    }

    pub async fn seed_entity_with_id(
        &self,
        kind: EntityKind,
        id: &str,
        name: &str,
        entity_type: &str,
        status: SyncStatus,
    ) {
        self.entities.lock().unwrap().push(Entity {
            local_id: id.to_string(),
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            kind,
            label: None,
            status,
        });
    }

    /// Comparable snapshot of all entities, for idempotence checks.
    pub async fn snapshot_entities(&self) -> Vec<(String, String, String, String, String)> {
        let mut snapshot: Vec<_> = self
            .entities
            .lock()
            .unwrap()
            .iter()
            .map(|e| {
                (
                    e.kind.node_label().to_string(),
                    e.local_id.clone(),
                    e.name.clone(),
                    e.entity_type.clone(),
                    e.status.as_str().to_string(),
                )
            })
            .collect();
        snapshot.sort();
        snapshot
    }

    fn name_of(&self, id: &str) -> Option<String> {
        self.entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.local_id == id)
            .map(|e| e.name.clone())
    }
}

#[async_trait]
impl EntityStore for MemStore {
    async fn list_entities(&self, kind: EntityKind) -> SyncResult<Vec<Entity>> {
        let mut list: Vec<Entity> = self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        sort_for_listing(&mut list);
        Ok(list)
    }

    async fn list_drafts(&self, kind: EntityKind) -> SyncResult<Vec<Entity>> {
        let mut drafts: Vec<Entity> = self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind && e.is_draft())
            .cloned()
            .collect();
        drafts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(drafts)
    }

    async fn create_draft(
        &self,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        label: Option<&str>,
    ) -> SyncResult<String> {
        let mut entities = self.entities.lock().unwrap();
        if entities.iter().any(|e| e.name == name) {
            return Err(SyncError::DuplicateName(name.to_string()));
        }
        let id = format!("local-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        entities.push(Entity {
            local_id: id.clone(),
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            kind,
            label: match kind {
                EntityKind::Asset => None,
                EntityKind::Device => Some(label.unwrap_or("Device").to_string()),
            },
            status: SyncStatus::Draft,
        });
        Ok(id)
    }

    async fn rewrite_identity(
        &self,
        kind: EntityKind,
        old_id: &str,
        new_id: &str,
        status: SyncStatus,
    ) -> SyncResult<()> {
        let mut entities = self.entities.lock().unwrap();
        if let Some(entity) = entities
            .iter_mut()
            .find(|e| e.kind == kind && e.local_id == old_id)
        {
            entity.local_id = new_id.to_string();
            entity.status = status;
        }
        Ok(())
    }

    async fn upsert_synced(
        &self,
        kind: EntityKind,
        remote_id: &str,
        name: &str,
        entity_type: &str,
    ) -> SyncResult<()> {
        let mut entities = self.entities.lock().unwrap();
        match entities
            .iter_mut()
            .find(|e| e.kind == kind && e.local_id == remote_id)
        {
            Some(entity) => {
                entity.name = name.to_string();
                entity.entity_type = entity_type.to_string();
                entity.status = SyncStatus::Synced;
            }
            None => entities.push(Entity {
                local_id: remote_id.to_string(),
                name: name.to_string(),
                entity_type: entity_type.to_string(),
                kind,
                label: None,
                status: SyncStatus::Synced,
            }),
        }
        Ok(())
    }

    async fn list_relationships(&self) -> SyncResult<Vec<Relationship>> {
        let mut rels = self.relationships.lock().unwrap().clone();
        rels.sort_by(|a, b| {
            a.from_name
                .cmp(&b.from_name)
                .then_with(|| a.to_name.cmp(&b.to_name))
        });
        Ok(rels)
    }

    async fn create_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        for name in [from_name, to_name] {
            if !self.entities.lock().unwrap().iter().any(|e| e.name == name) {
                return Err(SyncError::not_found(format!("entity '{name}'")));
            }
        }
        let mut rels = self.relationships.lock().unwrap();
        let exists = rels.iter().any(|r| {
            r.from_name == from_name && r.to_name == to_name && r.rel_type == *rel_type
        });
        if !exists {
            rels.push(Relationship {
                from_name: from_name.to_string(),
                to_name: to_name.to_string(),
                rel_type: rel_type.clone(),
                status: SyncStatus::Draft,
            });
        }
        Ok(())
    }

    async fn mark_relationship_synced(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        let mut rels = self.relationships.lock().unwrap();
        if let Some(rel) = rels.iter_mut().find(|r| {
            r.from_name == from_name && r.to_name == to_name && r.rel_type == *rel_type
        }) {
            rel.status = SyncStatus::Synced;
        }
        Ok(())
    }

    async fn merge_relation_by_id(
        &self,
        from_id: &str,
        to_id: &str,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        // Mirrors the MATCH-then-MERGE no-op when either node is absent.
        let (Some(from_name), Some(to_name)) = (self.name_of(from_id), self.name_of(to_id))
        else {
            return Ok(());
        };
        let mut rels = self.relationships.lock().unwrap();
        match rels.iter_mut().find(|r| {
            r.from_name == from_name && r.to_name == to_name && r.rel_type == *rel_type
        }) {
            Some(rel) => rel.status = SyncStatus::Synced,
            None => rels.push(Relationship {
                from_name,
                to_name,
                rel_type: rel_type.clone(),
                status: SyncStatus::Synced,
            }),
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> SyncResult<Option<Entity>> {
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name == name)
            .cloned())
    }

    async fn get_entity(&self, id: &str) -> SyncResult<Option<Entity>> {
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.local_id == id)
            .cloned())
    }

    async fn delete_entity(&self, id: &str) -> SyncResult<bool> {
        let name = match self.name_of(id) {
            Some(name) => name,
            None => return Ok(false),
        };
        self.entities.lock().unwrap().retain(|e| e.local_id != id);
        self.relationships
            .lock()
            .unwrap()
            .retain(|r| r.from_name != name && r.to_name != name);
        Ok(true)
    }

    async fn delete_relationship(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: &RelationType,
    ) -> SyncResult<bool> {
        let mut rels = self.relationships.lock().unwrap();
        let before = rels.len();
        rels.retain(|r| {
            !(r.from_name == from_name && r.to_name == to_name && r.rel_type == *rel_type)
        });
        Ok(rels.len() < before)
    }

    async fn ids_not_in(&self, kind: EntityKind, current: &[String]) -> SyncResult<Vec<String>> {
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind && !current.contains(&e.local_id))
            .map(|e| e.local_id.clone())
            .collect())
    }
}

// ── Fake remote directory ───────────────────────────────────────────

#[derive(Default)]
pub struct MemDirectory {
    auth_denied: AtomicBool,
    entities: Mutex<Vec<RemoteEntity>>,
    /// (from_id, to_id, type)
    relations: Mutex<Vec<(String, String, String)>>,
    /// name -> HTTP status to fail entity creation with
    create_failures: Mutex<HashMap<String, u16>>,
    relation_fetches_fail: AtomicBool,
    deletes_fail: AtomicBool,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl MemDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny_auth(&self) {
        self.auth_denied.store(true, Ordering::SeqCst);
    }

    pub fn fail_create_with(&self, name: &str, status: u16) {
        self.create_failures
            .lock()
            .unwrap()
            .insert(name.to_string(), status);
    }

    pub fn fail_relation_fetches(&self) {
        self.relation_fetches_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.deletes_fail.store(true, Ordering::SeqCst);
    }

    pub fn seed_remote(&self, kind: EntityKind, id: &str, name: &str, entity_type: &str) {
        self.entities.lock().unwrap().push(RemoteEntity {
            id: id.to_string(),
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            kind,
        });
    }

    pub fn seed_relation(&self, from_id: &str, to_id: &str, rel_type: &str) {
        self.relations.lock().unwrap().push((
            from_id.to_string(),
            to_id.to_string(),
            rel_type.to_string(),
        ));
    }

    pub fn remote_id_of(&self, name: &str) -> Option<String> {
        self.entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
    }

    pub fn all_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.all_calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Directory for MemDirectory {
    async fn authenticate(&self) -> SyncResult<String> {
        self.record("authenticate".to_string());
        if self.auth_denied.load(Ordering::SeqCst) {
            Err(SyncError::AuthFailed("denied by test".to_string()))
        } else {
            Ok("test-token".to_string())
        }
    }

    async fn list_entities(&self, _token: &str, kind: EntityKind) -> SyncResult<Vec<RemoteEntity>> {
        self.record(format!("list_entities {kind:?}"));
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect())
    }

    async fn create_entity(
        &self,
        _token: &str,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        _label: Option<&str>,
    ) -> SyncResult<String> {
        self.record(format!("create_entity {name} {entity_type}"));
        if let Some(status) = self.create_failures.lock().unwrap().get(name) {
            return Err(SyncError::RemoteRejection {
                status: *status,
                detail: "injected failure".to_string(),
            });
        }
        let id = format!("remote-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.entities.lock().unwrap().push(RemoteEntity {
            id: id.clone(),
            name: name.to_string(),
            entity_type: entity_type.to_string(),
            kind,
        });
        Ok(id)
    }

    async fn delete_entity(&self, _token: &str, _kind: EntityKind, id: &str) -> SyncResult<()> {
        self.record(format!("delete_entity {id}"));
        if self.deletes_fail.load(Ordering::SeqCst) {
            return Err(SyncError::RemoteRejection {
                status: 500,
                detail: "injected failure".to_string(),
            });
        }
        self.entities.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn list_relations(
        &self,
        _token: &str,
        id: &str,
        _kind: EntityKind,
    ) -> SyncResult<Vec<RelationLink>> {
        self.record(format!("list_relations {id}"));
        if self.relation_fetches_fail.load(Ordering::SeqCst) {
            return Err(SyncError::RemoteRejection {
                status: 500,
                detail: "injected failure".to_string(),
            });
        }
        Ok(self
            .relations
            .lock()
            .unwrap()
            .iter()
            .filter(|(from, _, _)| from == id)
            .map(|(_, to, rel_type)| RelationLink {
                to_id: to.clone(),
                rel_type: rel_type.clone(),
            })
            .collect())
    }

    async fn create_relation(
        &self,
        _token: &str,
        from_id: &str,
        _from_kind: EntityKind,
        to_id: &str,
        _to_kind: EntityKind,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        self.record(format!("create_relation {from_id} {to_id} {rel_type}"));
        self.relations.lock().unwrap().push((
            from_id.to_string(),
            to_id.to_string(),
            rel_type.as_str().to_string(),
        ));
        Ok(())
    }

    async fn delete_relation(
        &self,
        _token: &str,
        from_id: &str,
        _from_kind: EntityKind,
        rel_type: &RelationType,
        to_id: &str,
        _to_kind: EntityKind,
    ) -> SyncResult<()> {
        self.record(format!("delete_relation {from_id} {to_id} {rel_type}"));
        if self.deletes_fail.load(Ordering::SeqCst) {
            return Err(SyncError::RemoteRejection {
                status: 500,
                detail: "injected failure".to_string(),
            });
        }
        self.relations.lock().unwrap().retain(|(from, to, rel)| {
            !(from == from_id && to == to_id && rel == rel_type.as_str())
        });
        Ok(())
    }
}
