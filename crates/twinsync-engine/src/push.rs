//! Push flows: local drafts out to the remote platform.

use tracing::{info, warn};

use twinsync_core::{
    Directory, EntityKind, EntityStore, ItemError, PushReport, RelationType, SyncError, SyncResult,
};

use crate::reconcile;

/// Push every draft entity of a kind to the remote platform.
///
/// Authentication failure aborts before any item is attempted. Per-item
/// failures are recorded by entity name and do not stop the batch; the
/// report's severity distinguishes full success, partial success, and
/// total failure.
pub async fn push_entities<S, D>(store: &S, directory: &D, kind: EntityKind) -> SyncResult<PushReport>
where
    S: EntityStore,
    D: Directory,
{
    let token = directory.authenticate().await?;

    let drafts = store.list_drafts(kind).await?;
    let mut report = PushReport::new(kind);
    report.attempted = drafts.len();

    if drafts.is_empty() {
        info!(?kind, "No drafts to push");
        return Ok(report);
    }

    info!(?kind, count = drafts.len(), "Pushing drafts");

    for draft in &drafts {
        let outcome = async {
            let remote_id = directory
                .create_entity(
                    &token,
                    kind,
                    &draft.name,
                    &draft.entity_type,
                    draft.label.as_deref(),
                )
                .await?;
            reconcile::adopt_remote_identity(store, kind, &draft.local_id, &remote_id).await
        }
        .await;

        match outcome {
            Ok(()) => report.synced += 1,
            Err(e) => {
                warn!(name = %draft.name, error = %e, "Draft push failed");
                report.errors.push(ItemError::new(&draft.name, e.to_string()));
            }
        }
    }

    info!(
        ?kind,
        synced = report.synced,
        failed = report.errors.len(),
        "Push finished"
    );
    Ok(report)
}

/// Push a single relationship to the remote platform.
///
/// Both endpoints must already be synced — a draft endpoint has no
/// canonical id the remote could address, so the call returns
/// [`SyncError::DraftEndpoint`] before any network traffic, including
/// authentication.
pub async fn push_relationship<S, D>(
    store: &S,
    directory: &D,
    from_name: &str,
    to_name: &str,
    rel_type: &RelationType,
) -> SyncResult<()>
where
    S: EntityStore,
    D: Directory,
{
    let from = store
        .find_by_name(from_name)
        .await?
        .ok_or_else(|| SyncError::not_found(format!("entity '{from_name}'")))?;
    let to = store
        .find_by_name(to_name)
        .await?
        .ok_or_else(|| SyncError::not_found(format!("entity '{to_name}'")))?;

    let exists = store.list_relationships().await?.iter().any(|r| {
        r.from_name == from_name && r.to_name == to_name && r.rel_type == *rel_type
    });
    if !exists {
        return Err(SyncError::not_found(format!(
            "relationship '{from_name}' -[{rel_type}]-> '{to_name}'"
        )));
    }

    if from.is_draft() || to.is_draft() {
        return Err(SyncError::DraftEndpoint {
            from: from.name,
            to: to.name,
        });
    }

    let token = directory.authenticate().await?;
    directory
        .create_relation(
            &token,
            &from.local_id,
            from.kind,
            &to.local_id,
            to.kind,
            rel_type,
        )
        .await?;
    store
        .mark_relationship_synced(from_name, to_name, rel_type)
        .await?;

    info!(from = from_name, to = to_name, rel = %rel_type, "Relationship pushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemDirectory, MemStore};
    use twinsync_core::{Severity, SyncStatus};

    #[tokio::test]
    async fn test_push_rewrites_identity_and_status() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        store
            .seed_entity(EntityKind::Asset, "Warehouse-1", "Warehouse", SyncStatus::Draft)
            .await;

        let report = push_entities(&store, &directory, EntityKind::Asset)
            .await
            .unwrap();

        assert_eq!(report.severity(), Severity::Success);
        assert_eq!(report.synced, 1);

        let entity = store.find_by_name("Warehouse-1").await.unwrap().unwrap();
        assert_eq!(entity.status, SyncStatus::Synced);
        assert_eq!(entity.local_id, directory.remote_id_of("Warehouse-1").unwrap());

        let creates = directory.calls_matching("create_entity");
        assert_eq!(creates.len(), 1);
        assert!(creates[0].contains("Warehouse-1"));
        assert!(creates[0].contains("Warehouse"));
    }

    #[tokio::test]
    async fn test_push_without_drafts_is_a_warning_not_an_error() {
        let store = MemStore::new();
        let directory = MemDirectory::new();

        let report = push_entities(&store, &directory, EntityKind::Asset)
            .await
            .unwrap();

        assert_eq!(report.attempted, 0);
        assert_eq!(report.severity(), Severity::Warning);
        assert!(directory.calls_matching("create_entity").is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_continues_and_names_the_loser() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        store
            .seed_entity(EntityKind::Asset, "Room-A", "Room", SyncStatus::Draft)
            .await;
        store
            .seed_entity(EntityKind::Asset, "Room-B", "Room", SyncStatus::Draft)
            .await;
        directory.fail_create_with("Room-B", 500);

        let report = push_entities(&store, &directory, EntityKind::Asset)
            .await
            .unwrap();

        assert_eq!(report.synced, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].name, "Room-B");
        assert_eq!(report.severity(), Severity::Warning);

        let ok = store.find_by_name("Room-A").await.unwrap().unwrap();
        assert_eq!(ok.status, SyncStatus::Synced);
        let failed = store.find_by_name("Room-B").await.unwrap().unwrap();
        assert_eq!(failed.status, SyncStatus::Draft);
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_before_any_item() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        directory.deny_auth();
        store
            .seed_entity(EntityKind::Asset, "Room-A", "Room", SyncStatus::Draft)
            .await;

        let result = push_entities(&store, &directory, EntityKind::Asset).await;

        assert!(matches!(result, Err(SyncError::AuthFailed(_))));
        assert!(directory.calls_matching("create_entity").is_empty());
        let entity = store.find_by_name("Room-A").await.unwrap().unwrap();
        assert_eq!(entity.status, SyncStatus::Draft);
    }

    #[tokio::test]
    async fn test_relationship_with_draft_endpoint_never_reaches_the_network() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        store
            .seed_entity(EntityKind::Asset, "Room-A", "Room", SyncStatus::Synced)
            .await;
        store
            .seed_entity(EntityKind::Device, "Sensor-1", "Sensor", SyncStatus::Draft)
            .await;
        let rel = RelationType::new("Contains").unwrap();
        store.create_relationship("Room-A", "Sensor-1", &rel).await.unwrap();

        let result = push_relationship(&store, &directory, "Room-A", "Sensor-1", &rel).await;

        assert!(matches!(result, Err(SyncError::DraftEndpoint { .. })));
        assert!(directory.all_calls().is_empty(), "no remote call expected");

        let rels = store.list_relationships().await.unwrap();
        assert_eq!(rels[0].status, SyncStatus::Draft);
    }

    #[tokio::test]
    async fn test_relationship_push_marks_synced() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        store
            .seed_entity(EntityKind::Asset, "Room-A", "Room", SyncStatus::Synced)
            .await;
        store
            .seed_entity(EntityKind::Device, "Sensor-1", "Sensor", SyncStatus::Synced)
            .await;
        let rel = RelationType::new("Contains").unwrap();
        store.create_relationship("Room-A", "Sensor-1", &rel).await.unwrap();

        push_relationship(&store, &directory, "Room-A", "Sensor-1", &rel)
            .await
            .unwrap();

        assert_eq!(directory.calls_matching("create_relation").len(), 1);
        let rels = store.list_relationships().await.unwrap();
        assert_eq!(rels[0].status, SyncStatus::Synced);
    }

    #[tokio::test]
    async fn test_missing_relationship_is_not_found() {
        let store = MemStore::new();
        let directory = MemDirectory::new();
        store
            .seed_entity(EntityKind::Asset, "Room-A", "Room", SyncStatus::Synced)
            .await;
        store
            .seed_entity(EntityKind::Device, "Sensor-1", "Sensor", SyncStatus::Synced)
            .await;

        let rel = RelationType::new("Contains").unwrap();
        let result = push_relationship(&store, &directory, "Room-A", "Sensor-1", &rel).await;

        assert!(matches!(result, Err(SyncError::NotFound(_))));
    }
}
