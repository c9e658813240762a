//! Deletion coordination.
//!
//! The policy decides how far a delete reaches; ordering is fixed: remote
//! first (when the policy includes it), local second, and the local delete
//! is unconditional. A remote failure is advisory — the operator must
//! always be able to clear local state, even with the platform down.

use tracing::{info, warn};

use twinsync_core::{
    DeletionPolicy, Directory, Entity, EntityStore, RelationType, SyncResult, SyncStatus,
};

/// What happened on the remote side of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The policy or the situation kept the remote untouched.
    Skipped,
    Deleted,
    /// Remote delete failed; local deletion proceeded anyway.
    Failed(String),
}

/// Combined result of one deletion request.
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub remote: RemoteOutcome,
    /// Whether a local node/edge existed and was removed.
    pub local_deleted: bool,
}

impl DeletionOutcome {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        match &self.remote {
            RemoteOutcome::Deleted => parts.push("Deleted from remote platform.".to_string()),
            RemoteOutcome::Failed(reason) => {
                parts.push(format!("Remote delete failed ({reason})."));
            }
            RemoteOutcome::Skipped => {}
        }
        if self.local_deleted {
            parts.push("Removed from local graph.".to_string());
        } else {
            parts.push("Nothing to remove locally.".to_string());
        }
        parts.join(" ")
    }
}

/// Delete an entity under the given policy.
///
/// Remote deletion is only attempted for synced entities — a draft has no
/// remote counterpart to remove. Local deletion cascades to incident
/// relationships (store-level) and happens regardless of the remote
/// outcome.
pub async fn delete_entity<S, D>(
    store: &S,
    directory: &D,
    id: &str,
    policy: DeletionPolicy,
) -> SyncResult<DeletionOutcome>
where
    S: EntityStore,
    D: Directory,
{
    let mut remote = RemoteOutcome::Skipped;

    if policy.includes_remote() {
        match store.get_entity(id).await? {
            Some(entity) if entity.status == SyncStatus::Synced => {
                remote = match remote_entity_delete(directory, &entity).await {
                    Ok(()) => RemoteOutcome::Deleted,
                    Err(e) => {
                        warn!(id, error = %e, "Remote delete failed, continuing locally");
                        RemoteOutcome::Failed(e.to_string())
                    }
                };
            }
            // Draft or unknown locally: no canonical identity to delete
            // remotely.
            _ => {}
        }
    }

    let local_deleted = store.delete_entity(id).await?;
    info!(id, ?policy, local_deleted, "Entity deletion finished");

    Ok(DeletionOutcome {
        remote,
        local_deleted,
    })
}

async fn remote_entity_delete<D: Directory>(directory: &D, entity: &Entity) -> SyncResult<()> {
    let token = directory.authenticate().await?;
    directory
        .delete_entity(&token, entity.kind, &entity.local_id)
        .await
}

/// Delete a relationship under the given policy.
///
/// Under `LocalAndRemote` the endpoints' canonical ids and kinds are
/// resolved first; when either endpoint cannot be resolved (or is still a
/// draft), the remote call is skipped and only the local edge is removed.
pub async fn delete_relationship<S, D>(
    store: &S,
    directory: &D,
    from_name: &str,
    to_name: &str,
    rel_type: &RelationType,
    policy: DeletionPolicy,
) -> SyncResult<DeletionOutcome>
where
    S: EntityStore,
    D: Directory,
{
    let mut remote = RemoteOutcome::Skipped;

    if policy.includes_remote() {
        let from = store.find_by_name(from_name).await?;
        let to = store.find_by_name(to_name).await?;

        if let (Some(from), Some(to)) = (from, to) {
            if from.status == SyncStatus::Synced && to.status == SyncStatus::Synced {
                remote = match remote_relation_delete(directory, &from, &to, rel_type).await {
                    Ok(()) => RemoteOutcome::Deleted,
                    Err(e) => {
                        warn!(from = from_name, to = to_name, error = %e,
                              "Remote relation delete failed, continuing locally");
                        RemoteOutcome::Failed(e.to_string())
                    }
                };
            }
        }
    }

    let local_deleted = store
        .delete_relationship(from_name, to_name, rel_type)
        .await?;

    Ok(DeletionOutcome {
        remote,
        local_deleted,
    })
}

async fn remote_relation_delete<D: Directory>(
    directory: &D,
    from: &Entity,
    to: &Entity,
    rel_type: &RelationType,
) -> SyncResult<()> {
    let token = directory.authenticate().await?;
    directory
        .delete_relation(
            &token,
            &from.local_id,
            from.kind,
            rel_type,
            &to.local_id,
            to.kind,
        )
        .await
}
