//! Identity reconciliation between local draft ids and remote canonical ids.
//!
//! A draft is born with a locally generated opaque id. Once the remote
//! platform accepts it and assigns the canonical id, the local node adopts
//! that id — from then on, identity equality is the join key between the
//! two systems. Pull needs no reconciliation: upserts are keyed by the
//! canonical id directly.

use twinsync_core::{EntityKind, EntityStore, SyncResult, SyncStatus};

/// Adopt the remote canonical id for a pushed draft. The id rewrite and
/// the draft→synced flip land in a single store operation.
pub async fn adopt_remote_identity<S: EntityStore>(
    store: &S,
    kind: EntityKind,
    draft_id: &str,
    remote_id: &str,
) -> SyncResult<()> {
    store
        .rewrite_identity(kind, draft_id, remote_id, SyncStatus::Synced)
        .await
}
