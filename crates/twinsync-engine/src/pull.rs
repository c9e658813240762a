//! Pull flow: remote state into the local graph.

use tracing::{debug, info, warn};

use twinsync_core::{
    Directory, EntityKind, EntityStore, PullReport, RelationType, RemoteEntity, SyncResult,
};

/// Pull every remote entity (and their relations) into the local graph.
///
/// Entities of both kinds are upserted first — relationship traversal only
/// starts once every endpoint can be present locally. A failure listing
/// entities aborts the pull; a failure fetching one entity's relations is
/// swallowed and yields zero relations for that entity (best-effort, and
/// deliberately no wider than that).
///
/// With `align` set, each kind additionally gets a deletion sweep: local
/// ids absent from the current remote set are deleted locally. Pull never
/// deletes remote state.
pub async fn pull<S, D>(store: &S, directory: &D, align: bool) -> SyncResult<PullReport>
where
    S: EntityStore,
    D: Directory,
{
    let token = directory.authenticate().await?;

    let mut report = PullReport::default();
    let mut imported: Vec<RemoteEntity> = Vec::new();

    for kind in EntityKind::ALL {
        let entities = directory.list_entities(&token, kind).await?;
        info!(?kind, count = entities.len(), "Importing remote entities");

        for entity in &entities {
            store
                .upsert_synced(kind, &entity.id, &entity.name, &entity.entity_type)
                .await?;
        }

        match kind {
            EntityKind::Asset => report.assets = entities.len(),
            EntityKind::Device => report.devices = entities.len(),
        }

        if align {
            let current: Vec<String> = entities.iter().map(|e| e.id.clone()).collect();
            let orphans = store.ids_not_in(kind, &current).await?;
            for id in &orphans {
                store.delete_entity(id).await?;
            }
            if !orphans.is_empty() {
                info!(?kind, removed = orphans.len(), "Removed entities absent remotely");
            }
            report.removed += orphans.len();
        }

        imported.extend(entities);
    }

    for entity in &imported {
        let relations = match directory.list_relations(&token, &entity.id, entity.kind).await {
            Ok(relations) => relations,
            // Best-effort: a relation fetch that fails for one entity
            // contributes zero relations instead of aborting the pull.
            Err(e) => {
                debug!(entity = %entity.name, error = %e, "Relation fetch failed, skipping");
                Vec::new()
            }
        };

        for link in relations {
            let rel_type = match RelationType::new(&link.rel_type) {
                Ok(t) => t,
                Err(_) => {
                    warn!(rel_type = %link.rel_type, "Skipping relation with unusable type");
                    continue;
                }
            };
            store
                .merge_relation_by_id(&entity.id, &link.to_id, &rel_type)
                .await?;
            report.relationships += 1;
        }
    }

    info!(
        entities = report.entities(),
        relationships = report.relationships,
        removed = report.removed,
        "Pull finished"
    );
    Ok(report)
}
