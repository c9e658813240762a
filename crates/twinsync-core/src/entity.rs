//! Entity model: assets and devices with their sync lifecycle.

use serde::{Deserialize, Serialize};

/// The two node families the infrastructure graph holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Asset,
    Device,
}

impl EntityKind {
    /// Both kinds, in the order pull processes them (assets before
    /// devices, so containment edges find their source nodes present).
    pub const ALL: [EntityKind; 2] = [EntityKind::Asset, EntityKind::Device];

    /// The Neo4j node label for this kind.
    pub fn node_label(&self) -> &'static str {
        match self {
            EntityKind::Asset => "Asset",
            EntityKind::Device => "Device",
        }
    }

    /// Path segment for single-entity endpoints (`/api/asset/{id}`).
    pub fn api_path(&self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Device => "device",
        }
    }

    /// Collection segment for tenant listings (`/api/tenant/assets`).
    pub fn api_collection(&self) -> &'static str {
        match self {
            EntityKind::Asset => "assets",
            EntityKind::Device => "devices",
        }
    }

    /// The remote platform's entityType discriminator.
    pub fn remote_type(&self) -> &'static str {
        match self {
            EntityKind::Asset => "ASSET",
            EntityKind::Device => "DEVICE",
        }
    }

    /// Parse from string (case-insensitive). Accepts both the node label
    /// and the remote discriminator spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" | "assets" => Some(Self::Asset),
            "device" | "devices" => Some(Self::Device),
            _ => None,
        }
    }
}

/// Where an entity or relationship stands relative to the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Exists only in the local graph; no remote counterpart yet.
    Draft,
    /// Confirmed on the remote platform; the local id is the canonical id.
    Synced,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Draft => "draft",
            SyncStatus::Synced => "synced",
        }
    }

    /// Parse a stored status string. Nodes written by earlier imports may
    /// carry no status at all; anything that isn't "draft" counts as synced.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("draft") => SyncStatus::Draft,
            _ => SyncStatus::Synced,
        }
    }
}

/// An asset or device node as read from the graph.
///
/// `local_id` starts as a locally generated UUID for drafts and is
/// rewritten to the remote canonical id on a successful push. `name` is the
/// join key for relationship operations — renaming an entity is unsupported
/// and would orphan its relationships from lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub local_id: String,
    pub name: String,
    /// Free-form category, e.g. "Building" or "Sensor".
    pub entity_type: String,
    pub kind: EntityKind,
    /// Descriptive tag, devices only. Defaults to "Device" at creation.
    pub label: Option<String>,
    pub status: SyncStatus,
}

impl Entity {
    pub fn is_draft(&self) -> bool {
        self.status == SyncStatus::Draft
    }
}

/// Listing order: drafts first (they need operator attention), then by name.
///
/// The graph store orders with `ORDER BY n.status ASC, n.name ASC` — "draft"
/// sorts before "synced" — and this is the same ordering for in-memory
/// collections.
pub fn sort_for_listing(entities: &mut [Entity]) {
    entities.sort_by(|a, b| {
        b.is_draft()
            .cmp(&a.is_draft())
            .then_with(|| a.name.cmp(&b.name))
    });
}
