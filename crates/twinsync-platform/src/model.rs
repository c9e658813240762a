//! Wire types for the platform's REST API.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
}

/// The platform's composite entity id: `{"id": "...", "entityType": "ASSET"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    pub id: String,
    pub entity_type: String,
}

/// An entity as returned by tenant listings and create calls.
#[derive(Debug, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// One page of a tenant listing: `{"data": [...], "hasNext": bool}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_next: bool,
}

/// One relation as returned by `/api/relations`.
#[derive(Debug, Deserialize)]
pub struct RelationRecord {
    pub to: EntityId,
    #[serde(rename = "type")]
    pub rel_type: String,
}

#[derive(Serialize)]
pub struct CreateEntityRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub entity_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationRequest<'a> {
    pub from: EntityId,
    pub to: EntityId,
    #[serde(rename = "type")]
    pub rel_type: &'a str,
    pub type_group: &'a str,
}
