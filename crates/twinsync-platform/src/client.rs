//! Platform HTTP client.
//!
//! Every operation is a single request: no retries, no token caching. The
//! sync engine authenticates once per logical operation and passes the
//! bearer token into each call.

use async_trait::async_trait;
use tracing::debug;

use twinsync_core::{
    Directory, EntityKind, RelationLink, RelationType, RemoteEntity, SyncError, SyncResult,
};

use crate::model::{
    CreateEntityRequest, CreateRelationRequest, EntityId, EntityRecord, LoginRequest,
    LoginResponse, PageResponse, RelationRecord,
};

/// Relation type group the platform expects on created relations.
const RELATION_TYPE_GROUP: &str = "COMMON";

/// Configuration for reaching the platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Page size for tenant listings. Listing always walks every page.
    pub page_size: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            username: "tenant@thingsboard.org".to_string(),
            password: "tenant".to_string(),
            page_size: 100,
        }
    }
}

impl PlatformConfig {
    /// Read `TB_URL`, `TB_USER`, `TB_PASS` and `TB_PAGE_SIZE` from the
    /// environment, falling back to local-development defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TB_URL").unwrap_or(defaults.base_url),
            username: std::env::var("TB_USER").unwrap_or(defaults.username),
            password: std::env::var("TB_PASS").unwrap_or(defaults.password),
            page_size: std::env::var("TB_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.page_size),
        }
    }
}

/// Client for the platform's REST API.
#[derive(Clone)]
pub struct PlatformClient {
    config: PlatformConfig,
    http: reqwest::Client,
}

impl PlatformClient {
    pub fn new(config: PlatformConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            config: PlatformConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            http,
        }
    }

    pub fn from_env() -> Self {
        Self::new(PlatformConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// Surface non-2xx responses as `RemoteRejection` with the body text.
    async fn checked(response: reqwest::Response) -> SyncResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(SyncError::RemoteRejection {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[async_trait]
impl Directory for PlatformClient {
    async fn authenticate(&self) -> SyncResult<String> {
        let request = LoginRequest {
            username: &self.config.username,
            password: &self.config.password,
        };

        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::AuthFailed(format!("HTTP {status}: {body}")));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| SyncError::AuthFailed(format!("unreadable login response: {e}")))?;

        login
            .token
            .ok_or_else(|| SyncError::AuthFailed("login response carried no token".to_string()))
    }

    async fn list_entities(&self, token: &str, kind: EntityKind) -> SyncResult<Vec<RemoteEntity>> {
        let url = self.url(&format!("/api/tenant/{}", kind.api_collection()));
        let mut entities = Vec::new();
        let mut page = 0usize;

        loop {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("pageSize", self.config.page_size.to_string()),
                    ("page", page.to_string()),
                ])
                .header("X-Authorization", Self::bearer(token))
                .send()
                .await
                .map_err(SyncError::connectivity)?;

            let body: PageResponse<EntityRecord> = Self::checked(response)
                .await?
                .json()
                .await
                .map_err(|e| SyncError::Connectivity(format!("unreadable listing page: {e}")))?;

            let exhausted = !body.has_next || body.data.is_empty();
            entities.extend(body.data.into_iter().map(|record| RemoteEntity {
                id: record.id.id,
                name: record.name,
                entity_type: record.entity_type,
                kind,
            }));

            if exhausted {
                break;
            }
            page += 1;
        }

        debug!(?kind, count = entities.len(), pages = page + 1, "Listed remote entities");
        Ok(entities)
    }

    async fn create_entity(
        &self,
        token: &str,
        kind: EntityKind,
        name: &str,
        entity_type: &str,
        label: Option<&str>,
    ) -> SyncResult<String> {
        let request = CreateEntityRequest {
            name,
            entity_type,
            label: match kind {
                EntityKind::Asset => None,
                EntityKind::Device => Some(label.unwrap_or("Device")),
            },
        };

        let response = self
            .http
            .post(self.url(&format!("/api/{}", kind.api_path())))
            .header("X-Authorization", Self::bearer(token))
            .json(&request)
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        let created: EntityRecord = Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Connectivity(format!("unreadable create response: {e}")))?;

        debug!(name, id = %created.id.id, ?kind, "Created remote entity");
        Ok(created.id.id)
    }

    async fn delete_entity(&self, token: &str, kind: EntityKind, id: &str) -> SyncResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/{}/{id}", kind.api_path())))
            .header("X-Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        Self::checked(response).await?;
        Ok(())
    }

    async fn list_relations(
        &self,
        token: &str,
        id: &str,
        kind: EntityKind,
    ) -> SyncResult<Vec<RelationLink>> {
        let response = self
            .http
            .get(self.url("/api/relations"))
            .query(&[("fromId", id), ("fromType", kind.remote_type())])
            .header("X-Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        let relations: Vec<RelationRecord> = Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Connectivity(format!("unreadable relations response: {e}")))?;

        Ok(relations
            .into_iter()
            .map(|r| RelationLink {
                to_id: r.to.id,
                rel_type: r.rel_type,
            })
            .collect())
    }

    async fn create_relation(
        &self,
        token: &str,
        from_id: &str,
        from_kind: EntityKind,
        to_id: &str,
        to_kind: EntityKind,
        rel_type: &RelationType,
    ) -> SyncResult<()> {
        let request = CreateRelationRequest {
            from: EntityId {
                id: from_id.to_string(),
                entity_type: from_kind.remote_type().to_string(),
            },
            to: EntityId {
                id: to_id.to_string(),
                entity_type: to_kind.remote_type().to_string(),
            },
            rel_type: rel_type.as_str(),
            type_group: RELATION_TYPE_GROUP,
        };

        let response = self
            .http
            .post(self.url("/api/relation"))
            .header("X-Authorization", Self::bearer(token))
            .json(&request)
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        Self::checked(response).await?;
        debug!(from = from_id, to = to_id, rel = %rel_type, "Created remote relation");
        Ok(())
    }

    async fn delete_relation(
        &self,
        token: &str,
        from_id: &str,
        from_kind: EntityKind,
        rel_type: &RelationType,
        to_id: &str,
        to_kind: EntityKind,
    ) -> SyncResult<()> {
        let response = self
            .http
            .delete(self.url("/api/relation"))
            .query(&[
                ("fromId", from_id),
                ("fromType", from_kind.remote_type()),
                ("relationType", rel_type.as_str()),
                ("toId", to_id),
                ("toType", to_kind.remote_type()),
            ])
            .header("X-Authorization", Self::bearer(token))
            .send()
            .await
            .map_err(SyncError::connectivity)?;

        Self::checked(response).await?;
        Ok(())
    }
}
