//! Centralized error types for twinsync.

use thiserror::Error;

/// Main error type for sync operations.
///
/// Auth failures abort the containing operation; most other variants are
/// recorded per item by the batch flows and do not stop the batch.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Could not reach remote platform: {0}")]
    Connectivity(String),

    #[error("Remote rejected the request (HTTP {status}): {detail}")]
    RemoteRejection { status: u16, detail: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An entity named '{0}' already exists")]
    DuplicateName(String),

    #[error("Cannot sync relationship '{from}' -> '{to}': both endpoints must be synced first")]
    DraftEndpoint { from: String, to: String },

    #[error("Invalid relationship type '{0}': expected a letter followed by letters, digits or underscores")]
    InvalidRelationType(String),

    #[error("Graph store error: {0}")]
    Graph(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Create a graph store error from any displayable source.
    pub fn graph(err: impl std::fmt::Display) -> Self {
        Self::Graph(err.to_string())
    }

    /// Create a connectivity error from any displayable source.
    pub fn connectivity(err: impl std::fmt::Display) -> Self {
        Self::Connectivity(err.to_string())
    }

    /// Create a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this error blocks the operation without being a hard
    /// failure (skipped invariant checks, missing drafts).
    pub fn is_blocking_warning(&self) -> bool {
        matches!(self, Self::DraftEndpoint { .. })
    }
}
