//! Deletion policy.

/// How far a delete reaches.
///
/// The policy is passed per call, never stored. Under `LocalAndRemote` the
/// remote delete runs first and its outcome is advisory: local deletion
/// proceeds even when the remote is unreachable, so the operator can always
/// clear local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Remove from the local graph only ("safe mode").
    LocalOnly,
    /// Remove from the remote platform first, then the local graph
    /// ("strict mode").
    LocalAndRemote,
}

impl DeletionPolicy {
    pub fn includes_remote(&self) -> bool {
        matches!(self, DeletionPolicy::LocalAndRemote)
    }
}
