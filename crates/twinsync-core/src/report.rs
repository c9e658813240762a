//! Batch operation outcomes.
//!
//! Every batch flow (push, pull, alignment) reports a three-way outcome:
//! full success, partial success (a warning, not a hard failure), or total
//! failure. Per-item errors are keyed by entity name so the operator can
//! tell which draft was rejected.

use crate::entity::EntityKind;

/// Three-way outcome category for a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A per-item failure inside a batch, keyed by the entity's name.
#[derive(Debug, Clone)]
pub struct ItemError {
    pub name: String,
    pub message: String,
}

impl ItemError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Outcome of pushing the drafts of one kind to the remote platform.
#[derive(Debug, Clone)]
pub struct PushReport {
    pub kind: EntityKind,
    /// How many drafts were found to push.
    pub attempted: usize,
    /// How many the remote accepted (now synced locally).
    pub synced: usize,
    pub errors: Vec<ItemError>,
}

impl PushReport {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            attempted: 0,
            synced: 0,
            errors: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        if self.attempted == 0 {
            // Nothing to sync is not an error, but worth flagging.
            Severity::Warning
        } else if self.errors.is_empty() {
            Severity::Success
        } else if self.synced > 0 {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Human-readable status line for this push.
    pub fn summary(&self) -> String {
        let what = self.kind.api_collection();
        if self.attempted == 0 {
            return format!("No draft {what} found to sync.");
        }
        if self.errors.is_empty() {
            return format!("Successfully synced {} {what}.", self.synced);
        }
        let details: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("'{}': {}", e.name, e.message))
            .collect();
        if self.synced > 0 {
            format!(
                "Synced {} {what}, but with errors: {}",
                self.synced,
                details.join(" | ")
            )
        } else {
            format!("Sync of {what} failed completely: {}", details.join(" | "))
        }
    }
}

/// Outcome of a pull (full refresh or alignment).
#[derive(Debug, Clone, Default)]
pub struct PullReport {
    pub assets: usize,
    pub devices: usize,
    pub relationships: usize,
    /// Local entities removed by the alignment sweep (always zero for a
    /// plain pull).
    pub removed: usize,
}

impl PullReport {
    pub fn entities(&self) -> usize {
        self.assets + self.devices
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "Imported {} assets, {} devices, {} relationships.",
            self.assets, self.devices, self.relationships
        );
        if self.removed > 0 {
            line.push_str(&format!(" Removed {} orphaned entities.", self.removed));
        }
        line
    }
}
