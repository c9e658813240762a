//! # Twinsync Engine
//!
//! Orchestrates the sync flows between the local entity store and the
//! remote directory: push (local drafts out), pull (remote state in, with
//! an optional alignment sweep), identity reconciliation, and policy-driven
//! deletion. All I/O goes through the [`twinsync_core::EntityStore`] and
//! [`twinsync_core::Directory`] seams, so the logic here is testable
//! against in-memory fakes.

pub mod delete;
pub mod pull;
pub mod push;
pub mod reconcile;

#[cfg(test)]
mod testing;

pub use delete::{delete_entity, delete_relationship, DeletionOutcome, RemoteOutcome};
pub use pull::pull;
pub use push::{push_entities, push_relationship};
