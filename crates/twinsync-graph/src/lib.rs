//! # Twinsync Graph
//!
//! Neo4j-backed entity store for twinsync: Asset and Device nodes, typed
//! directed relationships between them, and the per-item sync status the
//! push/pull flows depend on.

pub mod client;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig};
pub use store::{GraphStore, StoreCounts};
