//! # Twinsync Platform
//!
//! HTTP client for the remote IoT device-management platform: login,
//! tenant entity listings, entity and relation create/delete. Implements
//! the [`twinsync_core::Directory`] seam the sync engine drives.

pub mod client;
pub mod model;

pub use client::{PlatformClient, PlatformConfig};
