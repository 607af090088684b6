// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the botlink command relay.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the botlink workspace: the catalog item and
//! command record models, the adapter traits implemented by the storage
//! layer, and the shared [`BotlinkError`] enum.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BotlinkError;
pub use types::{
    AdapterType, CommandFilter, CommandPatch, CommandRecord, CommandStatus, HealthStatus,
    InvalidCategory, Item, ItemCategory, ItemPatch, NewCommand, NewItem,
};

// Re-export the adapter traits at crate root.
pub use traits::{PluginAdapter, StorageAdapter};
