// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `botlink-core::types` for use across
//! the adapter trait boundary. This module re-exports them for convenience
//! within the storage crate.

pub use botlink_core::types::{
    CommandFilter, CommandPatch, CommandRecord, CommandStatus, Item, ItemCategory, ItemPatch,
    NewCommand, NewItem,
};
