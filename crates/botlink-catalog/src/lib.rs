// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item catalog service for the botlink command relay.
//!
//! CRUD and substring search over catalog items, bounded-concurrency batch
//! creation, and the destructive JSON bag import.

pub mod import;
pub mod service;

pub use import::ImportReport;
pub use service::{DEFAULT_SEARCH_LIMIT, ItemCatalog};
