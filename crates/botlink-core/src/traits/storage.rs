// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends.

use async_trait::async_trait;

use crate::error::BotlinkError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for storage and persistence backends.
///
/// A storage adapter owns the single live database connection for the
/// process. Services borrow it read/write but never close it; the embedding
/// process drives `initialize` at startup and `close` at shutdown.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (connection, migrations).
    async fn initialize(&self) -> Result<(), BotlinkError>;

    /// Closes the storage backend, flushing pending writes.
    ///
    /// A close failure is surfaced to the caller, not swallowed.
    async fn close(&self) -> Result<(), BotlinkError>;
}
