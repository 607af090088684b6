// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command tracking service: persistence CRUD over command records.
//!
//! No business logic beyond store access; store-level errors propagate to
//! the caller unmodified. The forward-only status invariant is enforced by
//! the storage layer, so every consumer of the tracker gets it.

use std::sync::Arc;

use botlink_core::{BotlinkError, CommandFilter, CommandPatch, CommandRecord, NewCommand};
use botlink_storage::SqliteStore;

/// Tracks the lifecycle of dispatched commands.
///
/// Borrows the process-wide store; never closes it.
#[derive(Clone)]
pub struct CommandTracker {
    store: Arc<SqliteStore>,
}

impl CommandTracker {
    /// Create the tracking service over the shared store.
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// Persist a new command record in `pending` state.
    pub async fn create(&self, cmd: &NewCommand) -> Result<CommandRecord, BotlinkError> {
        self.store.create_command(cmd).await
    }

    /// Get a record by id. Absence is `Ok(None)`.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CommandRecord>, BotlinkError> {
        self.store.command_by_id(id).await
    }

    /// List records matching the filter, oldest first.
    pub async fn find_all(
        &self,
        filter: &CommandFilter,
    ) -> Result<Vec<CommandRecord>, BotlinkError> {
        self.store.list_commands(filter).await
    }

    /// Apply a partial update.
    ///
    /// Moving a record that has already left `pending` fails with
    /// `Validation`; records are never reopened.
    pub async fn update(
        &self,
        id: i64,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, BotlinkError> {
        self.store.update_command(id, patch).await
    }

    /// Administrative delete. The dispatcher never calls this.
    pub async fn delete(&self, id: i64) -> Result<bool, BotlinkError> {
        self.store.delete_command(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botlink_config::model::StorageConfig;
    use botlink_core::{CommandStatus, StorageAdapter};
    use tempfile::tempdir;

    async fn setup_tracker() -> (CommandTracker, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tracker.db");
        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
            connect_max_retries: 0,
            connect_backoff_ms: 1,
        });
        store.initialize().await.unwrap();
        (CommandTracker::new(Arc::new(store)), dir)
    }

    #[tokio::test]
    async fn create_find_update_delete_lifecycle() {
        let (tracker, _dir) = setup_tracker().await;

        let created = tracker
            .create(&NewCommand {
                bot_id: 1,
                command_type: "move".to_string(),
                command_data: r#"{"x":1}"#.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.status, CommandStatus::Pending);

        let fetched = tracker.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let finalized = tracker
            .update(
                created.id,
                &CommandPatch {
                    status: Some(CommandStatus::Failed),
                    response: Some("relay transport error: timed out".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(finalized.status, CommandStatus::Failed);

        assert!(tracker.delete(created.id).await.unwrap());
        assert!(tracker.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_respects_status_filter() {
        let (tracker, _dir) = setup_tracker().await;
        for command_type in ["move", "jump"] {
            tracker
                .create(&NewCommand {
                    bot_id: 1,
                    command_type: command_type.to_string(),
                    command_data: "{}".to_string(),
                })
                .await
                .unwrap();
        }

        let pending = tracker
            .find_all(&CommandFilter {
                status: Some(CommandStatus::Pending),
                ..CommandFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
    }
}
