// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use botlink_config::model::StorageConfig;
use botlink_core::{
    AdapterType, BotlinkError, CommandFilter, CommandPatch, CommandRecord, HealthStatus, Item,
    ItemCategory, ItemPatch, NewCommand, NewItem, PluginAdapter, StorageAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store for catalog items and command records.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`StorageAdapter::initialize`]; until then every operation fails with a
/// storage error. The open is retried per the configured bounded-backoff
/// policy before the error propagates.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not
    /// initialized.
    fn db(&self) -> Result<&Database, BotlinkError> {
        self.db.get().ok_or_else(|| BotlinkError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    // --- Item operations ---

    pub async fn create_item(&self, item: &NewItem) -> Result<Item, BotlinkError> {
        queries::items::insert_item(self.db()?, item).await
    }

    pub async fn item_by_item_id(&self, item_id: i64) -> Result<Option<Item>, BotlinkError> {
        queries::items::get_item_by_item_id(self.db()?, item_id).await
    }

    pub async fn search_items(
        &self,
        name: &str,
        category: Option<ItemCategory>,
        limit: i64,
    ) -> Result<Vec<Item>, BotlinkError> {
        queries::items::search_items_by_name(self.db()?, name, category, limit).await
    }

    pub async fn update_item(
        &self,
        item_id: i64,
        patch: &ItemPatch,
    ) -> Result<Option<Item>, BotlinkError> {
        queries::items::update_item(self.db()?, item_id, patch).await
    }

    pub async fn delete_item(&self, item_id: i64) -> Result<bool, BotlinkError> {
        queries::items::delete_item(self.db()?, item_id).await
    }

    pub async fn delete_items_by_category(
        &self,
        category: ItemCategory,
    ) -> Result<u64, BotlinkError> {
        queries::items::delete_items_by_category(self.db()?, category).await
    }

    // --- Command operations ---

    pub async fn create_command(&self, cmd: &NewCommand) -> Result<CommandRecord, BotlinkError> {
        queries::commands::insert_command(self.db()?, cmd).await
    }

    pub async fn command_by_id(&self, id: i64) -> Result<Option<CommandRecord>, BotlinkError> {
        queries::commands::get_command(self.db()?, id).await
    }

    pub async fn list_commands(
        &self,
        filter: &CommandFilter,
    ) -> Result<Vec<CommandRecord>, BotlinkError> {
        queries::commands::list_commands(self.db()?, filter).await
    }

    pub async fn update_command(
        &self,
        id: i64,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, BotlinkError> {
        queries::commands::update_command(self.db()?, id, patch).await
    }

    pub async fn delete_command(&self, id: i64) -> Result<bool, BotlinkError> {
        queries::commands::delete_command(self.db()?, id).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, BotlinkError> {
        let db = self.db()?;
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        match probe {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), BotlinkError> {
        // Shutdown checkpoints the WAL if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStore {
    async fn initialize(&self) -> Result<(), BotlinkError> {
        let mut attempt: u32 = 0;
        let db = loop {
            match Database::open(&self.config.database_path, self.config.wal_mode).await {
                Ok(db) => break db,
                Err(e) if attempt < self.config.connect_max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.config.connect_max_retries,
                        error = %e,
                        "database open failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.connect_backoff_ms))
                        .await;
                }
                Err(e) => return Err(e),
            }
        };
        self.db.set(db).map_err(|_| BotlinkError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), BotlinkError> {
        let db = self.db()?;
        // Checkpoint WAL before the process lets go of the handle.
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
            connect_max_retries: 1,
            connect_backoff_ms: 10,
        }
    }

    #[tokio::test]
    async fn sqlite_store_reports_identity() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("identity.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn initialize_fails_after_bounded_retries() {
        // A path under a file can never be created, so every attempt fails.
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let db_path = blocker.join("sub").join("test.db");

        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
            connect_max_retries: 2,
            connect_backoff_ms: 1,
        });
        let err = store.initialize().await.unwrap_err();
        assert!(matches!(err, BotlinkError::Storage { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        let status = store.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn item_operations_work_through_the_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("items.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let created = store
            .create_item(&NewItem {
                item_id: 42,
                name: "Torch".to_string(),
                category: ItemCategory::Item,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.item_id, 42);

        let found = store.item_by_item_id(42).await.unwrap().unwrap();
        assert_eq!(found, created);

        let hits = store.search_items("tor", None, 10).await.unwrap();
        assert_eq!(hits.len(), 1);

        assert!(store.delete_item(42).await.unwrap());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn command_lifecycle_works_through_the_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("commands.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let created = store
            .create_command(&NewCommand {
                bot_id: 1,
                command_type: "move".to_string(),
                command_data: r#"{"x":1}"#.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.status, botlink_core::CommandStatus::Pending);

        let finalized = store
            .update_command(
                created.id,
                &CommandPatch {
                    status: Some(botlink_core::CommandStatus::Success),
                    response: Some(r#"{"ok":true}"#.to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(finalized.status, botlink_core::CommandStatus::Success);

        let all = store.list_commands(&CommandFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);

        store.shutdown().await.unwrap();
    }
}
