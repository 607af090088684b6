// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the complete core on a temp SQLite database with
//! a wiremock relay endpoint: store, catalog, tracker, and dispatcher, plus
//! the `BotlinkConfig` that describes them so facade-level tests can boot
//! from the same environment.

use std::sync::Arc;

use botlink_catalog::ItemCatalog;
use botlink_config::model::BotlinkConfig;
use botlink_core::{BotlinkError, StorageAdapter};
use botlink_relay::{CommandDispatcher, CommandTracker, RelayClient};
use botlink_storage::SqliteStore;
use wiremock::MockServer;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    bot_id: i64,
    max_concurrent_inserts: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            bot_id: 1,
            max_concurrent_inserts: 4,
        }
    }

    /// Set the bot identity commands are dispatched for.
    pub fn with_bot_id(mut self, bot_id: i64) -> Self {
        self.bot_id = bot_id;
        self
    }

    /// Set the batch-creation concurrency cap.
    pub fn with_max_concurrent_inserts(mut self, max: usize) -> Self {
        self.max_concurrent_inserts = max;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, BotlinkError> {
        // Temp directory for the SQLite database and any import files.
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| BotlinkError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        // Mock relay endpoint.
        let relay_server = MockServer::start().await;

        let mut config = BotlinkConfig::default();
        config.storage.database_path = db_path.to_string_lossy().to_string();
        config.storage.connect_max_retries = 0;
        config.storage.connect_backoff_ms = 1;
        config.relay.base_url = relay_server.uri();
        config.relay.bot_id = self.bot_id;
        config.relay.timeout_secs = 5;
        config.import.max_concurrent_inserts = self.max_concurrent_inserts;

        // Initialize the store and wire the services the way the process
        // would at startup.
        let store = Arc::new(SqliteStore::new(config.storage.clone()));
        store.initialize().await?;

        let catalog = ItemCatalog::new(Arc::clone(&store), config.import.max_concurrent_inserts);
        let tracker = CommandTracker::new(Arc::clone(&store));
        let client = RelayClient::new(&config.relay)?;
        let dispatcher = CommandDispatcher::new(tracker.clone(), client.clone(), self.bot_id);

        Ok(TestHarness {
            store,
            catalog,
            tracker,
            client,
            dispatcher,
            relay_server,
            config,
            temp_dir,
        })
    }
}

/// A fully wired core over a temp database and a mock relay.
pub struct TestHarness {
    pub store: Arc<SqliteStore>,
    pub catalog: ItemCatalog,
    pub tracker: CommandTracker,
    pub client: RelayClient,
    pub dispatcher: CommandDispatcher,
    /// Mock relay endpoint; mount expectations here.
    pub relay_server: MockServer,
    /// Configuration describing this environment, for facade-level boots.
    pub config: BotlinkConfig,
    temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Build a harness with default options.
    pub async fn new() -> Result<Self, BotlinkError> {
        Self::builder().build().await
    }

    /// Write a file into the harness temp directory and return its path.
    ///
    /// Used for bag-import tests.
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("write test file");
        path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botlink_core::{HealthStatus, PluginAdapter};

    #[tokio::test]
    async fn harness_builds_a_healthy_stack() {
        let harness = TestHarness::new().await.unwrap();
        let status = harness.store.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
        assert!(harness.config.relay.base_url.starts_with("http://"));
    }

    #[tokio::test]
    async fn write_file_lands_in_temp_dir() {
        let harness = TestHarness::new().await.unwrap();
        let path = harness.write_file("bag.json", "[]");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
