// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stable functional interface of the botlink core.
//!
//! A [`Botlink`] handle owns the storage adapter's lifetime and exposes the
//! operations the embedding tool server calls: list the relay's commands,
//! dispatch one command with durable tracking, search the item catalog, and
//! run the destructive bag import. The tool/protocol surface itself lives in
//! the embedding process; this crate is the boundary it calls through.
//!
//! Errors are logged with context here before being returned, so the
//! embedding process can render them as caller-facing text without losing
//! the trail.

use std::sync::Arc;

use tracing::{error, info};

use botlink_catalog::{ImportReport, ItemCatalog};
use botlink_config::BotlinkConfig;
use botlink_core::{BotlinkError, Item, ItemCategory, StorageAdapter};
use botlink_relay::{CommandDispatcher, CommandTracker, RelayClient};
use botlink_storage::SqliteStore;

pub use botlink_config::{load_and_validate, render_errors};

/// The wired core: store, catalog, tracker, relay client, dispatcher.
///
/// Construct once at process start with [`Botlink::init`]; drop after
/// [`Botlink::shutdown`]. All services borrow the single store this handle
/// owns.
pub struct Botlink {
    store: Arc<SqliteStore>,
    catalog: ItemCatalog,
    tracker: CommandTracker,
    relay: RelayClient,
    dispatcher: CommandDispatcher,
}

impl Botlink {
    /// Wire the core from configuration.
    ///
    /// Opens the database (with the configured bounded retry policy) and
    /// builds the services over it. A store that cannot be opened is fatal:
    /// the error propagates so the embedding process can terminate.
    pub async fn init(config: BotlinkConfig) -> Result<Self, BotlinkError> {
        let store = Arc::new(SqliteStore::new(config.storage.clone()));
        store.initialize().await?;

        let catalog = ItemCatalog::new(Arc::clone(&store), config.import.max_concurrent_inserts);
        let tracker = CommandTracker::new(Arc::clone(&store));
        let relay = RelayClient::new(&config.relay)?;
        let dispatcher =
            CommandDispatcher::new(tracker.clone(), relay.clone(), config.relay.bot_id);

        info!(
            agent = %config.agent.name,
            relay = %config.relay.base_url,
            "botlink core initialized"
        );
        Ok(Self {
            store,
            catalog,
            tracker,
            relay,
            dispatcher,
        })
    }

    /// The item catalog service, for operations beyond the tool surface
    /// (point create/update/delete).
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The command tracking service, for administrative record access.
    pub fn commands(&self) -> &CommandTracker {
        &self.tracker
    }

    /// Fetch the relay's command list, relayed verbatim as text.
    pub async fn get_all_commands(&self) -> Result<String, BotlinkError> {
        self.relay
            .list_commands()
            .await
            .inspect_err(|e| error!(error = %e, "listing relay commands failed"))
    }

    /// Dispatch one command with durable tracking.
    ///
    /// Returns the relay's JSON response body as text. Failures carry the
    /// relay status and body (or the transport error) in their text; the
    /// tracking record is finalized either way.
    pub async fn send_command(
        &self,
        command_type: &str,
        command_data: &serde_json::Value,
    ) -> Result<String, BotlinkError> {
        self.dispatcher
            .dispatch(command_type, command_data)
            .await
            .inspect_err(|e| error!(command_type, error = %e, "command dispatch failed"))
    }

    /// Case-insensitive substring search over the item catalog.
    pub async fn search_items(
        &self,
        name: &str,
        category: Option<ItemCategory>,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, BotlinkError> {
        self.catalog
            .search_by_name(name, category, limit)
            .await
            .inspect_err(|e| error!(name, error = %e, "item search failed"))
    }

    /// Import bag items from a JSON file, replacing the `Item` category.
    pub async fn import_bag_items(&self, path: &str) -> Result<ImportReport, BotlinkError> {
        self.catalog
            .import_bag_items_from_json(path)
            .await
            .inspect_err(|e| error!(path, error = %e, "bag import failed"))
    }

    /// Flush and release the store. Close failures are surfaced.
    pub async fn shutdown(&self) -> Result<(), BotlinkError> {
        info!("botlink core shutting down");
        StorageAdapter::close(self.store.as_ref()).await
    }
}

/// Install the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, falling back to the configured level.
/// Writes to stderr so an embedding process can keep stdout for its
/// protocol stream. Call once at process start.
pub fn init_logging(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
