// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog CRUD, search, and bounded batch creation.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use botlink_core::{BotlinkError, Item, ItemCategory, ItemPatch, NewItem};
use botlink_storage::SqliteStore;

/// Default result cap for name searches.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Item catalog service.
///
/// Borrows the process-wide store; never closes it.
#[derive(Clone)]
pub struct ItemCatalog {
    store: Arc<SqliteStore>,
    max_concurrent_inserts: usize,
}

impl ItemCatalog {
    /// Create the catalog service over the shared store.
    ///
    /// `max_concurrent_inserts` caps the in-flight creations of
    /// [`create_many`](Self::create_many).
    pub fn new(store: Arc<SqliteStore>, max_concurrent_inserts: usize) -> Self {
        Self {
            store,
            max_concurrent_inserts: max_concurrent_inserts.max(1),
        }
    }

    /// Persist one item.
    ///
    /// Fails with `Validation` when the name is empty, the category is the
    /// reserved `Invalid` value, or `item_id` violates uniqueness.
    pub async fn create(&self, item: &NewItem) -> Result<Item, BotlinkError> {
        if item.name.trim().is_empty() {
            return Err(BotlinkError::Validation(format!(
                "item {} has an empty name",
                item.item_id
            )));
        }
        if item.category == ItemCategory::Invalid {
            return Err(BotlinkError::Validation(format!(
                "item {} uses the reserved Invalid category",
                item.item_id
            )));
        }
        self.store.create_item(item).await
    }

    /// Look up an item by its external identifier. Absence is `Ok(None)`.
    pub async fn find_by_item_id(&self, item_id: i64) -> Result<Option<Item>, BotlinkError> {
        self.store.item_by_item_id(item_id).await
    }

    /// Case-insensitive substring search on item name.
    ///
    /// Results are optionally filtered by exact category, ordered ascending
    /// by name, and capped at `limit` (default 10). An empty result set is a
    /// valid outcome.
    pub async fn search_by_name(
        &self,
        name: &str,
        category: Option<ItemCategory>,
        limit: Option<usize>,
    ) -> Result<Vec<Item>, BotlinkError> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        self.store.search_items(name, category, limit as i64).await
    }

    /// Apply a partial update. Returns the updated item, `None` when absent.
    pub async fn update(
        &self,
        item_id: i64,
        patch: &ItemPatch,
    ) -> Result<Option<Item>, BotlinkError> {
        self.store.update_item(item_id, patch).await
    }

    /// Delete by identity. Reports whether a record existed.
    pub async fn delete(&self, item_id: i64) -> Result<bool, BotlinkError> {
        self.store.delete_item(item_id).await
    }

    /// Create a batch of items, at most `max_concurrent_inserts` in flight.
    ///
    /// Best-effort, fail-fast: the first failing creation aborts the batch
    /// and its error is returned; items created before the failure remain
    /// persisted. There is no rollback.
    pub async fn create_many(&self, items: Vec<NewItem>) -> Result<Vec<Item>, BotlinkError> {
        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_inserts));
        let creations = items.into_iter().map(|item| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| BotlinkError::Internal(format!("semaphore closed: {e}")))?;
                self.create(&item).await
            }
        });
        let created = futures::future::try_join_all(creations).await?;
        debug!(total, "batch item creation complete");
        Ok(created)
    }

    /// Delete all items of the given category. Returns the count deleted.
    pub async fn delete_by_category(&self, category: ItemCategory) -> Result<u64, BotlinkError> {
        let deleted = self.store.delete_items_by_category(category).await?;
        debug!(deleted, category = i64::from(category), "deleted items by category");
        Ok(deleted)
    }
}
