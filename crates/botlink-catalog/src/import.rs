// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk bag import: destructive replace of all category-`Item` entries from
//! a JSON file.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use botlink_core::{BotlinkError, Item, ItemCategory, NewItem};

use crate::service::ItemCatalog;

/// Outcome of a bag import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Items inserted under the `Item` category.
    pub imported_items: Vec<Item>,
    /// Identifiers of entries that carried an id but no name.
    pub failed_item_ids: Vec<i64>,
}

impl ItemCatalog {
    /// Import bag items from a JSON array file, replacing every existing
    /// item of category `Item`.
    ///
    /// The file must contain a JSON array of objects, each optionally
    /// bearing `id` (integer) and `name` (string); other fields are
    /// ignored, including any category value. Imported entries always land
    /// under `Item`. Entries with an id but no name are reported in
    /// `failed_item_ids`; entries with neither are dropped with a log entry
    /// only. An unreadable file or a non-array root fails with
    /// `ImportFormat` before anything is deleted or inserted.
    pub async fn import_bag_items_from_json(
        &self,
        path: &str,
    ) -> Result<ImportReport, BotlinkError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            BotlinkError::ImportFormat(format!("cannot read {path}: {e}"))
        })?;
        let root: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            BotlinkError::ImportFormat(format!("{path} is not valid JSON: {e}"))
        })?;
        let Some(entries) = root.as_array() else {
            return Err(BotlinkError::ImportFormat(format!(
                "{path}: root must be a JSON array of bag items"
            )));
        };

        let mut queued = Vec::new();
        let mut failed_item_ids = Vec::new();
        for entry in entries {
            let id = entry
                .get("id")
                .and_then(serde_json::Value::as_i64)
                .filter(|id| *id != 0);
            let name = entry
                .get("name")
                .and_then(serde_json::Value::as_str)
                .filter(|name| !name.is_empty());
            match (id, name) {
                (Some(id), Some(name)) => queued.push(NewItem {
                    item_id: id,
                    name: name.to_string(),
                    category: ItemCategory::Item,
                    description: None,
                }),
                (Some(id), None) => {
                    warn!(item_id = id, "skipping bag entry without a name");
                    failed_item_ids.push(id);
                }
                _ => warn!("skipping bag entry without id and name"),
            }
        }

        // Full replace: clear the bag category before inserting.
        let deleted = self.delete_by_category(ItemCategory::Item).await?;
        info!(deleted, "cleared existing bag items before import");

        info!(
            queued = queued.len(),
            skipped = failed_item_ids.len(),
            "importing bag items"
        );
        let imported_items = self.create_many(queued).await?;
        info!(imported = imported_items.len(), "bag import complete");

        Ok(ImportReport {
            imported_items,
            failed_item_ids,
        })
    }
}
