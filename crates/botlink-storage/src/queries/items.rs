// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog item CRUD and search operations.

use botlink_core::{BotlinkError, Item, ItemCategory, ItemPatch, NewItem};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

const ITEM_COLUMNS: &str = "item_id, name, category, description, created_at, updated_at";

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let raw_category: i64 = row.get(2)?;
    let category = ItemCategory::try_from(raw_category).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Integer, Box::new(e))
    })?;
    Ok(Item {
        item_id: row.get(0)?,
        name: row.get(1)?,
        category,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// True for uniqueness and other schema constraint failures.
fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Escape LIKE metacharacters in a user-supplied search needle.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Insert a new item and return it with its server-assigned timestamps.
///
/// A duplicate `item_id` surfaces as a `Validation` error.
pub async fn insert_item(db: &Database, item: &NewItem) -> Result<Item, BotlinkError> {
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO items (item_id, name, category, description)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    item.item_id,
                    item.name,
                    i64::from(item.category),
                    item.description,
                ],
            );
            if let Err(e) = inserted {
                if is_constraint_violation(&e) {
                    return Ok(Err(BotlinkError::Validation(format!(
                        "item {} violates catalog constraints: {e}",
                        item.item_id
                    ))));
                }
                return Err(e);
            }
            let created = conn.query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
                params![item.item_id],
                item_from_row,
            )?;
            Ok(Ok(created))
        })
        .await
        .map_err(map_tr_err)?
}

/// Look up an item by its external identifier. Absence is `None`, not an error.
pub async fn get_item_by_item_id(db: &Database, item_id: i64) -> Result<Option<Item>, BotlinkError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
                params![item_id],
                item_from_row,
            );
            match result {
                Ok(item) => Ok(Some(item)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Case-insensitive substring search on item name, optionally filtered by
/// exact category, ordered ascending by name, capped at `limit`.
pub async fn search_items_by_name(
    db: &Database,
    name: &str,
    category: Option<ItemCategory>,
    limit: i64,
) -> Result<Vec<Item>, BotlinkError> {
    let needle = escape_like(name);
    let category = category.map(i64::from);
    db.connection()
        .call(move |conn| {
            let mut items = Vec::new();
            match category {
                Some(cat) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ITEM_COLUMNS} FROM items
                         WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\' AND category = ?2
                         ORDER BY name COLLATE NOCASE ASC LIMIT ?3"
                    ))?;
                    let rows = stmt.query_map(params![needle, cat, limit], item_from_row)?;
                    for row in rows {
                        items.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ITEM_COLUMNS} FROM items
                         WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\'
                         ORDER BY name COLLATE NOCASE ASC LIMIT ?2"
                    ))?;
                    let rows = stmt.query_map(params![needle, limit], item_from_row)?;
                    for row in rows {
                        items.push(row?);
                    }
                }
            }
            Ok(items)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update to the item with the given `item_id`.
///
/// Returns the updated item, or `None` if no such item exists.
pub async fn update_item(
    db: &Database,
    item_id: i64,
    patch: &ItemPatch,
) -> Result<Option<Item>, BotlinkError> {
    let name = patch.name.clone();
    let category = patch.category.map(i64::from);
    let description = patch.description.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE items SET
                     name = COALESCE(?1, name),
                     category = COALESCE(?2, category),
                     description = COALESCE(?3, description),
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE item_id = ?4",
                params![name, category, description, item_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let updated = conn.query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
                params![item_id],
                item_from_row,
            )?;
            Ok(Some(updated))
        })
        .await
        .map_err(map_tr_err)
}

/// Delete the item with the given `item_id`. Reports whether a record existed.
pub async fn delete_item(db: &Database, item_id: i64) -> Result<bool, BotlinkError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute("DELETE FROM items WHERE item_id = ?1", params![item_id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete all items of the given category. Returns the count deleted.
pub async fn delete_items_by_category(
    db: &Database,
    category: ItemCategory,
) -> Result<u64, BotlinkError> {
    let category = i64::from(category);
    db.connection()
        .call(move |conn| {
            let changed =
                conn.execute("DELETE FROM items WHERE category = ?1", params![category])?;
            Ok(changed as u64)
        })
        .await
        .map_err(map_tr_err)
}
