// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command record CRUD operations.
//!
//! Status transitions are forward-only: a record leaves `pending` exactly
//! once and is never reopened. The guard runs inside a single serialized
//! connection call, so concurrent finalizations cannot interleave.

use std::str::FromStr;

use botlink_core::{
    BotlinkError, CommandFilter, CommandPatch, CommandRecord, CommandStatus, NewCommand,
};
use rusqlite::params;
use rusqlite::types::Value;

use crate::database::{Database, map_tr_err};

const COMMAND_COLUMNS: &str =
    "id, bot_id, command_type, command_data, response, status, created_at, updated_at";

fn command_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommandRecord> {
    let raw_status: String = row.get(5)?;
    let status = CommandStatus::from_str(&raw_status).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(CommandRecord {
        id: row.get(0)?,
        bot_id: row.get(1)?,
        command_type: row.get(2)?,
        command_data: row.get(3)?,
        response: row.get(4)?,
        status,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Insert a new command record in `pending` state and return it with its
/// assigned id and server timestamps.
pub async fn insert_command(db: &Database, cmd: &NewCommand) -> Result<CommandRecord, BotlinkError> {
    let cmd = cmd.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO commands (bot_id, command_type, command_data)
                 VALUES (?1, ?2, ?3)",
                params![cmd.bot_id, cmd.command_type, cmd.command_data],
            )?;
            let id = conn.last_insert_rowid();
            let created = conn.query_row(
                &format!("SELECT {COMMAND_COLUMNS} FROM commands WHERE id = ?1"),
                params![id],
                command_from_row,
            )?;
            Ok(created)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a command record by id.
pub async fn get_command(db: &Database, id: i64) -> Result<Option<CommandRecord>, BotlinkError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {COMMAND_COLUMNS} FROM commands WHERE id = ?1"),
                params![id],
                command_from_row,
            );
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List command records matching the filter, oldest first.
pub async fn list_commands(
    db: &Database,
    filter: &CommandFilter,
) -> Result<Vec<CommandRecord>, BotlinkError> {
    let filter = filter.clone();
    db.connection()
        .call(move |conn| {
            let mut sql = format!("SELECT {COMMAND_COLUMNS} FROM commands");
            let mut clauses: Vec<&str> = Vec::new();
            let mut values: Vec<Value> = Vec::new();

            if let Some(status) = filter.status {
                clauses.push("status = ?");
                values.push(Value::Text(status.to_string()));
            }
            if let Some(command_type) = filter.command_type {
                clauses.push("command_type = ?");
                values.push(Value::Text(command_type));
            }
            if let Some(bot_id) = filter.bot_id {
                clauses.push("bot_id = ?");
                values.push(Value::Integer(bot_id));
            }
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            sql.push_str(" ORDER BY id ASC");

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(values), command_from_row)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

enum UpdateOutcome {
    Missing,
    Finalized,
    Updated(CommandRecord),
}

/// Apply a partial update to a command record.
///
/// Returns the updated record, `None` if no such record exists, or a
/// `Validation` error when the patch tries to move a record that has
/// already left `pending`.
pub async fn update_command(
    db: &Database,
    id: i64,
    patch: &CommandPatch,
) -> Result<Option<CommandRecord>, BotlinkError> {
    let next_status = patch.status.map(|s| s.to_string());
    let response = patch.response.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            let current: String = match conn.query_row(
                "SELECT status FROM commands WHERE id = ?1",
                params![id],
                |row| row.get(0),
            ) {
                Ok(status) => status,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(UpdateOutcome::Missing),
                Err(e) => return Err(e),
            };

            if let Some(next) = &next_status {
                let pending = CommandStatus::Pending.to_string();
                if current != pending && *next != current {
                    return Ok(UpdateOutcome::Finalized);
                }
            }

            conn.execute(
                "UPDATE commands SET
                     status = COALESCE(?1, status),
                     response = COALESCE(?2, response),
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?3",
                params![next_status, response, id],
            )?;
            let updated = conn.query_row(
                &format!("SELECT {COMMAND_COLUMNS} FROM commands WHERE id = ?1"),
                params![id],
                command_from_row,
            )?;
            Ok(UpdateOutcome::Updated(updated))
        })
        .await
        .map_err(map_tr_err)?;

    match outcome {
        UpdateOutcome::Missing => Ok(None),
        UpdateOutcome::Finalized => Err(BotlinkError::Validation(format!(
            "command {id} is already finalized"
        ))),
        UpdateOutcome::Updated(record) => Ok(Some(record)),
    }
}

/// Delete a command record by id. Reports whether a record existed.
pub async fn delete_command(db: &Database, id: i64) -> Result<bool, BotlinkError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute("DELETE FROM commands WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}
