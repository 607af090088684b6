// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch: persist, relay, finalize.
//!
//! Every dispatch path finalizes the tracking record exactly once,
//! transport failures included. The record is written before the relay call
//! and patched after it; a finalization failure is logged and does not mask
//! the relay outcome.

use botlink_core::{BotlinkError, CommandPatch, CommandStatus, NewCommand};
use tracing::{debug, error};

use crate::client::RelayClient;
use crate::tracker::CommandTracker;

/// Coordinates a single request/response command relay with durable
/// tracking.
///
/// There is no retry, no idempotency key, and no cancellation: dispatching
/// twice with identical arguments creates two independent records and two
/// relay calls, and a dispatch runs to completion or fails.
#[derive(Clone)]
pub struct CommandDispatcher {
    tracker: CommandTracker,
    client: RelayClient,
    bot_id: i64,
}

impl CommandDispatcher {
    /// Create a dispatcher for the configured bot identity.
    pub fn new(tracker: CommandTracker, client: RelayClient, bot_id: i64) -> Self {
        Self {
            tracker,
            client,
            bot_id,
        }
    }

    /// Dispatch one command: create a `pending` record, forward over HTTP,
    /// finalize the record, and return the relay's response body as text.
    ///
    /// On failure the record is finalized `failed` with the error text in
    /// place of the response, and the error is returned to the caller.
    pub async fn dispatch(
        &self,
        command_type: &str,
        command_data: &serde_json::Value,
    ) -> Result<String, BotlinkError> {
        let command_json = serde_json::to_string(command_data)
            .map_err(|e| BotlinkError::Internal(format!("cannot serialize command data: {e}")))?;

        let record = self
            .tracker
            .create(&NewCommand {
                bot_id: self.bot_id,
                command_type: command_type.to_string(),
                command_data: command_json.clone(),
            })
            .await?;
        debug!(command_id = record.id, command_type, "command recorded, forwarding");

        let outcome = self
            .client
            .forward(self.bot_id, command_type, &command_json)
            .await;

        // Finalize exactly once, success or failure.
        let patch = match &outcome {
            Ok(body) => CommandPatch {
                status: Some(CommandStatus::Success),
                response: Some(body.clone()),
            },
            Err(e) => CommandPatch {
                status: Some(CommandStatus::Failed),
                response: Some(e.to_string()),
            },
        };
        if let Err(e) = self.tracker.update(record.id, &patch).await {
            error!(command_id = record.id, error = %e, "failed to finalize command record");
        }

        outcome
    }
}
