// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the bot relay endpoint.
//!
//! Provides [`RelayClient`] which forwards commands to the separately
//! running bot client process and lists its known commands. One attempt per
//! call: retry policy is the caller's concern, and the dispatcher
//! deliberately has none.

use std::time::Duration;

use botlink_config::model::RelayConfig;
use botlink_core::BotlinkError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::CommandRequest;

const FORWARD_PATH: &str = "/api/NetworkCommand/forwardBotRequest";
const LIST_PATH: &str = "/api/NetworkCommand";

/// HTTP client for relay communication.
///
/// Holds a pooled `reqwest::Client` with JSON headers and the configured
/// request timeout.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    /// Creates a new relay client from configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, BotlinkError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BotlinkError::RelayTransport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forward one command to the relay.
    ///
    /// `command_json` is the already-serialized command payload. Returns the
    /// relay's JSON response body as text on success; a non-2xx status
    /// surfaces as [`BotlinkError::RelayStatus`] carrying the raw error
    /// body, and connect/timeout/body failures as
    /// [`BotlinkError::RelayTransport`].
    pub async fn forward(
        &self,
        bot_id: i64,
        command_type: &str,
        command_json: &str,
    ) -> Result<String, BotlinkError> {
        let request = CommandRequest {
            bot_id,
            command_type: command_type.to_string(),
            command_json: command_json.to_string(),
        };
        let url = format!("{}{FORWARD_PATH}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotlinkError::RelayTransport {
                message: format!("relay request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, command_type, "relay response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotlinkError::RelayStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotlinkError::RelayTransport {
                message: format!("failed to read relay response body: {e}"),
                source: Some(Box::new(e)),
            })?;
        // The relay contract is a JSON body on success; reject anything else.
        serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            BotlinkError::RelayTransport {
                message: format!("failed to parse relay response: {e}"),
                source: Some(Box::new(e)),
            }
        })?;
        Ok(body)
    }

    /// Fetch the relay's command list, relayed verbatim as text.
    pub async fn list_commands(&self) -> Result<String, BotlinkError> {
        let url = format!("{}{LIST_PATH}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotlinkError::RelayTransport {
                message: format!("relay request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "command list response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotlinkError::RelayStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| BotlinkError::RelayTransport {
                message: format!("failed to read relay response body: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
