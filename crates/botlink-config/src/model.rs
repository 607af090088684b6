// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the botlink command relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level botlink configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotlinkConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Relay endpoint settings.
    #[serde(default)]
    pub relay: RelayConfig,

    /// Bag import settings.
    #[serde(default)]
    pub import: ImportConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "botlink".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// How many times the initial database open is retried before the
    /// error propagates. Zero means a single attempt with no retry.
    #[serde(default = "default_connect_max_retries")]
    pub connect_max_retries: u32,

    /// Fixed delay between open attempts, in milliseconds.
    #[serde(default = "default_connect_backoff_ms")]
    pub connect_backoff_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            connect_max_retries: default_connect_max_retries(),
            connect_backoff_ms: default_connect_backoff_ms(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("botlink").join("botlink.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "botlink.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

fn default_connect_max_retries() -> u32 {
    3
}

fn default_connect_backoff_ms() -> u64 {
    500
}

/// Relay endpoint configuration.
///
/// The relay is the separately running bot client process that commands are
/// forwarded to over HTTP.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Base URL of the relay HTTP endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The single bot identity commands are dispatched for.
    #[serde(default = "default_bot_id")]
    pub bot_id: i64,

    /// Request timeout for relay calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bot_id: default_bot_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_bot_id() -> i64 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

/// Bag import configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Maximum number of in-flight item creations during a batch import.
    #[serde(default = "default_max_concurrent_inserts")]
    pub max_concurrent_inserts: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_concurrent_inserts: default_max_concurrent_inserts(),
        }
    }
}

fn default_max_concurrent_inserts() -> usize {
    8
}
