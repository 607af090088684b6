// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./botlink.toml` > `~/.config/botlink/botlink.toml`
//! > `/etc/botlink/botlink.toml` with environment variable overrides via the
//! `BOTLINK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BotlinkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/botlink/botlink.toml` (system-wide)
/// 3. `~/.config/botlink/botlink.toml` (user XDG config)
/// 4. `./botlink.toml` (local directory)
/// 5. `BOTLINK_*` environment variables
pub fn load_config() -> Result<BotlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotlinkConfig::default()))
        .merge(Toml::file("/etc/botlink/botlink.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("botlink/botlink.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("botlink.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BotlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotlinkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BotlinkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BotlinkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BOTLINK_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("BOTLINK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BOTLINK_RELAY_BASE_URL -> "relay_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("relay_", "relay.", 1)
            .replacen("import_", "import.", 1);
        mapped.into()
    })
}
