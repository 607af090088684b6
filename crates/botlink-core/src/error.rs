// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the botlink command relay.

use thiserror::Error;

/// The primary error type used across all botlink crates.
#[derive(Debug, Error)]
pub enum BotlinkError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, conversion).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A record violates a schema-level constraint (duplicate key, missing
    /// required field, forward-only status transition).
    #[error("validation error: {0}")]
    Validation(String),

    /// The relay endpoint could not be reached or its response could not be
    /// read (connect failure, timeout, malformed body).
    #[error("relay transport error: {message}")]
    RelayTransport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The relay endpoint answered with a non-success HTTP status.
    #[error("relay returned {status}: {body}")]
    RelayStatus { status: u16, body: String },

    /// A bag import file is unreadable or its root is not a JSON array.
    #[error("import format error: {0}")]
    ImportFormat(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
