// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch-and-tracking subsystem for the botlink command relay.
//!
//! [`RelayClient`] talks HTTP to the separately running bot client,
//! [`CommandTracker`] persists command lifecycles, and
//! [`CommandDispatcher`] ties them together: persist `pending`, forward,
//! finalize exactly once.

pub mod client;
pub mod dispatcher;
pub mod tracker;
pub mod types;

pub use client::RelayClient;
pub use dispatcher::CommandDispatcher;
pub use tracker::CommandTracker;
pub use types::CommandRequest;
