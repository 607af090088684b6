// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test infrastructure for the botlink workspace.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
