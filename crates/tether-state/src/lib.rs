// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted per-plugin active flags for the Tether plugin runtime.
//!
//! Two implementations of the [`tether_core::StateStore`] contract:
//! [`SqliteStateStore`] for real deployments and [`MemoryStateStore`] for
//! tests and ephemeral runs.

pub mod memory;
pub mod store;

pub use memory::MemoryStateStore;
pub use store::SqliteStateStore;
