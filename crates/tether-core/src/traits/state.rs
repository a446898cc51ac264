// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed persistence contract for per-plugin active flags.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TetherError;

/// Persisted per-plugin boolean active flag, keyed by plugin name.
///
/// This is the only piece of per-plugin state that survives process
/// restarts. The registry reads the full map once per reload and writes
/// immediately on every state change; there is no batching or deferred
/// flush. A name absent from the map defaults to active.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the persisted flag for every known plugin name.
    async fn load_active_flags(&self) -> Result<HashMap<String, bool>, TetherError>;

    /// Persists the flag for a single plugin name, replacing any prior value.
    async fn save_active_flag(&self, name: &str, active: bool) -> Result<(), TetherError>;
}
