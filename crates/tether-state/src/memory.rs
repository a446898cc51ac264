// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory flag store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tether_core::{StateStore, TetherError};
use tokio::sync::RwLock;

/// A [`StateStore`] that keeps flags in a process-local map.
///
/// Cloning shares the underlying map, so a test can hand the store to a
/// registry and still observe writes through its own handle.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    flags: Arc<RwLock<HashMap<String, bool>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStateStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the given flags.
    pub fn with_flags(flags: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self {
            flags: Arc::new(RwLock::new(flags.into_iter().collect())),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `save_active_flag` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load_active_flags(&self) -> Result<HashMap<String, bool>, TetherError> {
        Ok(self.flags.read().await.clone())
    }

    async fn save_active_flag(&self, name: &str, active: bool) -> Result<(), TetherError> {
        self.flags.write().await.insert(name.to_string(), active);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
