// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes commands to active plugins.
//!
//! The dispatcher takes the registry read lock only long enough to validate
//! the target and clone the capability handle; the command itself runs with
//! no lock held, so a slow plugin never blocks registry mutations.

use std::sync::Arc;

use tether_core::TetherError;
use tokio::sync::RwLock;
use tracing::debug;

use crate::registry::PluginRegistry;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<RwLock<PluginRegistry>>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<RwLock<PluginRegistry>>) -> Self {
        Self { registry }
    }

    /// Executes `command` on the named plugin.
    ///
    /// Fails fast when the plugin is unknown or not active; command
    /// validation is the plugin's own job, so its result or typed error
    /// is propagated verbatim.
    pub async fn dispatch(
        &self,
        plugin: &str,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        let capability = {
            let registry = self.registry.read().await;
            registry.capability(plugin)?
        };

        debug!(plugin = %plugin, command = %command, "dispatching command");
        capability.execute(command, args).await
    }
}
