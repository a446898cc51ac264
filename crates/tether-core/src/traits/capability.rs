// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Capability Interface: the contract every plugin implementation
//! must satisfy.

use async_trait::async_trait;

use crate::error::TetherError;
use crate::types::CommandCatalog;

/// The fixed contract between the runtime and a plugin implementation.
///
/// The loader constructs an instance through a registered factory, calls
/// [`initialize`](Capability::initialize) exactly once while it still holds
/// the instance by value, and only then shares it behind an `Arc`. After
/// that point the instance is only reached through `&self` methods.
///
/// `cleanup` is invoked exactly once, when the instance is being unloaded
/// (reload replacement or uninstall) -- never on a plain disable.
#[async_trait]
pub trait Capability: Send + Sync {
    /// One-time setup with the configuration table from the plugin manifest
    /// (an empty JSON object when the manifest has no `[config]` section).
    async fn initialize(&mut self, config: &serde_json::Value) -> Result<(), TetherError>;

    /// Display name of the plugin (distinct from the registry key, which is
    /// derived from the file name).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Version string. Opaque to the runtime.
    fn version(&self) -> &str;

    /// The command catalog advertised to callers. Must be stable once
    /// `initialize` has succeeded.
    fn commands(&self) -> CommandCatalog;

    /// Executes a named command with an open key/value argument bag.
    ///
    /// An unrecognized `command` must yield [`TetherError::UnknownCommand`]
    /// rather than panic. The dispatcher propagates the result or typed
    /// error verbatim.
    async fn execute(
        &self,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError>;

    /// Releases any resources opened by `initialize`.
    async fn cleanup(&self);
}

impl std::fmt::Debug for dyn Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name())
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}
