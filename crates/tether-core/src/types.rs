// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Tether runtime.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Human-readable catalog of a plugin's commands: command name to description.
///
/// A `BTreeMap` keeps iteration order stable so status snapshots built from
/// the catalog are byte-identical across reloads of the same state.
pub type CommandCatalog = BTreeMap<String, String>;

/// Lifecycle state of a plugin instance in the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// No instance exists (candidate not yet loaded, or torn down).
    Unloaded,
    /// Instance constructed and initialized, activation not yet decided.
    Loaded,
    /// Eligible for command dispatch.
    Active,
    /// Loaded but excluded from dispatch; only a flag flip away from Active.
    Inactive,
    /// Candidate was rejected or initialization failed; kept for diagnostics.
    Failed,
}

/// Static identity extracted from a discovered plugin file.
///
/// The `name` is derived from the file's base name (stripped of its `.toml`
/// extension) and is the uniqueness key across the whole registry.
/// Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique registry key, derived from the file stem.
    pub name: String,
    /// The manifest file this plugin was loaded from.
    pub source_path: PathBuf,
    /// Version string as declared by the plugin (opaque, not semver-parsed).
    pub version: String,
    /// Display name advertised by the capability implementation.
    pub display_name: String,
    /// Human-readable description.
    pub description: String,
    /// Commands the plugin advertises; stable after a successful load.
    pub commands: CommandCatalog,
}

impl PluginDescriptor {
    /// Number of commands the plugin advertises.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}
