// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only view of the registry for status reporting.

use std::path::PathBuf;

use serde::Serialize;
use tether_core::{CommandCatalog, PluginDescriptor, PluginState};

/// One plugin's externally visible state.
///
/// Snapshots are produced sorted by name, so two snapshots taken without an
/// intervening mutation serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct PluginSnapshot {
    pub name: String,
    pub state: PluginState,
    pub version: String,
    pub display_name: String,
    pub description: String,
    pub source_path: PathBuf,
    pub commands: CommandCatalog,
    /// Failure reason, present only for `Failed` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginSnapshot {
    pub(crate) fn from_descriptor(
        descriptor: &PluginDescriptor,
        state: PluginState,
        error: Option<String>,
    ) -> Self {
        Self {
            name: descriptor.name.clone(),
            state,
            version: descriptor.version.clone(),
            display_name: descriptor.display_name.clone(),
            description: descriptor.description.clone(),
            source_path: descriptor.source_path.clone(),
            commands: descriptor.commands.clone(),
            error,
        }
    }
}

/// Minimal status payload the transport collaborator frames into an
/// outbound message after a reload or activation change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub plugins: Vec<StatusEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub name: String,
    pub active: bool,
    pub command_count: usize,
}

impl StatusSnapshot {
    pub fn from_plugins(plugins: &[PluginSnapshot]) -> Self {
        let plugins = plugins
            .iter()
            .map(|p| StatusEntry {
                name: p.name.clone(),
                active: p.state == PluginState::Active,
                command_count: p.commands.len(),
            })
            .collect();
        Self { plugins }
    }
}
