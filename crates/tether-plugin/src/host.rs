// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! High-level entry point tying registry, dispatcher, and installer
//! together behind one shared handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tether_core::{StateStore, TetherError};
use tokio::sync::RwLock;

use crate::discovery::derive_plugin_name;
use crate::dispatch::CommandDispatcher;
use crate::factory::FactorySet;
use crate::installer::{OverwritePolicy, install_file};
use crate::registry::PluginRegistry;
use crate::snapshot::{PluginSnapshot, StatusSnapshot};

/// Outcome of an install: the file landed, but the subsequent load may
/// still have failed. Both facts are reported.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub name: String,
    pub path: PathBuf,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

/// Owns the registry and exposes every runtime operation.
///
/// Cheap to clone; all clones share one registry.
#[derive(Clone)]
pub struct PluginHost {
    registry: Arc<RwLock<PluginRegistry>>,
    dispatcher: CommandDispatcher,
    install_dir: PathBuf,
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("install_dir", &self.install_dir)
            .finish_non_exhaustive()
    }
}

impl PluginHost {
    /// Builds a host over the given plugin directories. New installs land
    /// in the first directory.
    pub fn new(
        directories: Vec<PathBuf>,
        factories: Arc<FactorySet>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self, TetherError> {
        let install_dir = directories
            .first()
            .cloned()
            .ok_or_else(|| TetherError::Config("no plugin directories configured".to_string()))?;
        let registry = Arc::new(RwLock::new(PluginRegistry::new(
            directories,
            factories,
            store,
        )));
        let dispatcher = CommandDispatcher::new(registry.clone());
        Ok(Self {
            registry,
            dispatcher,
            install_dir,
        })
    }

    /// Rescans every directory and rebuilds the registry.
    pub async fn reload(&self) -> Result<(), TetherError> {
        self.registry.write().await.reload().await
    }

    pub async fn snapshot(&self) -> Vec<PluginSnapshot> {
        self.registry.read().await.snapshot()
    }

    /// Condensed payload for the outbound status sink.
    pub async fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::from_plugins(&self.snapshot().await)
    }

    pub async fn set_active(&self, name: &str, active: bool) -> Result<(), TetherError> {
        self.registry.write().await.set_active(name, active).await
    }

    pub async fn dispatch(
        &self,
        plugin: &str,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        self.dispatcher.dispatch(plugin, command, args).await
    }

    /// Installs a plugin file and reloads so it takes effect immediately.
    pub async fn install(
        &self,
        source: &Path,
        policy: OverwritePolicy,
    ) -> Result<InstallReport, TetherError> {
        let path = install_file(source, &self.install_dir, policy).await?;
        // install_file only accepts .toml file names, so a stem exists.
        let name = derive_plugin_name(&path).ok_or_else(|| {
            TetherError::Internal(format!("installed file has no stem: {}", path.display()))
        })?;

        let mut registry = self.registry.write().await;
        registry.reload().await?;
        let loaded = registry.contains(&name);
        let load_error = registry.failure_for(&name).map(|f| f.reason.clone());
        Ok(InstallReport {
            name,
            path,
            loaded,
            load_error,
        })
    }

    /// Uninstalls a plugin, deleting its backing file.
    pub async fn uninstall(&self, name: &str) -> Result<PathBuf, TetherError> {
        self.registry.write().await.uninstall(name).await
    }

    /// Unloads every plugin. Called on shutdown.
    pub async fn shutdown(&self) {
        self.registry.write().await.unload_all().await;
    }
}
