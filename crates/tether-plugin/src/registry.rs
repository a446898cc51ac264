// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin registry: owns every live instance and its lifecycle.
//!
//! Lifecycle per plugin: a discovered candidate is loaded and initialized,
//! then immediately activated or deactivated from the persisted flag (a
//! missing flag means active). `Failed` candidates are tracked separately
//! for diagnostics and never hold an instance. Disabling a plugin keeps its
//! instance alive; only unload and uninstall run `cleanup`, exactly once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tether_core::{Capability, PluginDescriptor, PluginState, StateStore, TetherError};
use tracing::{info, warn};

use crate::discovery::discover;
use crate::factory::FactorySet;
use crate::loader::{FailedCandidate, Loader};
use crate::snapshot::PluginSnapshot;

struct PluginInstance {
    descriptor: PluginDescriptor,
    capability: Arc<dyn Capability>,
    state: PluginState,
}

pub struct PluginRegistry {
    directories: Vec<PathBuf>,
    loader: Loader,
    store: Arc<dyn StateStore>,
    plugins: HashMap<String, PluginInstance>,
    failures: Vec<FailedCandidate>,
}

impl PluginRegistry {
    pub fn new(
        directories: Vec<PathBuf>,
        factories: Arc<FactorySet>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            directories,
            loader: Loader::new(factories),
            store,
            plugins: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Appends a search directory if not already registered.
    pub fn add_directory(&mut self, dir: PathBuf) {
        if !self.directories.contains(&dir) {
            self.directories.push(dir);
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Unloads everything, rescans every directory, and rebuilds the
    /// registry from scratch. Equivalent to a fresh start against the same
    /// directories and state store.
    pub async fn reload(&mut self) -> Result<(), TetherError> {
        self.unload_all().await;

        let flags = self.store.load_active_flags().await?;
        let candidates = discover(&self.directories);
        for candidate in &candidates {
            match self.loader.load(candidate).await {
                Ok(loaded) => {
                    let name = loaded.descriptor.name.clone();
                    // Same name in a later directory replaces the earlier
                    // load; directory registration order is the tiebreak.
                    if let Some(previous) = self.plugins.remove(&name) {
                        warn!(
                            plugin = %name,
                            kept = %loaded.descriptor.source_path.display(),
                            replaced = %previous.descriptor.source_path.display(),
                            "duplicate plugin name, last discovered wins"
                        );
                        previous.capability.cleanup().await;
                    }
                    let active = flags.get(&name).copied().unwrap_or(true);
                    let state = if active {
                        PluginState::Active
                    } else {
                        PluginState::Inactive
                    };
                    self.plugins.insert(
                        name,
                        PluginInstance {
                            descriptor: loaded.descriptor,
                            capability: loaded.capability,
                            state,
                        },
                    );
                }
                Err(failed) => self.failures.push(failed),
            }
        }

        info!(
            loaded = self.plugins.len(),
            failed = self.failures.len(),
            directories = self.directories.len(),
            "plugin registry reloaded"
        );
        Ok(())
    }

    /// Runs `cleanup` on every live instance and empties the registry.
    pub async fn unload_all(&mut self) {
        for (_, instance) in self.plugins.drain() {
            instance.capability.cleanup().await;
        }
        self.failures.clear();
    }

    /// Enables or disables a plugin, persisting the flag first.
    ///
    /// A no-op when the plugin is already in the requested state: nothing
    /// is written to the store. The instance always stays loaded.
    pub async fn set_active(&mut self, name: &str, active: bool) -> Result<(), TetherError> {
        let instance = self
            .plugins
            .get(name)
            .ok_or_else(|| TetherError::PluginNotFound {
                name: name.to_string(),
            })?;
        let desired = if active {
            PluginState::Active
        } else {
            PluginState::Inactive
        };
        if instance.state == desired {
            return Ok(());
        }

        // Persist before flipping so a store failure leaves the in-memory
        // state unchanged.
        self.store.save_active_flag(name, active).await?;
        if let Some(instance) = self.plugins.get_mut(name) {
            instance.state = desired;
        }
        info!(plugin = %name, active, "plugin state changed");
        Ok(())
    }

    /// Returns the capability handle for dispatch.
    ///
    /// Errors when the plugin is unknown or not currently active.
    pub fn capability(&self, name: &str) -> Result<Arc<dyn Capability>, TetherError> {
        let instance = self
            .plugins
            .get(name)
            .ok_or_else(|| TetherError::PluginNotFound {
                name: name.to_string(),
            })?;
        if instance.state != PluginState::Active {
            return Err(TetherError::PluginNotActive {
                name: name.to_string(),
            });
        }
        Ok(instance.capability.clone())
    }

    /// Removes a plugin and deletes its backing file.
    ///
    /// The file is deleted first; if that fails the registry entry is left
    /// intact so the registry never disagrees with the filesystem. Cleanup
    /// runs once after the entry is removed.
    pub async fn uninstall(&mut self, name: &str) -> Result<PathBuf, TetherError> {
        let path = self
            .plugins
            .get(name)
            .map(|instance| instance.descriptor.source_path.clone())
            .ok_or_else(|| TetherError::PluginNotFound {
                name: name.to_string(),
            })?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| TetherError::io(format!("removing plugin file '{}'", path.display()), e))?;

        if let Some(instance) = self.plugins.remove(name) {
            instance.capability.cleanup().await;
        }
        info!(plugin = %name, path = %path.display(), "plugin uninstalled");
        Ok(path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn failures(&self) -> &[FailedCandidate] {
        &self.failures
    }

    /// Most recent failure recorded for the given candidate name, if any.
    pub fn failure_for(&self, name: &str) -> Option<&FailedCandidate> {
        self.failures
            .iter()
            .rev()
            .find(|f| f.descriptor.name == name)
    }

    /// Name-sorted view of every known plugin, failed candidates included.
    pub fn snapshot(&self) -> Vec<PluginSnapshot> {
        let mut entries: Vec<PluginSnapshot> = self
            .plugins
            .values()
            .map(|instance| {
                PluginSnapshot::from_descriptor(&instance.descriptor, instance.state, None)
            })
            .chain(self.failures.iter().map(|failed| {
                PluginSnapshot::from_descriptor(
                    &failed.descriptor,
                    PluginState::Failed,
                    Some(failed.reason.clone()),
                )
            }))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::test_support::{CountingFactory, write_plugin_file};
    use std::sync::atomic::Ordering;
    use tether_state::MemoryStateStore;

    fn registry_with(
        dirs: Vec<PathBuf>,
        store: MemoryStateStore,
    ) -> (PluginRegistry, Arc<std::sync::atomic::AtomicUsize>) {
        let mut factories = builtin::default_factory_set();
        let (counting, cleanups) = CountingFactory::new();
        factories.register(Arc::new(counting)).unwrap();
        (
            PluginRegistry::new(dirs, Arc::new(factories), Arc::new(store)),
            cleanups,
        )
    }

    #[tokio::test]
    async fn reload_activates_loads_and_tracks_failures() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "greeter", "hello", "");
        write_plugin_file(tmp.path(), "mystery", "no-such-kind", "");

        let (mut registry, _) =
            registry_with(vec![tmp.path().to_path_buf()], MemoryStateStore::new());
        registry.reload().await.unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "greeter");
        assert_eq!(snapshot[0].state, PluginState::Active);
        assert_eq!(snapshot[1].name, "mystery");
        assert_eq!(snapshot[1].state, PluginState::Failed);
        assert!(snapshot[1].error.as_deref().unwrap().contains("no-such-kind"));
    }

    #[tokio::test]
    async fn persisted_flag_restores_inactive_state() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "greeter", "hello", "");

        let store = MemoryStateStore::with_flags([("greeter".to_string(), false)]);
        let (mut registry, _) = registry_with(vec![tmp.path().to_path_buf()], store);
        registry.reload().await.unwrap();

        assert_eq!(registry.snapshot()[0].state, PluginState::Inactive);
        let err = registry.capability("greeter").unwrap_err();
        assert!(matches!(err, TetherError::PluginNotActive { .. }));
    }

    #[tokio::test]
    async fn stale_flags_for_absent_plugins_are_inert() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "greeter", "hello", "");

        let store = MemoryStateStore::with_flags([("ghost".to_string(), false)]);
        let (mut registry, _) = registry_with(vec![tmp.path().to_path_buf()], store);
        registry.reload().await.unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "greeter");
        assert_eq!(snapshot[0].state, PluginState::Active);
    }

    #[tokio::test]
    async fn set_active_persists_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "greeter", "hello", "");

        let store = MemoryStateStore::new();
        let (mut registry, _) =
            registry_with(vec![tmp.path().to_path_buf()], store.clone());
        registry.reload().await.unwrap();

        registry.set_active("greeter", false).await.unwrap();
        assert_eq!(registry.snapshot()[0].state, PluginState::Inactive);
        assert_eq!(
            store.load_active_flags().await.unwrap().get("greeter"),
            Some(&false)
        );

        // Already inactive: no store write happens.
        let writes_before = store.write_count();
        registry.set_active("greeter", false).await.unwrap();
        assert_eq!(store.write_count(), writes_before);

        registry.set_active("greeter", true).await.unwrap();
        assert_eq!(registry.snapshot()[0].state, PluginState::Active);
    }

    #[tokio::test]
    async fn set_active_on_unknown_plugin_is_not_found() {
        let (mut registry, _) = registry_with(Vec::new(), MemoryStateStore::new());
        registry.reload().await.unwrap();
        let err = registry.set_active("ghost", true).await.unwrap_err();
        assert!(matches!(err, TetherError::PluginNotFound { .. }));
    }

    #[tokio::test]
    async fn disable_does_not_run_cleanup_but_reload_does() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "counter", "counting", "");

        let (mut registry, cleanups) =
            registry_with(vec![tmp.path().to_path_buf()], MemoryStateStore::new());
        registry.reload().await.unwrap();

        registry.set_active("counter", false).await.unwrap();
        assert_eq!(cleanups.load(Ordering::SeqCst), 0);

        registry.reload().await.unwrap();
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_name_last_directory_wins_and_cleans_up_loser() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_plugin_file(first.path(), "dup", "counting", "");
        let winner = write_plugin_file(second.path(), "dup", "hello", "");

        let (mut registry, cleanups) = registry_with(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            MemoryStateStore::new(),
        );
        registry.reload().await.unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].source_path, winner);
        // The shadowed counting instance was cleaned up during reload.
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn uninstall_removes_file_entry_and_cleans_up_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_plugin_file(tmp.path(), "counter", "counting", "");

        let (mut registry, cleanups) =
            registry_with(vec![tmp.path().to_path_buf()], MemoryStateStore::new());
        registry.reload().await.unwrap();

        let removed = registry.uninstall("counter").await.unwrap();
        assert_eq!(removed, path);
        assert!(!path.exists());
        assert!(!registry.contains("counter"));
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        // Gone from subsequent reloads too.
        registry.reload().await.unwrap();
        assert!(registry.snapshot().is_empty());
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn uninstall_keeps_entry_when_file_removal_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_plugin_file(tmp.path(), "counter", "counting", "");

        let (mut registry, cleanups) =
            registry_with(vec![tmp.path().to_path_buf()], MemoryStateStore::new());
        registry.reload().await.unwrap();

        // Delete the file out from under the registry so removal errors.
        std::fs::remove_file(&path).unwrap();
        let err = registry.uninstall("counter").await.unwrap_err();
        assert!(matches!(err, TetherError::Io { .. }));
        assert!(registry.contains("counter"));
        assert_eq!(cleanups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reload_twice_gives_identical_snapshots() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_file(tmp.path(), "greeter", "hello", "");
        write_plugin_file(tmp.path(), "info", "system_info", "");

        let store = MemoryStateStore::new();
        let (mut registry, _) =
            registry_with(vec![tmp.path().to_path_buf()], store.clone());
        registry.reload().await.unwrap();
        registry.set_active("info", false).await.unwrap();

        registry.reload().await.unwrap();
        let first = serde_json::to_string(&registry.snapshot()).unwrap();

        // A second registry built fresh over the same state must agree.
        let (mut fresh, _) = registry_with(vec![tmp.path().to_path_buf()], store);
        fresh.reload().await.unwrap();
        let second = serde_json::to_string(&fresh.snapshot()).unwrap();
        assert_eq!(first, second);
    }
}
