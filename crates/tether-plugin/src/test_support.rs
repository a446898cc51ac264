// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for unit tests in this crate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tether_core::{Capability, CommandCatalog, TetherError};

use crate::factory::CapabilityFactory;

/// Writes `<name>.toml` under `dir` with the given capability kind and any
/// extra `[plugin]` lines, returning the path.
pub fn write_plugin_file(dir: &Path, name: &str, capability: &str, extra: &str) -> PathBuf {
    let path = dir.join(format!("{name}.toml"));
    let content = format!("[plugin]\ncapability = \"{capability}\"\n{extra}\n[config]\n");
    std::fs::write(&path, content).unwrap();
    path
}

/// A capability whose `initialize` always fails. Kind: `failing`.
pub struct FailingFactory;

impl CapabilityFactory for FailingFactory {
    fn kind(&self) -> &str {
        "failing"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(FailingCapability)
    }
}

struct FailingCapability;

#[async_trait]
impl Capability for FailingCapability {
    async fn initialize(&mut self, _config: &serde_json::Value) -> Result<(), TetherError> {
        Err(TetherError::Config("always fails".into()))
    }

    fn name(&self) -> &str {
        "Failing"
    }

    fn description(&self) -> &str {
        "always fails to initialize"
    }

    fn version(&self) -> &str {
        "0.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        CommandCatalog::new()
    }

    async fn execute(
        &self,
        command: &str,
        _args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        Err(TetherError::UnknownCommand {
            plugin: "failing".into(),
            command: command.into(),
        })
    }

    async fn cleanup(&self) {}
}

/// A capability that records how often `cleanup` ran. Kind: `counting`.
pub struct CountingFactory {
    cleanups: Arc<std::sync::atomic::AtomicUsize>,
}

impl CountingFactory {
    pub fn new() -> (Self, Arc<std::sync::atomic::AtomicUsize>) {
        let cleanups = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        (
            Self {
                cleanups: cleanups.clone(),
            },
            cleanups,
        )
    }
}

impl CapabilityFactory for CountingFactory {
    fn kind(&self) -> &str {
        "counting"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(CountingCapability {
            cleanups: self.cleanups.clone(),
        })
    }
}

struct CountingCapability {
    cleanups: Arc<std::sync::atomic::AtomicUsize>,
}

#[async_trait]
impl Capability for CountingCapability {
    async fn initialize(&mut self, _config: &serde_json::Value) -> Result<(), TetherError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "Counting"
    }

    fn description(&self) -> &str {
        "counts cleanup invocations"
    }

    fn version(&self) -> &str {
        "0.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert("noop".into(), "does nothing".into());
        commands
    }

    async fn execute(
        &self,
        command: &str,
        _args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        match command {
            "noop" => Ok(serde_json::json!({"ok": true})),
            other => Err(TetherError::UnknownCommand {
                plugin: "counting".into(),
                command: other.into(),
            }),
        }
    }

    async fn cleanup(&self) {
        self.cleanups
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
