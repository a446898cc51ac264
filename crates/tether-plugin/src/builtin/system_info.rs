// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host inspection capability backed by `sysinfo`.
//!
//! Reports OS identity, memory, and CPU figures. A fresh snapshot is taken
//! per command so values are current rather than cached from load time.

use async_trait::async_trait;
use sysinfo::System;
use tether_core::{Capability, CommandCatalog, TetherError};

use crate::factory::CapabilityFactory;

pub struct SystemInfoFactory;

impl CapabilityFactory for SystemInfoFactory {
    fn kind(&self) -> &str {
        "system_info"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(SystemInfoCapability)
    }
}

pub struct SystemInfoCapability;

#[async_trait]
impl Capability for SystemInfoCapability {
    async fn initialize(&mut self, _config: &serde_json::Value) -> Result<(), TetherError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "System Info"
    }

    fn description(&self) -> &str {
        "Reports host OS, memory, and CPU details"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert(
            "overview".to_string(),
            "Report OS identity and hardware summary".to_string(),
        );
        commands.insert(
            "memory".to_string(),
            "Report total and used memory in bytes".to_string(),
        );
        commands
    }

    async fn execute(
        &self,
        command: &str,
        _args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        match command {
            "overview" => {
                let mut sys = System::new_all();
                sys.refresh_all();
                Ok(serde_json::json!({
                    "os": System::name().unwrap_or_else(|| "unknown".to_string()),
                    "os_version": System::os_version().unwrap_or_else(|| "unknown".to_string()),
                    "hostname": System::host_name().unwrap_or_else(|| "unknown".to_string()),
                    "cpus": sys.cpus().len(),
                    "total_memory": sys.total_memory(),
                }))
            }
            "memory" => {
                let mut sys = System::new();
                sys.refresh_memory();
                Ok(serde_json::json!({
                    "total": sys.total_memory(),
                    "used": sys.used_memory(),
                    "available": sys.available_memory(),
                }))
            }
            other => Err(TetherError::UnknownCommand {
                plugin: self.name().to_string(),
                command: other.to_string(),
            }),
        }
    }

    async fn cleanup(&self) {}
}
