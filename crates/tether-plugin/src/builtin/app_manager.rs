// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local application management capability.
//!
//! Starts executables, lists running processes, and terminates them by
//! pid. Inspection and signalling ride `sysinfo`; launching goes through
//! `tokio::process` so the child is detached from the command call.

use std::path::PathBuf;

use async_trait::async_trait;
use sysinfo::{Pid, ProcessesToUpdate, Signal, System};
use tether_core::{Capability, CommandCatalog, TetherError};

use crate::factory::CapabilityFactory;

pub struct AppManagerFactory;

impl CapabilityFactory for AppManagerFactory {
    fn kind(&self) -> &str {
        "app_manager"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(AppManagerCapability)
    }
}

pub struct AppManagerCapability;

impl AppManagerCapability {
    async fn start_app(&self, args: &serde_json::Value) -> Result<serde_json::Value, TetherError> {
        let requested = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| TetherError::Plugin {
                message: "missing required 'path' argument".to_string(),
                source: None,
            })?;
        let path = PathBuf::from(requested);
        tokio::fs::metadata(&path)
            .await
            .map_err(|e| TetherError::io(format!("inspecting '{}'", path.display()), e))?;

        // macOS application bundles are directories; launch them via `open`.
        let mut command = if path.extension().is_some_and(|ext| ext == "app") {
            let mut command = tokio::process::Command::new("open");
            command.arg(&path);
            command
        } else {
            tokio::process::Command::new(&path)
        };
        let child = command
            .spawn()
            .map_err(|e| TetherError::io(format!("starting '{}'", path.display()), e))?;

        Ok(serde_json::json!({
            "path": path.display().to_string(),
            "pid": child.id(),
        }))
    }

    fn list_running(&self) -> serde_json::Value {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        // Processes without an executable path are kernel threads or
        // otherwise inaccessible; skip them like the inspection tools do.
        let mut apps: Vec<serde_json::Value> = sys
            .processes()
            .iter()
            .filter_map(|(pid, process)| {
                let exe = process.exe()?;
                Some(serde_json::json!({
                    "pid": pid.as_u32(),
                    "name": process.name().to_string_lossy(),
                    "path": exe.display().to_string(),
                    "cmdline": process
                        .cmd()
                        .iter()
                        .map(|arg| arg.to_string_lossy().into_owned())
                        .collect::<Vec<String>>(),
                }))
            })
            .collect();
        apps.sort_by_key(|app| app["pid"].as_u64());

        serde_json::json!({
            "count": apps.len(),
            "apps": apps,
        })
    }

    fn kill_app(&self, args: &serde_json::Value) -> Result<serde_json::Value, TetherError> {
        let pid = args
            .get("pid")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| TetherError::Plugin {
                message: "missing required 'pid' argument".to_string(),
                source: None,
            })?;
        let target = Pid::from_u32(pid as u32);

        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[target]), false);
        let process = sys.process(target).ok_or_else(|| TetherError::Plugin {
            message: format!("no process with pid {pid}"),
            source: None,
        })?;

        // Prefer a graceful SIGTERM; fall back to the platform default
        // where termination signals are not supported.
        let delivered = process
            .kill_with(Signal::Term)
            .unwrap_or_else(|| process.kill());
        if !delivered {
            return Err(TetherError::Plugin {
                message: format!("could not signal process {pid}"),
                source: None,
            });
        }
        Ok(serde_json::json!({
            "pid": pid,
            "terminated": true,
        }))
    }
}

#[async_trait]
impl Capability for AppManagerCapability {
    async fn initialize(&mut self, _config: &serde_json::Value) -> Result<(), TetherError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "App Manager"
    }

    fn description(&self) -> &str {
        "Starts, lists, and terminates local applications"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert(
            "start_app".to_string(),
            "Launch an executable (args: path)".to_string(),
        );
        commands.insert(
            "list_running".to_string(),
            "List running processes with an executable path".to_string(),
        );
        commands.insert(
            "kill_app".to_string(),
            "Terminate a process (args: pid)".to_string(),
        );
        commands
    }

    async fn execute(
        &self,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        match command {
            "start_app" => self.start_app(args).await,
            "list_running" => Ok(self.list_running()),
            "kill_app" => self.kill_app(args),
            other => Err(TetherError::UnknownCommand {
                plugin: self.name().to_string(),
                command: other.to_string(),
            }),
        }
    }

    async fn cleanup(&self) {}
}
