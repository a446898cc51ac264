// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tether status` command implementation.
//!
//! Summarizes client identity, the configured server endpoint, and the
//! plugin registry state after a scan of the configured directories.

use std::io::IsTerminal;

use serde::Serialize;
use tether_config::TetherConfig;
use tether_core::{PluginState, TetherError};
use tether_plugin::PluginSnapshot;

use crate::plugins::build_host;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub client_name: String,
    pub client_id: String,
    pub server_url: String,
    pub plugin_directories: Vec<String>,
    pub active: usize,
    pub inactive: usize,
    pub failed: usize,
    pub plugins: Vec<PluginSnapshot>,
}

fn count(snapshot: &[PluginSnapshot], state: PluginState) -> usize {
    snapshot.iter().filter(|p| p.state == state).count()
}

/// Run the `tether status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(
    config: &TetherConfig,
    json: bool,
    plain: bool,
) -> Result<(), TetherError> {
    let host = build_host(config).await?;
    let snapshot = host.snapshot().await;

    let response = StatusResponse {
        client_name: config.client.name.clone(),
        client_id: config.client.client_id_or_generate(),
        server_url: config.server.url.clone(),
        plugin_directories: config.plugins.directories.clone(),
        active: count(&snapshot, PluginState::Active),
        inactive: count(&snapshot, PluginState::Inactive),
        failed: count(&snapshot, PluginState::Failed),
        plugins: snapshot,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_status(&response, use_color);
    Ok(())
}

fn print_status(response: &StatusResponse, use_color: bool) {
    println!();
    println!("  tether status");
    println!("  {}", "-".repeat(35));
    println!("    Client:   {} ({})", response.client_name, response.client_id);
    println!("    Server:   {}", response.server_url);

    let summary = format!(
        "{} active, {} inactive, {} failed",
        response.active, response.inactive, response.failed
    );
    if use_color {
        use colored::Colorize;
        let colored_summary = if response.failed > 0 {
            summary.red().to_string()
        } else {
            summary.green().to_string()
        };
        println!("    Plugins:  {colored_summary}");
    } else {
        println!("    Plugins:  {summary}");
    }

    for plugin in &response.plugins {
        println!("      {:<20} {}", plugin.name, plugin.state);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn snapshot_entry(name: &str, state: PluginState) -> PluginSnapshot {
        PluginSnapshot {
            name: name.to_string(),
            state,
            version: "1.0.0".to_string(),
            display_name: name.to_string(),
            description: String::new(),
            source_path: PathBuf::from(format!("/plugins/{name}.toml")),
            commands: BTreeMap::new(),
            error: None,
        }
    }

    #[test]
    fn counts_group_by_state() {
        let snapshot = vec![
            snapshot_entry("a", PluginState::Active),
            snapshot_entry("b", PluginState::Active),
            snapshot_entry("c", PluginState::Inactive),
            snapshot_entry("d", PluginState::Failed),
        ];
        assert_eq!(count(&snapshot, PluginState::Active), 2);
        assert_eq!(count(&snapshot, PluginState::Inactive), 1);
        assert_eq!(count(&snapshot, PluginState::Failed), 1);
    }

    #[test]
    fn status_response_serializes() {
        let response = StatusResponse {
            client_name: "tether".to_string(),
            client_id: "abc-123".to_string(),
            server_url: "ws://localhost:8765".to_string(),
            plugin_directories: vec!["plugins".to_string()],
            active: 1,
            inactive: 0,
            failed: 0,
            plugins: vec![snapshot_entry("hello", PluginState::Active)],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"client_name\":\"tether\""));
        assert!(json.contains("\"active\":1"));
        assert!(json.contains("\"state\":\"active\""));
    }
}
