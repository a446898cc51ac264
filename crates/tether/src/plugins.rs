// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tether plugins` command implementations.
//!
//! Every subcommand builds a fresh [`PluginHost`] from configuration,
//! reloads the registry, and then performs one operation. State that must
//! survive between invocations lives in the SQLite flag store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use tether_config::TetherConfig;
use tether_core::{PluginState, TetherError};
use tether_plugin::{OverwritePolicy, PluginHost, builtin};
use tether_state::SqliteStateStore;
use tracing::{debug, info};

/// Builds and reloads a host from the configured directories and store.
pub async fn build_host(config: &TetherConfig) -> Result<PluginHost, TetherError> {
    let directories: Vec<PathBuf> = config
        .plugins
        .directories
        .iter()
        .map(PathBuf::from)
        .collect();
    let state_path = PathBuf::from(&config.plugins.state_path);
    if let Some(parent) = state_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TetherError::io(format!("creating state directory '{}'", parent.display()), e)
            })?;
        }
    }
    let store = SqliteStateStore::open(&state_path).await?;
    debug!(
        directories = ?config.plugins.directories,
        state_path = %state_path.display(),
        "building plugin host"
    );

    let host = PluginHost::new(
        directories,
        Arc::new(builtin::default_factory_set()),
        Arc::new(store),
    )?;
    host.reload().await?;
    Ok(host)
}

fn state_label(state: PluginState, use_color: bool) -> String {
    if !use_color {
        return state.to_string();
    }
    match state {
        PluginState::Active => state.to_string().green().to_string(),
        PluginState::Inactive => state.to_string().yellow().to_string(),
        PluginState::Failed => state.to_string().red().to_string(),
        _ => state.to_string(),
    }
}

pub async fn run_list(config: &TetherConfig, json: bool) -> Result<(), TetherError> {
    let host = build_host(config).await?;
    let snapshot = host.snapshot().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "[]".to_string())
        );
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("no plugins found in: {:?}", config.plugins.directories);
        return Ok(());
    }

    let use_color = std::io::IsTerminal::is_terminal(&std::io::stdout());
    println!();
    println!("  {:<20} {:<10} {:<10} commands", "name", "state", "version");
    println!("  {}", "-".repeat(60));
    for plugin in &snapshot {
        let commands: Vec<&str> = plugin.commands.keys().map(String::as_str).collect();
        println!(
            "  {:<20} {:<10} {:<10} {}",
            plugin.name,
            state_label(plugin.state, use_color),
            plugin.version,
            commands.join(", ")
        );
        if let Some(error) = &plugin.error {
            println!("  {:<20} {}", "", error);
        }
    }
    println!();
    Ok(())
}

pub async fn run_set_active(
    config: &TetherConfig,
    name: &str,
    active: bool,
) -> Result<(), TetherError> {
    let host = build_host(config).await?;
    host.set_active(name, active).await?;
    info!(plugin = %name, active, "plugin flag updated");
    println!(
        "plugin '{name}' {}",
        if active { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub async fn run_command(
    config: &TetherConfig,
    name: &str,
    command: &str,
    args: &str,
) -> Result<(), TetherError> {
    let args: serde_json::Value = serde_json::from_str(args)
        .map_err(|e| TetherError::Config(format!("--args must be valid JSON: {e}")))?;

    let host = build_host(config).await?;
    let output = host.dispatch(name, command, &args).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
    );
    Ok(())
}

pub async fn run_install(
    config: &TetherConfig,
    path: &Path,
    force: bool,
) -> Result<(), TetherError> {
    let policy = if force {
        OverwritePolicy::Overwrite
    } else {
        OverwritePolicy::Reject
    };

    let host = build_host(config).await?;
    let report = host.install(path, policy).await?;

    if report.loaded {
        info!(plugin = %report.name, path = %report.path.display(), "plugin installed");
        println!(
            "installed plugin '{}' to {}",
            report.name,
            report.path.display()
        );
        Ok(())
    } else {
        // The file landed but the plugin did not load; surface the cause.
        Err(TetherError::Candidate {
            path: report.path,
            reason: report
                .load_error
                .unwrap_or_else(|| "plugin did not load".to_string()),
        })
    }
}

pub async fn run_remove(config: &TetherConfig, name: &str) -> Result<(), TetherError> {
    let host = build_host(config).await?;
    let path = host.uninstall(name).await?;
    info!(plugin = %name, path = %path.display(), "plugin removed");
    println!("removed plugin '{name}' ({})", path.display());
    Ok(())
}
