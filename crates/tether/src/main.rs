// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tether - a device-side plugin runtime and management CLI.
//!
//! This is the binary entry point for the Tether client.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod plugins;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tether_config::TetherConfig;
use tracing_subscriber::EnvFilter;

/// Tether - a device-side plugin runtime and management CLI.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show client identity and plugin states.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Manage plugins.
    Plugins {
        #[command(subcommand)]
        command: PluginsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PluginsCommand {
    /// List every known plugin, failed candidates included.
    List {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Enable a plugin. The flag persists across restarts.
    Enable { name: String },
    /// Disable a plugin without unloading it.
    Disable { name: String },
    /// Run a command on an active plugin.
    Run {
        name: String,
        command: String,
        /// Command arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Copy a plugin file into the managed plugin directory and load it.
    Install {
        path: PathBuf,
        /// Replace an existing plugin file with the same name.
        #[arg(long)]
        force: bool,
    },
    /// Remove a plugin and delete its file.
    Remove { name: String },
}

/// Initialize tracing with the configured log level.
///
/// `RUST_LOG` takes precedence when set, matching the usual escape hatch.
fn init_tracing(config: &TetherConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tether={},warn", config.client.log_level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match tether_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tether_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let result = match cli.command {
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        Some(Commands::Plugins { command }) => match command {
            PluginsCommand::List { json } => plugins::run_list(&config, json).await,
            PluginsCommand::Enable { name } => plugins::run_set_active(&config, &name, true).await,
            PluginsCommand::Disable { name } => {
                plugins::run_set_active(&config, &name, false).await
            }
            PluginsCommand::Run {
                name,
                command,
                args,
            } => plugins::run_command(&config, &name, &command, &args).await,
            PluginsCommand::Install { path, force } => {
                plugins::run_install(&config, &path, force).await
            }
            PluginsCommand::Remove { name } => plugins::run_remove(&config, &name).await,
        },
        None => {
            println!("tether: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("tether: {e}");
        std::process::exit(1);
    }
}
