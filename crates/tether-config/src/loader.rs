// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./tether.toml` > `~/.config/tether/tether.toml`
//! > `/etc/tether/tether.toml`, with environment variable overrides via the
//! `TETHER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TetherConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tether/tether.toml` (system-wide)
/// 3. `~/.config/tether/tether.toml` (user XDG config)
/// 4. `./tether.toml` (local directory)
/// 5. `TETHER_*` environment variables
pub fn load_config() -> Result<TetherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::file("/etc/tether/tether.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tether/tether.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tether.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TetherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TetherConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TetherConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TETHER_PLUGINS_STATE_PATH` must map to
/// `plugins.state_path`, not `plugins.state.path`.
fn env_provider() -> Env {
    Env::prefixed("TETHER_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: TETHER_CLIENT_LOG_LEVEL -> "client_log_level"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("client_", "client.", 1)
            .replacen("server_", "server.", 1)
            .replacen("plugins_", "plugins.", 1);
        mapped.into()
    })
}
