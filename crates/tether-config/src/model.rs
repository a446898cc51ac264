// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tether device-management client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tether configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TetherConfig {
    /// Client identity settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Management-server transport settings (consumed by the transport
    /// collaborator, not by the plugin runtime itself).
    #[serde(default)]
    pub server: ServerConfig,

    /// Plugin discovery and state persistence settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Client identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Display name of this client.
    #[serde(default = "default_client_name")]
    pub name: String,

    /// Stable client identifier presented during the auth handshake.
    /// Generated (UUID v4) on first use when absent.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: default_client_name(),
            client_id: None,
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Returns the configured client id, or generates a fresh UUID v4.
    pub fn client_id_or_generate(&self) -> String {
        self.client_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

fn default_client_name() -> String {
    "tether".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Management-server transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// WebSocket URL of the management server.
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Fixed delay before reconnecting after a failed connection or
    /// rejected handshake, in seconds.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            reconnect_delay_secs: default_reconnect_delay(),
        }
    }
}

fn default_server_url() -> String {
    "ws://localhost:8765".to_string()
}

fn default_reconnect_delay() -> u64 {
    5
}

/// Plugin runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directories searched for plugin manifest files, in precedence order
    /// (later directories shadow earlier ones on a name collision).
    #[serde(default = "default_plugin_directories")]
    pub directories: Vec<String>,

    /// Path of the SQLite database persisting per-plugin active flags.
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            directories: default_plugin_directories(),
            state_path: default_state_path(),
        }
    }
}

fn default_plugin_directories() -> Vec<String> {
    vec!["plugins".to_string()]
}

fn default_state_path() -> String {
    "tether-state.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = TetherConfig::default();
        assert_eq!(config.client.name, "tether");
        assert_eq!(config.client.log_level, "info");
        assert!(config.client.client_id.is_none());
        assert_eq!(config.server.url, "ws://localhost:8765");
        assert_eq!(config.server.reconnect_delay_secs, 5);
        assert_eq!(config.plugins.directories, vec!["plugins"]);
        assert_eq!(config.plugins.state_path, "tether-state.db");
    }

    #[test]
    fn client_id_or_generate_prefers_configured_value() {
        let config = ClientConfig {
            client_id: Some("device-7".into()),
            ..ClientConfig::default()
        };
        assert_eq!(config.client_id_or_generate(), "device-7");
    }

    #[test]
    fn client_id_or_generate_produces_uuid_when_absent() {
        let config = ClientConfig::default();
        let id = config.client_id_or_generate();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
