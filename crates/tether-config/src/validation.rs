// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and valid server URL schemes.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::TetherConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TetherConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.client.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "client.name must not be empty".to_string(),
        });
    }

    let url = config.server.url.trim();
    if url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.url must not be empty".to_string(),
        });
    } else if !url.starts_with("ws://") && !url.starts_with("wss://") {
        errors.push(ConfigError::Validation {
            message: format!("server.url `{url}` must use the ws:// or wss:// scheme"),
        });
    }

    if config.server.reconnect_delay_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.reconnect_delay_secs must be at least 1".to_string(),
        });
    }

    if config.plugins.directories.is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.directories must list at least one directory".to_string(),
        });
    }

    let mut seen_dirs = HashSet::new();
    for (i, dir) in config.plugins.directories.iter().enumerate() {
        if dir.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.directories[{i}] must not be empty"),
            });
        } else if !seen_dirs.insert(dir) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate entry `{dir}` in plugins.directories"),
            });
        }
    }

    if config.plugins.state_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.state_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
