// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from TOML.
//!
//! A plugin manifest (`<name>.toml`) declares which registered capability
//! kind the file instantiates, identity metadata, and an optional `[config]`
//! table handed to the capability's `initialize`. The plugin's registry name
//! is not in the file -- it is derived from the file's base name.

use serde::Deserialize;
use tether_core::TetherError;

// --- TOML intermediate structs ---

/// Top-level structure of a plugin manifest file.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    plugin: PluginSection,
    #[serde(default)]
    config: toml::Table,
}

/// The `[plugin]` section of the manifest.
#[derive(Debug, Deserialize)]
struct PluginSection {
    capability: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// --- Public API ---

/// Parsed plugin manifest.
#[derive(Debug, Clone)]
pub struct CandidateManifest {
    /// The registered capability kind this file instantiates.
    pub capability: String,
    /// Version string override; falls back to the capability's own version.
    pub version: Option<String>,
    /// Display name override; falls back to the capability's own name.
    pub display_name: Option<String>,
    /// Description override; falls back to the capability's own description.
    pub description: Option<String>,
    /// The `[config]` table as a JSON object (empty object when absent),
    /// passed verbatim to `Capability::initialize`.
    pub config: serde_json::Value,
}

/// Parses a plugin manifest from a TOML string.
///
/// Validates that the capability kind is non-empty and contains only
/// alphanumeric characters, hyphens, and underscores.
pub fn parse_manifest(toml_content: &str) -> Result<CandidateManifest, TetherError> {
    let manifest_file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| TetherError::Config(format!("invalid plugin manifest: {e}")))?;

    let capability = manifest_file.plugin.capability;
    if capability.is_empty() {
        return Err(TetherError::Config(
            "plugin manifest: capability must not be empty".to_string(),
        ));
    }
    if !capability
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TetherError::Config(format!(
            "plugin manifest: capability '{capability}' contains invalid characters \
             (only alphanumeric, hyphens, underscores allowed)"
        )));
    }

    let config = serde_json::to_value(&manifest_file.config)
        .map_err(|e| TetherError::Config(format!("plugin manifest: invalid [config]: {e}")))?;

    Ok(CandidateManifest {
        capability,
        version: manifest_file.plugin.version,
        display_name: manifest_file.plugin.display_name,
        description: manifest_file.plugin.description,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_full() {
        let toml = r#"
[plugin]
capability = "wake-on-lan"
version = "1.2.0"
display_name = "Wake-on-LAN"
description = "Wakes machines on the office segment"

[config]
broadcast_addr = "192.168.1.255"
port = 9
"#;
        let manifest = parse_manifest(toml).unwrap();
        assert_eq!(manifest.capability, "wake-on-lan");
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
        assert_eq!(manifest.display_name.as_deref(), Some("Wake-on-LAN"));
        assert_eq!(
            manifest.description.as_deref(),
            Some("Wakes machines on the office segment")
        );
        assert_eq!(manifest.config["broadcast_addr"], "192.168.1.255");
        assert_eq!(manifest.config["port"], 9);
    }

    #[test]
    fn parse_manifest_minimal() {
        let toml = r#"
[plugin]
capability = "hello"
"#;
        let manifest = parse_manifest(toml).unwrap();
        assert_eq!(manifest.capability, "hello");
        assert!(manifest.version.is_none());
        assert!(manifest.display_name.is_none());
        // No [config] section yields an empty object.
        assert_eq!(manifest.config, serde_json::json!({}));
    }

    #[test]
    fn parse_manifest_missing_capability_fails() {
        let toml = r#"
[plugin]
version = "1.0.0"
"#;
        assert!(parse_manifest(toml).is_err());
    }

    #[test]
    fn parse_manifest_empty_capability_fails() {
        let toml = r#"
[plugin]
capability = ""
"#;
        let err = parse_manifest(toml).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn parse_manifest_invalid_capability_chars_fails() {
        let toml = r#"
[plugin]
capability = "bad kind!"
"#;
        let err = parse_manifest(toml).unwrap_err();
        assert!(err.to_string().contains("invalid characters"));
    }

    #[test]
    fn parse_manifest_rejects_non_toml() {
        assert!(parse_manifest("this is not a manifest {").is_err());
    }
}
