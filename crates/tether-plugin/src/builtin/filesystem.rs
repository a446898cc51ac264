// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only filesystem inspection capability.
//!
//! Lists directories and reports file metadata. Access can be confined to a
//! root directory via the `[config]` table's `root` key; without it any
//! path is allowed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tether_core::{Capability, CommandCatalog, TetherError};

use crate::factory::CapabilityFactory;

pub struct FilesystemFactory;

impl CapabilityFactory for FilesystemFactory {
    fn kind(&self) -> &str {
        "filesystem"
    }

    fn create(&self) -> Box<dyn Capability> {
        Box::new(FilesystemCapability { root: None })
    }
}

pub struct FilesystemCapability {
    root: Option<PathBuf>,
}

impl FilesystemCapability {
    /// Resolves and confines a requested path to the configured root.
    fn resolve(&self, requested: &str) -> Result<PathBuf, TetherError> {
        let path = PathBuf::from(requested);
        match &self.root {
            None => Ok(path),
            Some(root) => {
                let joined = if path.is_absolute() {
                    path
                } else {
                    root.join(path)
                };
                let canonical = joined.canonicalize().map_err(|e| {
                    TetherError::io(format!("resolving '{requested}'"), e)
                })?;
                if !canonical.starts_with(root) {
                    return Err(TetherError::Plugin {
                        message: format!("path '{requested}' escapes the configured root"),
                        source: None,
                    });
                }
                Ok(canonical)
            }
        }
    }
}

async fn entry_json(path: &Path) -> Result<serde_json::Value, TetherError> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| TetherError::io(format!("stat '{}'", path.display()), e))?;
    Ok(serde_json::json!({
        "path": path.display().to_string(),
        "is_dir": meta.is_dir(),
        "size": meta.len(),
        "readonly": meta.permissions().readonly(),
    }))
}

#[async_trait]
impl Capability for FilesystemCapability {
    async fn initialize(&mut self, config: &serde_json::Value) -> Result<(), TetherError> {
        if let Some(root) = config.get("root") {
            let root = root.as_str().ok_or_else(|| {
                TetherError::Config("'root' must be a string".to_string())
            })?;
            let canonical = PathBuf::from(root).canonicalize().map_err(|e| {
                TetherError::Config(format!("'root' directory '{root}' is not usable: {e}"))
            })?;
            self.root = Some(canonical);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Filesystem"
    }

    fn description(&self) -> &str {
        "Read-only directory listing and file metadata"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn commands(&self) -> CommandCatalog {
        let mut commands = CommandCatalog::new();
        commands.insert(
            "list_dir".to_string(),
            "List entries of a directory (args: path)".to_string(),
        );
        commands.insert(
            "get_info".to_string(),
            "Report metadata for a path (args: path)".to_string(),
        );
        commands
    }

    async fn execute(
        &self,
        command: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, TetherError> {
        let requested = args
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| TetherError::Plugin {
                message: "missing required 'path' argument".to_string(),
                source: None,
            })?;
        let path = self.resolve(requested)?;

        match command {
            "list_dir" => {
                let mut read_dir = tokio::fs::read_dir(&path).await.map_err(|e| {
                    TetherError::io(format!("listing '{}'", path.display()), e)
                })?;
                let mut entries = Vec::new();
                while let Some(entry) = read_dir.next_entry().await.map_err(|e| {
                    TetherError::io(format!("listing '{}'", path.display()), e)
                })? {
                    entries.push(entry_json(&entry.path()).await?);
                }
                entries.sort_by(|a, b| a["path"].as_str().cmp(&b["path"].as_str()));
                Ok(serde_json::json!({
                    "path": path.display().to_string(),
                    "entries": entries,
                }))
            }
            "get_info" => entry_json(&path).await,
            other => Err(TetherError::UnknownCommand {
                plugin: self.name().to_string(),
                command: other.to_string(),
            }),
        }
    }

    async fn cleanup(&self) {}
}
