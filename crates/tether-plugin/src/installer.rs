// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copies plugin files into a managed directory.
//!
//! Installation is a plain file copy; validation happens when the registry
//! reloads and the loader processes the new candidate. The installer only
//! rejects names that can never be valid candidates.

use std::path::{Path, PathBuf};

use tether_core::TetherError;
use tracing::info;

use crate::discovery::{PLUGIN_FILE_EXTENSION, RESERVED_INDEX_FILE};

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Fail with [`TetherError::InstallConflict`].
    #[default]
    Reject,
    /// Replace the existing file.
    Overwrite,
}

/// Copies `source` into `target_dir`, creating the directory if needed.
///
/// Returns the destination path. The source keeps its file name, which
/// becomes the plugin name.
pub async fn install_file(
    source: &Path,
    target_dir: &Path,
    policy: OverwritePolicy,
) -> Result<PathBuf, TetherError> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TetherError::Candidate {
            path: source.to_path_buf(),
            reason: "source has no usable file name".to_string(),
        })?;

    if source.extension().and_then(|e| e.to_str()) != Some(PLUGIN_FILE_EXTENSION) {
        return Err(TetherError::Candidate {
            path: source.to_path_buf(),
            reason: format!("plugin files must have a .{PLUGIN_FILE_EXTENSION} extension"),
        });
    }
    if file_name == RESERVED_INDEX_FILE {
        return Err(TetherError::Candidate {
            path: source.to_path_buf(),
            reason: format!("'{RESERVED_INDEX_FILE}' is a reserved file name"),
        });
    }

    tokio::fs::create_dir_all(target_dir).await.map_err(|e| {
        TetherError::io(
            format!("creating plugin directory '{}'", target_dir.display()),
            e,
        )
    })?;

    let destination = target_dir.join(file_name);
    if destination.exists() && policy == OverwritePolicy::Reject {
        return Err(TetherError::InstallConflict { path: destination });
    }

    tokio::fs::copy(source, &destination).await.map_err(|e| {
        TetherError::io(
            format!("copying '{}' to '{}'", source.display(), destination.display()),
            e,
        )
    })?;

    info!(path = %destination.display(), "plugin file installed");
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "[plugin]\ncapability = \"hello\"\n").unwrap();
        path
    }

    #[tokio::test]
    async fn install_copies_into_created_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let source = source_file(tmp.path(), "greeter.toml");
        let target = tmp.path().join("plugins");

        let dest = install_file(&source, &target, OverwritePolicy::Reject)
            .await
            .unwrap();
        assert_eq!(dest, target.join("greeter.toml"));
        assert!(dest.exists());
        assert!(source.exists());
    }

    #[tokio::test]
    async fn existing_destination_conflicts_unless_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let source = source_file(tmp.path(), "greeter.toml");
        let target = tmp.path().join("plugins");

        install_file(&source, &target, OverwritePolicy::Reject)
            .await
            .unwrap();
        let err = install_file(&source, &target, OverwritePolicy::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, TetherError::InstallConflict { .. }));

        install_file(&source, &target, OverwritePolicy::Overwrite)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn reserved_and_misnamed_sources_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("plugins");

        let index = source_file(tmp.path(), "index.toml");
        let err = install_file(&index, &target, OverwritePolicy::Reject)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reserved"));

        let wrong_ext = source_file(tmp.path(), "notes.txt");
        let err = install_file(&wrong_ext, &target, OverwritePolicy::Reject)
            .await
            .unwrap_err();
        assert!(err.to_string().contains(".toml"));
    }

    #[tokio::test]
    async fn missing_source_surfaces_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = install_file(
            &tmp.path().join("ghost.toml"),
            &tmp.path().join("plugins"),
            OverwritePolicy::Reject,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TetherError::Io { .. }));
    }
}
