// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enumeration of candidate plugin files in registered directories.
//!
//! One `<name>.toml` manifest per plugin per managed directory; the file
//! stem is the plugin's unique registry name. The reserved bookkeeping
//! file [`RESERVED_INDEX_FILE`] is never treated as a plugin.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Reserved for directory bookkeeping; never a plugin candidate.
pub const RESERVED_INDEX_FILE: &str = "index.toml";

/// Extension a plugin manifest file must carry.
pub const PLUGIN_FILE_EXTENSION: &str = "toml";

/// A discovered plugin candidate, not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Registry name derived from the file stem.
    pub name: String,
    /// Path of the manifest file.
    pub path: PathBuf,
}

/// Derives the registry name for a plugin file: the base name stripped of
/// its `.toml` extension. Returns `None` for paths without a usable stem.
pub fn derive_plugin_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// Returns true if the file name qualifies as a plugin candidate.
fn is_candidate_file(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some(PLUGIN_FILE_EXTENSION) {
        return false;
    }
    path.file_name().and_then(|n| n.to_str()) != Some(RESERVED_INDEX_FILE)
}

/// Enumerates plugin candidates across the given directories, in directory
/// order.
///
/// Only direct entries are considered (no recursion). Entries within a
/// directory are sorted by file name so discovery order is deterministic.
/// An unreadable directory is logged and skipped -- discovery never aborts
/// the whole scan over one bad root.
pub fn discover(directories: &[PathBuf]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for directory in directories {
        let entries = match std::fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(directory = %directory.display(), error = %e, "skipping unreadable plugin directory");
                continue;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| is_candidate_file(path))
            .collect();
        paths.sort();

        for path in paths {
            match derive_plugin_name(&path) {
                Some(name) => candidates.push(Candidate { name, path }),
                None => {
                    warn!(path = %path.display(), "skipping plugin file with unusable name");
                }
            }
        }
    }

    candidates
}
