// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tether plugin runtime.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the Tether runtime and its trait contracts.
///
/// Every failure mode is a typed value returned to the caller. Discovery and
/// the loader additionally swallow and log per-candidate failures so a single
/// bad plugin file can never abort startup.
#[derive(Debug, Error)]
pub enum TetherError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A discovered candidate file was rejected before an instance existed
    /// (malformed manifest, unknown capability kind).
    #[error("candidate rejected: {path}: {reason}")]
    Candidate { path: PathBuf, reason: String },

    /// A capability's `initialize` returned an error; the descriptor is kept
    /// for diagnostics but no registry entry is created.
    #[error("initialization failed for plugin '{name}': {reason}")]
    Initialization { name: String, reason: String },

    /// Operation referenced a plugin name absent from the registry.
    #[error("plugin not found: {name}")]
    PluginNotFound { name: String },

    /// Dispatch targeted a plugin that is loaded but not Active.
    #[error("plugin not active: {name}")]
    PluginNotActive { name: String },

    /// A capability received a command it does not advertise.
    #[error("unknown command '{command}' for plugin '{plugin}'")]
    UnknownCommand { plugin: String, command: String },

    /// Install target already exists and the caller did not confirm overwrite.
    #[error("install conflict: '{path}' already exists")]
    InstallConflict { path: PathBuf },

    /// Filesystem failure during install/uninstall, surfaced verbatim.
    #[error("io error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Persisted-state backend failure (flag load/save).
    #[error("state store error: {message}")]
    State {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error raised by a capability implementation during `execute`.
    #[error("plugin error: {message}")]
    Plugin {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TetherError {
    /// Shorthand for an [`TetherError::Io`] with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        TetherError::Io {
            context: context.into(),
            source,
        }
    }
}
