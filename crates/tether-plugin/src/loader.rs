// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns one discovered candidate into a live capability instance, or
//! rejects it.
//!
//! Each candidate is processed in isolation: a malformed manifest, an
//! unknown capability kind, or a failing `initialize` produces a
//! [`FailedCandidate`] kept for diagnostics, and never prevents other
//! candidates from loading. The loader never retries.

use std::sync::Arc;

use tether_core::{Capability, CommandCatalog, PluginDescriptor, TetherError};
use tracing::{debug, warn};

use crate::discovery::Candidate;
use crate::factory::FactorySet;
use crate::manifest::{CandidateManifest, parse_manifest};

/// A successfully loaded and initialized plugin.
#[derive(Debug)]
pub struct LoadedPlugin {
    pub descriptor: PluginDescriptor,
    pub capability: Arc<dyn Capability>,
}

/// A candidate that was rejected or failed initialization.
///
/// The descriptor carries whatever identity could be extracted before the
/// failure, so diagnostics can name the offending file.
#[derive(Debug, Clone)]
pub struct FailedCandidate {
    pub descriptor: PluginDescriptor,
    pub reason: String,
}

/// Loader context: carries its own factory lookup set rather than mutating
/// any global search state.
pub struct Loader {
    factories: Arc<FactorySet>,
}

impl Loader {
    /// Creates a loader resolving manifests against the given factory set.
    pub fn new(factories: Arc<FactorySet>) -> Self {
        Self { factories }
    }

    /// Loads a single candidate.
    ///
    /// On success the returned instance has been initialized exactly once
    /// with the manifest's `[config]` table. On failure the candidate's
    /// best-effort descriptor and the cause are returned instead.
    pub async fn load(&self, candidate: &Candidate) -> Result<LoadedPlugin, FailedCandidate> {
        let content = match tokio::fs::read_to_string(&candidate.path).await {
            Ok(content) => content,
            Err(e) => return Err(self.reject(candidate, None, format!("unreadable file: {e}"))),
        };

        let manifest = match parse_manifest(&content) {
            Ok(manifest) => manifest,
            Err(e) => return Err(self.reject(candidate, None, e.to_string())),
        };

        let Some(factory) = self.factories.get(&manifest.capability) else {
            let reason = format!(
                "no registered capability kind '{}' (known kinds: {})",
                manifest.capability,
                self.factories.kinds().join(", ")
            );
            return Err(self.reject(candidate, Some(&manifest), reason));
        };

        // The instance is held by value until `initialize` has run, so the
        // at-most-once contract cannot be violated from here.
        let mut capability = factory.create();
        if let Err(e) = capability.initialize(&manifest.config).await {
            let err = TetherError::Initialization {
                name: candidate.name.clone(),
                reason: e.to_string(),
            };
            return Err(self.reject(candidate, Some(&manifest), err.to_string()));
        }
        let capability: Arc<dyn Capability> = Arc::from(capability);

        let descriptor = PluginDescriptor {
            name: candidate.name.clone(),
            source_path: candidate.path.clone(),
            version: manifest
                .version
                .clone()
                .unwrap_or_else(|| capability.version().to_string()),
            display_name: manifest
                .display_name
                .clone()
                .unwrap_or_else(|| capability.name().to_string()),
            description: manifest
                .description
                .clone()
                .unwrap_or_else(|| capability.description().to_string()),
            commands: capability.commands(),
        };

        debug!(
            plugin = %descriptor.name,
            capability = %manifest.capability,
            commands = descriptor.commands.len(),
            "loaded plugin"
        );

        Ok(LoadedPlugin {
            descriptor,
            capability,
        })
    }

    /// Builds the diagnostic record for a rejected candidate.
    fn reject(
        &self,
        candidate: &Candidate,
        manifest: Option<&CandidateManifest>,
        reason: String,
    ) -> FailedCandidate {
        warn!(
            plugin = %candidate.name,
            path = %candidate.path.display(),
            reason = %reason,
            "plugin candidate rejected"
        );
        let descriptor = PluginDescriptor {
            name: candidate.name.clone(),
            source_path: candidate.path.clone(),
            version: manifest
                .and_then(|m| m.version.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            display_name: manifest
                .and_then(|m| m.display_name.clone())
                .unwrap_or_else(|| candidate.name.clone()),
            description: manifest.and_then(|m| m.description.clone()).unwrap_or_default(),
            commands: CommandCatalog::new(),
        };
        FailedCandidate { descriptor, reason }
    }
}
