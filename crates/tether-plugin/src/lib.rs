// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, loading, lifecycle, and dispatch for Tether.
//!
//! A plugin is a TOML manifest on disk that names a capability kind and
//! carries its configuration. The [`PluginRegistry`] discovers manifests,
//! instantiates capabilities through a [`FactorySet`], and tracks each
//! plugin's lifecycle; the [`CommandDispatcher`] routes commands to active
//! plugins. [`PluginHost`] bundles all of it behind one cloneable handle.
//!
//! Built-in capability kinds:
//! - [`builtin::hello`] -- greeting demo
//! - [`builtin::wake_on_lan`] -- magic packet sender
//! - [`builtin::filesystem`] -- read-only directory inspection
//! - [`builtin::system_info`] -- host OS and hardware reporting

pub mod builtin;
pub mod discovery;
pub mod dispatch;
pub mod factory;
pub mod host;
pub mod installer;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::CommandDispatcher;
pub use factory::{CapabilityFactory, FactorySet};
pub use host::{InstallReport, PluginHost};
pub use installer::OverwritePolicy;
pub use registry::PluginRegistry;
pub use snapshot::{PluginSnapshot, StatusEntry, StatusSnapshot};
