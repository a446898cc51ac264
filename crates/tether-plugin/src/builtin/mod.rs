// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in capability implementations shipped with the runtime.
//!
//! Each submodule provides one capability kind plus its factory. A plugin
//! file on disk selects a kind by name and configures the instance through
//! its `[config]` table.

pub mod app_manager;
pub mod filesystem;
pub mod hello;
pub mod system_info;
pub mod wake_on_lan;

use std::sync::Arc;

use crate::factory::FactorySet;

/// Builds a factory set containing every built-in capability kind.
pub fn default_factory_set() -> FactorySet {
    let mut set = FactorySet::new();
    // Kinds are distinct by construction, so registration cannot fail.
    let _ = set.register(Arc::new(hello::HelloFactory));
    let _ = set.register(Arc::new(wake_on_lan::WakeOnLanFactory));
    let _ = set.register(Arc::new(filesystem::FilesystemFactory));
    let _ = set.register(Arc::new(system_info::SystemInfoFactory));
    let _ = set.register(Arc::new(app_manager::AppManagerFactory));
    set
}
