// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tether capability-plugin runtime.
//!
//! This crate provides the foundational trait contracts, error type, and
//! common types used throughout the Tether workspace. Every capability
//! implementation satisfies the [`Capability`] trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TetherError;
pub use traits::{Capability, StateStore};
pub use types::{CommandCatalog, PluginDescriptor, PluginState};
