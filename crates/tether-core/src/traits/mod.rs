// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait contracts between the runtime and its collaborators.

pub mod capability;
pub mod state;

pub use capability::Capability;
pub use state::StateStore;
