// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit capability factories and the loader's lookup set.
//!
//! A plugin manifest names a capability *kind*; the loader resolves it
//! against a [`FactorySet`] instead of scanning loaded code for a
//! conforming type. The set is a plain value carried by the loader
//! context -- nothing global, so independently configured registries
//! (and tests) cannot cross-talk.

use std::collections::HashMap;
use std::sync::Arc;

use tether_core::{Capability, TetherError};

/// Factory producing fresh capability instances for one kind.
pub trait CapabilityFactory: Send + Sync {
    /// The capability kind this factory produces, as referenced by plugin
    /// manifests.
    fn kind(&self) -> &str;

    /// Creates an uninitialized instance. The loader calls
    /// `Capability::initialize` exactly once before sharing it.
    fn create(&self) -> Box<dyn Capability>;
}

/// Lookup table of registered capability factories, keyed by kind.
#[derive(Clone, Default)]
pub struct FactorySet {
    factories: HashMap<String, Arc<dyn CapabilityFactory>>,
}

impl FactorySet {
    /// Creates an empty factory set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under its kind.
    ///
    /// Two factories claiming the same kind would make manifest resolution
    /// ambiguous, so the duplicate is rejected here, at registration time.
    pub fn register(&mut self, factory: Arc<dyn CapabilityFactory>) -> Result<(), TetherError> {
        let kind = factory.kind().to_string();
        if self.factories.contains_key(&kind) {
            return Err(TetherError::Config(format!(
                "capability kind '{kind}' is already registered"
            )));
        }
        self.factories.insert(kind, factory);
        Ok(())
    }

    /// Looks up the factory for a capability kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn CapabilityFactory>> {
        self.factories.get(kind).cloned()
    }

    /// Registered kinds, sorted for stable diagnostics.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::hello::HelloFactory;

    #[test]
    fn register_and_get() {
        let mut set = FactorySet::new();
        set.register(Arc::new(HelloFactory)).unwrap();

        assert!(set.get("hello").is_some());
        assert!(set.get("nonexistent").is_none());
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        let mut set = FactorySet::new();
        set.register(Arc::new(HelloFactory)).unwrap();

        let err = set.register(Arc::new(HelloFactory)).unwrap_err();
        assert!(err.to_string().contains("already registered"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn kinds_are_sorted() {
        let set = crate::builtin::default_factory_set();
        let kinds = set.kinds();
        let mut sorted = kinds.clone();
        sorted.sort_unstable();
        assert_eq!(kinds, sorted);
    }
}
