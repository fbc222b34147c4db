// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface-indexed store of live shadow trees.
//!
//! The registry is the single owner of every running tree. Readers get a
//! transient borrow bounded by the shared lock; `add`/`remove` take the
//! exclusive lock. Callbacks run *while the shared lock is held* and must
//! not reenter the registry — doing so deadlocks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::id::SurfaceId;
use crate::tree::ShadowTree;

/// Mapping from surface id to its live tree, under a reader/writer lock.
///
/// The registry must outlive all trees it holds: dropping it while
/// non-empty is a programming error and panics.
#[derive(Default)]
pub struct ShadowTreeRegistry {
    registry: RwLock<HashMap<SurfaceId, Arc<ShadowTree>>>,
}

impl std::fmt::Debug for ShadowTreeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowTreeRegistry")
            .field("surfaces", &self.registry.read().len())
            .finish()
    }
}

impl ShadowTreeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tree` under its surface id.
    pub fn add(&self, tree: Arc<ShadowTree>) {
        let mut registry = self.registry.write();
        registry.insert(tree.surface_id(), tree);
    }

    /// Drops the tree registered for `surface_id`, if any. Silent when the
    /// surface is absent.
    pub fn remove(&self, surface_id: SurfaceId) {
        let mut registry = self.registry.write();
        registry.remove(&surface_id);
    }

    /// Invokes `visitor` with the tree registered for `surface_id`, under
    /// the shared lock. Returns whether the surface was found.
    ///
    /// `visitor` must not reenter the registry.
    pub fn visit(&self, surface_id: SurfaceId, visitor: impl FnOnce(&ShadowTree)) -> bool {
        let registry = self.registry.read();
        match registry.get(&surface_id) {
            Some(tree) => {
                visitor(tree);
                true
            }
            None => false,
        }
    }

    /// Invokes `visitor` for every registered tree, under the shared lock,
    /// until the visitor sets the stop flag.
    ///
    /// `visitor` must not reenter the registry.
    pub fn enumerate(&self, mut visitor: impl FnMut(&ShadowTree, &mut bool)) {
        let registry = self.registry.read();
        let mut stop = false;
        for tree in registry.values() {
            visitor(tree, &mut stop);
            if stop {
                break;
            }
        }
    }
}

impl Drop for ShadowTreeRegistry {
    fn drop(&mut self) {
        assert!(
            self.registry.get_mut().is_empty(),
            "deallocation of a non-empty ShadowTreeRegistry"
        );
    }
}
