// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive host-tree operations.
//!
//! A mutation list is applied to the host tree strictly in order; the
//! ordering produced by [`calculate_mutations`](crate::calculate_mutations)
//! guarantees every intermediate host-tree state is well-formed:
//!
//! 1. Every `Insert` of a view is preceded by its `Create`, unless the view
//!    existed in the old tree.
//! 2. Every `Delete` is preceded by a `Remove` from the former parent.
//! 3. No `Remove` of a view precedes an `Update` of it; updates apply to
//!    the old identity in place.
//! 4. After applying the full list, the host tree matches the flattened
//!    child-layer projection of the new tree.

use crate::view::ShadowView;

/// One primitive operation on the host tree.
///
/// Indices are positions within the parent's child list *at application
/// time*, reflecting all earlier mutations in the same list. The root
/// `Update` is the one exception: it carries the default sentinel parent
/// and index `-1`.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Allocate a host view for a new identity.
    Create {
        /// The view to allocate.
        child: ShadowView,
    },
    /// Release the host view of an identity that left the tree.
    Delete {
        /// The view to release; already removed from its parent.
        child: ShadowView,
    },
    /// Attach `child` at `index` under `parent`.
    Insert {
        /// The receiving parent view.
        parent: ShadowView,
        /// The view being attached.
        child: ShadowView,
        /// Position in the parent's child list.
        index: i32,
    },
    /// Detach `child` from `index` under `parent`.
    Remove {
        /// The former parent view.
        parent: ShadowView,
        /// The view being detached.
        child: ShadowView,
        /// Position in the parent's child list.
        index: i32,
    },
    /// Mutate the host view of `old_child` in place to match `new_child`.
    Update {
        /// The containing parent view; the sentinel for root updates.
        parent: ShadowView,
        /// The view as the host tree currently knows it.
        old_child: ShadowView,
        /// The view as it should become.
        new_child: ShadowView,
        /// Position in the parent's child list, or `-1` for the root.
        index: i32,
    },
}

impl Mutation {
    /// Index used by root updates, which have no real parent.
    pub const ROOT_INDEX: i32 = -1;
}
