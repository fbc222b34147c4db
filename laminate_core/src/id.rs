// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and surface identity types.

use core::fmt;

/// A stable integer identity for a shadow node.
///
/// Tags are positive, unique within a tree generation, and stable across
/// generations within a surface: the node describing the same conceptual
/// view in two snapshots carries the same tag. Zero is reserved as a
/// sentinel (the default [`ShadowView`](crate::view::ShadowView) and the
/// [`TinyMap`](crate::differ) tombstone) and never identifies a live node.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub i32);

impl Tag {
    /// Returns whether this is the reserved zero sentinel.
    #[inline]
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

/// Identifies a top-level UI surface.
///
/// Surfaces are created and torn down by the embedder (see
/// [`SurfaceHandler`](crate::surface::SurfaceHandler)); each owns exactly
/// one shadow tree at a time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceId(pub i32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}
