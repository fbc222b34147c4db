// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node flags that drive view flattening.

/// Flags describing how a shadow node participates in the host tree.
///
/// The differentiator consults exactly two flags. A node that neither forms
/// a view nor a stacking context is *flattened*: it contributes no host view
/// of its own, and its view-forming descendants are promoted into the
/// nearest ancestor that terminates flattening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeTraits {
    /// The node corresponds to a host view.
    pub forms_view: bool,
    /// The node clips or transforms its descendants as a unit and therefore
    /// appears as a single host subtree rooted at itself. Implies that child
    /// flattening terminates here. A stacking context need not itself form a
    /// view-only node; in practice every stacking context also forms a view.
    pub forms_stacking_context: bool,
}

impl NodeTraits {
    /// A plain view: mounted as a host view, but its children belong to the
    /// parent's effective child list.
    #[must_use]
    pub const fn view() -> Self {
        Self {
            forms_view: true,
            forms_stacking_context: false,
        }
    }

    /// A view that is also a stacking context.
    #[must_use]
    pub const fn stacking_context() -> Self {
        Self {
            forms_view: true,
            forms_stacking_context: true,
        }
    }

    /// A purely structural node, invisible to the host tree.
    #[must_use]
    pub const fn flattened() -> Self {
        Self {
            forms_view: false,
            forms_stacking_context: false,
        }
    }
}
