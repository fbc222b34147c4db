// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable shadow node and its cross-generation identity.
//!
//! A shadow tree is a snapshot: nodes are immutable once built and shared
//! between generations by `Arc`. A commit producing the next generation
//! clones only the spine of changed nodes (via [`ShadowNode::clone_with`])
//! and reuses every unchanged subtree, so two successive snapshots overlap
//! structurally and pointer comparison of shared handles is meaningful.

use std::sync::Arc;

use crate::id::{SurfaceId, Tag};
use crate::layout::LayoutMetrics;
use crate::props::{SharedEventEmitter, SharedProps, SharedState};
use crate::traits::NodeTraits;

/// Shared, immutable shadow-node handle.
pub type SharedShadowNode = Arc<ShadowNode>;

/// The identity of a node across tree generations.
///
/// Two nodes are of the *same family* when they describe the same
/// conceptual view in different snapshots: same tag, same owning surface,
/// same component type. The differentiator requires the two roots it is
/// given to belong to the same family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShadowNodeFamily {
    /// Stable node identity; positive, never the zero sentinel.
    pub tag: Tag,
    /// The surface this node belongs to.
    pub surface_id: SurfaceId,
    /// The host component type backing this node.
    pub component_name: &'static str,
}

/// One node of an immutable shadow-tree snapshot.
#[derive(Debug)]
pub struct ShadowNode {
    family: ShadowNodeFamily,
    traits: NodeTraits,
    order_index: i32,
    props: SharedProps,
    layout_metrics: LayoutMetrics,
    state: Option<SharedState>,
    event_emitter: Option<SharedEventEmitter>,
    children: Vec<SharedShadowNode>,
}

impl ShadowNode {
    /// Creates a childless node with default layout and ordering.
    ///
    /// # Panics
    ///
    /// Panics if `family.tag` is the zero sentinel.
    #[must_use]
    pub fn new(family: ShadowNodeFamily, traits: NodeTraits, props: SharedProps) -> Self {
        assert!(
            !family.tag.is_sentinel(),
            "shadow node tag must not be the zero sentinel"
        );
        Self {
            family,
            traits,
            order_index: 0,
            props,
            layout_metrics: LayoutMetrics::default(),
            state: None,
            event_emitter: None,
            children: Vec::new(),
        }
    }

    /// Replaces the child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SharedShadowNode>) -> Self {
        self.children = children;
        self
    }

    /// Replaces the layout metrics.
    #[must_use]
    pub fn with_layout_metrics(mut self, layout_metrics: LayoutMetrics) -> Self {
        self.layout_metrics = layout_metrics;
        self
    }

    /// Replaces the sibling order index (default 0).
    #[must_use]
    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    /// Attaches host-component state.
    #[must_use]
    pub fn with_state(mut self, state: SharedState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches an event emitter.
    #[must_use]
    pub fn with_event_emitter(mut self, event_emitter: SharedEventEmitter) -> Self {
        self.event_emitter = Some(event_emitter);
        self
    }

    /// Produces the next generation of this node.
    ///
    /// Fields passed as `None` are shared with `self`; the family, traits,
    /// order index, state, and event emitter always carry over. This is the
    /// only sanctioned way to "mutate" a committed tree: clone the spine,
    /// share the rest.
    #[must_use]
    pub fn clone_with(
        &self,
        props: Option<SharedProps>,
        children: Option<Vec<SharedShadowNode>>,
    ) -> Self {
        Self {
            family: self.family,
            traits: self.traits,
            order_index: self.order_index,
            props: props.unwrap_or_else(|| Arc::clone(&self.props)),
            layout_metrics: self.layout_metrics,
            state: self.state.clone(),
            event_emitter: self.event_emitter.clone(),
            children: children.unwrap_or_else(|| self.children.clone()),
        }
    }

    /// The node's cross-generation identity.
    #[inline]
    #[must_use]
    pub fn family(&self) -> ShadowNodeFamily {
        self.family
    }

    /// The node's stable tag.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.family.tag
    }

    /// The owning surface.
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.family.surface_id
    }

    /// The host component type backing this node.
    #[inline]
    #[must_use]
    pub fn component_name(&self) -> &'static str {
        self.family.component_name
    }

    /// The node's flattening traits.
    #[inline]
    #[must_use]
    pub fn traits(&self) -> NodeTraits {
        self.traits
    }

    /// Stable-sort key within the sibling list; 0 means "source order".
    #[inline]
    #[must_use]
    pub fn order_index(&self) -> i32 {
        self.order_index
    }

    /// The node's props.
    #[inline]
    #[must_use]
    pub fn props(&self) -> &SharedProps {
        &self.props
    }

    /// The node's computed layout.
    #[inline]
    #[must_use]
    pub fn layout_metrics(&self) -> LayoutMetrics {
        self.layout_metrics
    }

    /// Host-component state, if any.
    #[inline]
    #[must_use]
    pub fn state(&self) -> Option<&SharedState> {
        self.state.as_ref()
    }

    /// The node's event emitter, if any.
    #[inline]
    #[must_use]
    pub fn event_emitter(&self) -> Option<&SharedEventEmitter> {
        self.event_emitter.as_ref()
    }

    /// The ordered child list.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SharedShadowNode] {
        &self.children
    }

    /// Returns whether `self` and `other` describe the same conceptual view
    /// across generations.
    #[must_use]
    pub fn same_family(&self, other: &ShadowNode) -> bool {
        self.family == other.family
    }
}
