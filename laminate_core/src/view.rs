// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-type projections of shadow nodes.
//!
//! A [`ShadowView`] carries exactly the fields that affect a node's
//! host-side appearance, detached from the tree structure. Mutations and
//! mounting operate entirely on views; the underlying nodes never cross the
//! mounting boundary.

use std::sync::Arc;

use crate::id::Tag;
use crate::layout::LayoutMetrics;
use crate::node::ShadowNode;
use crate::props::{SharedEventEmitter, SharedProps, SharedState};

/// Snapshot of a node's visual identity.
///
/// Cheap to copy: props, state, and event emitter are `Arc` handles.
///
/// # Equality
///
/// Pointwise over all fields. `tag`, `component_name`, and `layout_metrics`
/// compare structurally; `props`, `state`, and `event_emitter` compare by
/// pointer, which is exact under the immutable-tree discipline (a commit
/// allocates a fresh `Arc` exactly when the value changes).
#[derive(Clone, Debug)]
pub struct ShadowView {
    /// Stable identity of the projected node; `Tag(0)` only in the default
    /// sentinel view used as the parent of root updates.
    pub tag: Tag,
    /// Host component type.
    pub component_name: &'static str,
    /// Shared props handle.
    pub props: SharedProps,
    /// Layout in the effective parent's coordinate space.
    pub layout_metrics: LayoutMetrics,
    /// Host-component state, if any.
    pub state: Option<SharedState>,
    /// Event outlet, if any.
    pub event_emitter: Option<SharedEventEmitter>,
}

impl From<&ShadowNode> for ShadowView {
    fn from(node: &ShadowNode) -> Self {
        Self {
            tag: node.tag(),
            component_name: node.component_name(),
            props: Arc::clone(node.props()),
            layout_metrics: node.layout_metrics(),
            state: node.state().cloned(),
            event_emitter: node.event_emitter().cloned(),
        }
    }
}

impl Default for ShadowView {
    /// The empty sentinel view: tag 0, no component.
    ///
    /// Used as the parent of root [`Update`](crate::mutation::Mutation)
    /// mutations, which carry no real parent.
    fn default() -> Self {
        Self {
            tag: Tag(0),
            component_name: "",
            props: SharedProps::default(),
            layout_metrics: LayoutMetrics::default(),
            state: None,
            event_emitter: None,
        }
    }
}

impl PartialEq for ShadowView {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.component_name == other.component_name
            && Arc::ptr_eq(&self.props, &other.props)
            && self.layout_metrics == other.layout_metrics
            && opt_ptr_eq(&self.state, &other.state)
            && opt_ptr_eq(&self.event_emitter, &other.event_emitter)
    }
}

fn opt_ptr_eq<T>(lhs: &Option<Arc<T>>, rhs: &Option<Arc<T>>) -> bool {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Arc::ptr_eq(lhs, rhs),
        (None, None) => true,
        _ => false,
    }
}

/// A [`ShadowView`] paired with a borrow of the node it projects.
///
/// The view is the value the differentiator compares and emits; the node
/// borrow exists only to slice grandchildren when recursing. The borrow is
/// valid exactly as long as the caller's tree roots are alive — pairs never
/// outlive a `calculate_mutations` call.
#[derive(Clone, Debug)]
pub struct ShadowViewNodePair<'a> {
    /// The projected view, with flattening offsets already applied.
    pub view: ShadowView,
    /// The projected node; used only for recursion.
    pub node: &'a ShadowNode,
}

impl PartialEq for ShadowViewNodePair<'_> {
    /// Pair equality compares views only; node identity is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}
