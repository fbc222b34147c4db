// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node properties and opaque per-node attachments.
//!
//! Props, state, and event emitters are shared by `Arc` and compared by
//! pointer in [`ShadowView`](crate::view::ShadowView) equality. This is
//! exact under the immutable-tree discipline: a commit clones a node's
//! props only when they actually change, so pointer identity implies value
//! identity across generations of the same surface.

use std::sync::Arc;

use crate::text::TextAttributes;

/// Shared, immutable props handle.
pub type SharedProps = Arc<Props>;

/// Shared, immutable state handle.
pub type SharedState = Arc<StateData>;

/// Shared event outlet handle.
pub type SharedEventEmitter = Arc<EventEmitter>;

/// The visual and behavioral properties of a node.
///
/// A consolidated bag rather than a per-component type: host components
/// interpret the fields that apply to them and ignore the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct Props {
    /// Opacity of the node's host view, `0.0..=1.0`.
    pub opacity: f64,
    /// Whether the host view is mounted but invisible.
    pub hidden: bool,
    /// The text run carried by a raw-text leaf node.
    pub text: Option<Arc<str>>,
    /// Attributes applied by an attributed-text container to its subtree.
    pub text_attributes: TextAttributes,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            hidden: false,
            text: None,
            text_attributes: TextAttributes::default(),
        }
    }
}

/// Opaque state written by the host component behind a node.
///
/// The differentiator never inspects the payload; a state change is
/// signalled by a fresh `Arc` on the next generation.
#[derive(Debug, Default)]
pub struct StateData {
    /// Monotonic revision of the host-side state.
    pub revision: u64,
}

/// The outlet a host view dispatches UI events through.
///
/// Carried on views so the mounting layer can wire host-side event sources
/// to the right target without walking the shadow tree.
#[derive(Debug)]
pub struct EventEmitter {
    /// Tag of the node this emitter targets.
    pub target: crate::id::Tag,
}
