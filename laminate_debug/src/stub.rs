// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host-tree simulation.
//!
//! [`StubViewTree`] plays the role of a platform view hierarchy: it applies
//! mutation lists in order and panics on every invariant violation a real
//! mounting layer would trip over (inserting an uncreated view, removing
//! the wrong child, out-of-range indices, deleting a still-attached view).
//! Tests build the expected end state with
//! [`StubViewTree::from_shadow_node`] and compare trees structurally.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use laminate_core::id::Tag;
use laminate_core::layout::LayoutMetrics;
use laminate_core::node::ShadowNode;
use laminate_core::props::SharedProps;
use laminate_core::slice_child_pairs;
use laminate_core::tree::{Mounter, MountingTransaction};
use laminate_core::view::ShadowView;
use laminate_core::Mutation;

/// One simulated host view.
///
/// Equality mirrors [`ShadowView`] equality: structural on tag, component,
/// layout, and child order; pointer equality on props. Two stub trees are
/// equal exactly when the mutation streams that produced them converged on
/// the same projection.
#[derive(Clone, Debug)]
pub struct StubView {
    /// Identity of the mounted view.
    pub tag: Tag,
    /// Host component type.
    pub component_name: &'static str,
    /// Props the view was last created or updated with.
    pub props: SharedProps,
    /// Layout the view was last created or updated with.
    pub layout_metrics: LayoutMetrics,
    /// Ordered child tags.
    pub children: Vec<Tag>,
}

impl PartialEq for StubView {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.component_name == other.component_name
            && Arc::ptr_eq(&self.props, &other.props)
            && self.layout_metrics == other.layout_metrics
            && self.children == other.children
    }
}

impl From<&ShadowView> for StubView {
    fn from(view: &ShadowView) -> Self {
        Self {
            tag: view.tag,
            component_name: view.component_name,
            props: Arc::clone(&view.props),
            layout_metrics: view.layout_metrics,
            children: Vec::new(),
        }
    }
}

/// A simulated host-view hierarchy keyed by tag.
#[derive(Clone, Debug, PartialEq)]
pub struct StubViewTree {
    root_tag: Tag,
    views: HashMap<Tag, StubView>,
}

impl StubViewTree {
    /// Creates a tree holding only the (already mounted) root view.
    #[must_use]
    pub fn new(root_view: &ShadowView) -> Self {
        let mut views = HashMap::new();
        views.insert(root_view.tag, StubView::from(root_view));
        Self {
            root_tag: root_view.tag,
            views,
        }
    }

    /// Builds the expected host tree for a shadow tree: the root plus the
    /// recursive flattened child layers.
    #[must_use]
    pub fn from_shadow_node(root: &ShadowNode) -> Self {
        let mut tree = Self::new(&ShadowView::from(root));
        tree.populate(root.tag(), root);
        tree
    }

    fn populate(&mut self, parent_tag: Tag, node: &ShadowNode) {
        let mut pairs = slice_child_pairs(node);
        // Match the differentiator's sibling ordering. The sort is stable,
        // so all-zero order indices keep source order.
        pairs.sort_by_key(|pair| pair.node.order_index());
        for pair in pairs {
            self.views.insert(pair.view.tag, StubView::from(&pair.view));
            self.views
                .get_mut(&parent_tag)
                .expect("parent view must be registered before its children")
                .children
                .push(pair.view.tag);
            self.populate(pair.view.tag, pair.node);
        }
    }

    /// The root view's tag.
    #[must_use]
    pub fn root_tag(&self) -> Tag {
        self.root_tag
    }

    /// The view mounted under `tag`, if any.
    #[must_use]
    pub fn view(&self, tag: Tag) -> Option<&StubView> {
        self.views.get(&tag)
    }

    /// Number of mounted views, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns whether only the root is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.len() == 1
    }

    /// Applies a mutation list in order.
    ///
    /// # Panics
    ///
    /// Panics when any mutation violates the host-tree invariants; the
    /// panic message names the violated invariant and the offending tag.
    pub fn mount(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            self.apply(mutation);
        }
    }

    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::Create { child } => {
                let previous = self.views.insert(child.tag, StubView::from(child));
                assert!(
                    previous.is_none(),
                    "create of already-mounted view {:?}",
                    child.tag
                );
            }
            Mutation::Delete { child } => {
                assert!(
                    child.tag != self.root_tag,
                    "delete of the root view {:?}",
                    child.tag
                );
                let attached = self
                    .views
                    .values()
                    .any(|view| view.children.contains(&child.tag));
                assert!(
                    !attached,
                    "delete of still-attached view {:?}",
                    child.tag
                );
                let removed = self.views.remove(&child.tag);
                match removed {
                    Some(removed) => assert!(
                        removed.children.is_empty(),
                        "delete of view {:?} with mounted children {:?}",
                        child.tag,
                        removed.children
                    ),
                    None => panic!("delete of unknown view {:?}", child.tag),
                }
            }
            Mutation::Insert {
                parent,
                child,
                index,
            } => {
                assert!(
                    self.views.contains_key(&child.tag),
                    "insert of uncreated view {:?}",
                    child.tag
                );
                // Refresh the stored snapshot: an insert carries the
                // current view of a possibly reinserted child.
                let stored = self
                    .views
                    .get_mut(&child.tag)
                    .expect("presence checked above");
                let children = std::mem::take(&mut stored.children);
                *stored = StubView::from(child);
                stored.children = children;

                let index = index_to_usize(*index);
                let parent = self
                    .views
                    .get_mut(&parent.tag)
                    .unwrap_or_else(|| panic!("insert under unknown parent {:?}", parent.tag));
                assert!(
                    index <= parent.children.len(),
                    "insert index {index} out of range 0..={} under {:?}",
                    parent.children.len(),
                    parent.tag
                );
                parent.children.insert(index, child.tag);
            }
            Mutation::Remove {
                parent,
                child,
                index,
            } => {
                let index = index_to_usize(*index);
                let parent = self
                    .views
                    .get_mut(&parent.tag)
                    .unwrap_or_else(|| panic!("remove under unknown parent {:?}", parent.tag));
                assert!(
                    index < parent.children.len(),
                    "remove index {index} out of range 0..{} under {:?}",
                    parent.children.len(),
                    parent.tag
                );
                assert!(
                    parent.children[index] == child.tag,
                    "remove of mismatched child: expected {:?} at index {index} under {:?}, found {:?}",
                    child.tag,
                    parent.tag,
                    parent.children[index]
                );
                parent.children.remove(index);
            }
            Mutation::Update {
                old_child,
                new_child,
                index,
                ..
            } => {
                if *index == Mutation::ROOT_INDEX {
                    assert!(
                        new_child.tag == self.root_tag,
                        "root update targeting non-root view {:?}",
                        new_child.tag
                    );
                }
                let stored = self
                    .views
                    .get_mut(&new_child.tag)
                    .unwrap_or_else(|| panic!("update of unknown view {:?}", new_child.tag));
                assert!(
                    Arc::ptr_eq(&stored.props, &old_child.props)
                        && stored.layout_metrics == old_child.layout_metrics,
                    "update of view {:?} whose mounted state does not match the old view",
                    old_child.tag
                );
                stored.props = Arc::clone(&new_child.props);
                stored.layout_metrics = new_child.layout_metrics;
            }
        }
    }
}

fn index_to_usize(index: i32) -> usize {
    usize::try_from(index)
        .unwrap_or_else(|_| panic!("negative mutation index {index} outside a root update"))
}

/// A [`Mounter`] that records every transaction it receives.
#[derive(Default)]
pub struct RecordingMounter {
    transactions: Mutex<Vec<MountingTransaction>>,
}

impl std::fmt::Debug for RecordingMounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingMounter")
            .field("transactions", &self.transactions.lock().len())
            .finish()
    }
}

impl RecordingMounter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all recorded transactions, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<MountingTransaction> {
        std::mem::take(&mut self.transactions.lock())
    }

    /// Number of recorded transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.lock().len()
    }

    /// Returns whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.lock().is_empty()
    }
}

impl Mounter for RecordingMounter {
    fn mount(&self, transaction: MountingTransaction) {
        self.transactions.lock().push(transaction);
    }
}
