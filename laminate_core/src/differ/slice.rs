// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child-pair slicing (view flattening) and sibling reordering.

use kurbo::Vec2;

use crate::node::ShadowNode;
use crate::view::{ShadowView, ShadowViewNodePair};

/// Produces the effective ordered child list of `node`: the children the
/// host tree will see as direct children once interior nodes that neither
/// form a view nor a stacking context are collapsed.
///
/// Flattened descendants are promoted into this list with their frames
/// translated into `node`'s coordinate space. A child that forms a stacking
/// context is emitted without recursing — its own children are sliced when
/// it is diffed as a parent in its own right.
///
/// If `node` forms a view but not a stacking context, the result is empty:
/// its children belong to the effective child list of `node`'s own parent,
/// not to `node`.
#[must_use]
pub fn slice_child_pairs(node: &ShadowNode) -> Vec<ShadowViewNodePair<'_>> {
    let mut pairs = Vec::new();

    if !node.traits().forms_stacking_context && node.traits().forms_view {
        return pairs;
    }

    slice_child_pairs_recursively(&mut pairs, Vec2::ZERO, node);
    pairs
}

fn slice_child_pairs_recursively<'a>(
    pairs: &mut Vec<ShadowViewNodePair<'a>>,
    layout_offset: Vec2,
    node: &'a ShadowNode,
) {
    for child in node.children() {
        let child = child.as_ref();
        let mut view = ShadowView::from(child);
        view.layout_metrics = view.layout_metrics.translated(layout_offset);

        if child.traits().forms_stacking_context {
            pairs.push(ShadowViewNodePair { view, node: child });
        } else {
            let child_offset = view.layout_metrics.frame.origin().to_vec2();

            if child.traits().forms_view {
                pairs.push(ShadowViewNodePair { view, node: child });
            }

            slice_child_pairs_recursively(pairs, child_offset, child);
        }
    }
}

/// Stable-sorts `pairs` by order index, in place, but only when at least
/// one element carries a non-zero index. Insertion order is preserved
/// whenever ordering is unused, which is the overwhelmingly common case.
pub(crate) fn reorder_in_place_if_needed(pairs: &mut [ShadowViewNodePair<'_>]) {
    if pairs.len() < 2 {
        return;
    }

    if pairs.iter().all(|pair| pair.node.order_index() == 0) {
        return;
    }

    pairs.sort_by_key(|pair| pair.node.order_index());
}
