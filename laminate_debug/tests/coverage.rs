// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end differentiator coverage: every mutation stream must converge
//! a simulated host tree from the old snapshot's flattened projection onto
//! the new snapshot's, while satisfying the stream invariants
//! (create-before-insert, remove-before-delete, valid indices — the stub
//! tree panics on any violation).

use std::sync::Arc;

use kurbo::Rect;

use laminate_core::calculate_mutations;
use laminate_core::id::{SurfaceId, Tag};
use laminate_core::layout::LayoutMetrics;
use laminate_core::node::{ShadowNode, ShadowNodeFamily, SharedShadowNode};
use laminate_core::props::Props;
use laminate_core::traits::NodeTraits;
use laminate_core::Mutation;
use laminate_debug::pretty::format_mutations;
use laminate_debug::stub::StubViewTree;

fn family(tag: i32) -> ShadowNodeFamily {
    ShadowNodeFamily {
        tag: Tag(tag),
        surface_id: SurfaceId(1),
        component_name: "View",
    }
}

fn leaf(tag: i32) -> SharedShadowNode {
    Arc::new(ShadowNode::new(
        family(tag),
        NodeTraits::stacking_context(),
        Arc::new(Props::default()),
    ))
}

fn container(tag: i32, children: Vec<SharedShadowNode>) -> ShadowNode {
    ShadowNode::new(
        family(tag),
        NodeTraits::stacking_context(),
        Arc::new(Props::default()),
    )
    .with_children(children)
}

/// Same-family roots sharing one props handle, so no root update is
/// emitted.
fn roots(
    old_children: Vec<SharedShadowNode>,
    new_children: Vec<SharedShadowNode>,
) -> (ShadowNode, ShadowNode) {
    let old = container(1, old_children);
    let new = old.clone_with(None, Some(new_children));
    (old, new)
}

/// Diffs, applies to a stub host tree matching `old`, and asserts the
/// result matches `new`. Returns the mutations for further inspection.
fn assert_converges(old: &ShadowNode, new: &ShadowNode) -> Vec<Mutation> {
    let mutations = calculate_mutations(old, new);
    let mut host = StubViewTree::from_shadow_node(old);
    host.mount(&mutations);
    let expected = StubViewTree::from_shadow_node(new);
    assert!(
        host == expected,
        "host tree did not converge; mutations were:\n{}",
        format_mutations(&mutations)
    );
    mutations
}

fn creates(mutations: &[Mutation]) -> Vec<Tag> {
    mutations
        .iter()
        .filter_map(|mutation| match mutation {
            Mutation::Create { child } => Some(child.tag),
            _ => None,
        })
        .collect()
}

fn deletes(mutations: &[Mutation]) -> Vec<Tag> {
    mutations
        .iter()
        .filter_map(|mutation| match mutation {
            Mutation::Delete { child } => Some(child.tag),
            _ => None,
        })
        .collect()
}

#[test]
fn identical_trees_diff_to_nothing() {
    let subtree = Arc::new(container(2, vec![leaf(3), leaf(4)]));
    let (old, new) = roots(vec![Arc::clone(&subtree)], vec![subtree]);
    assert!(calculate_mutations(&old, &new).is_empty());
}

#[test]
fn prepend_one_child() {
    let a = leaf(2);
    let b = leaf(3);
    let (old, new) = roots(vec![Arc::clone(&a)], vec![Arc::clone(&b), a]);

    let mutations = assert_converges(&old, &new);
    // B is brand new; A already existed, so the reorder machinery must not
    // create (or delete) it.
    assert_eq!(creates(&mutations), vec![Tag(3)]);
    assert!(deletes(&mutations).is_empty());
}

#[test]
fn remove_middle_child_emits_the_pinned_stream() {
    let a = leaf(2);
    let b = leaf(3);
    let c = leaf(4);
    let (old, new) = roots(
        vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&c)],
        vec![a, c],
    );

    let mutations = assert_converges(&old, &new);
    // Removes run high-to-low so stored indices stay valid; B is truly
    // deleted while C is reinserted without a create.
    match &mutations[..] {
        [Mutation::Remove { child: first, index: 2, .. }, Mutation::Remove { child: second, index: 1, .. }, Mutation::Delete { child: deleted }, Mutation::Insert { child: inserted, index: 1, .. }] =>
        {
            assert_eq!(first.tag, Tag(4));
            assert_eq!(second.tag, Tag(3));
            assert_eq!(deleted.tag, Tag(3));
            assert_eq!(inserted.tag, Tag(4));
        }
        other => panic!("unexpected stream:\n{}", format_mutations(other)),
    }
}

#[test]
fn pure_update_touches_nothing_else() {
    let before = leaf(2);
    let after = Arc::new(before.clone_with(Some(Arc::new(Props::default())), None));
    let (old, new) = roots(vec![before], vec![after]);

    let mutations = assert_converges(&old, &new);
    assert!(matches!(
        mutations[..],
        [Mutation::Update { index: 0, .. }]
    ));
}

#[test]
fn swap_two_children_reorders_without_create_or_delete() {
    let a = leaf(2);
    let b = leaf(3);
    let (old, new) = roots(vec![Arc::clone(&a), Arc::clone(&b)], vec![b, a]);

    let mutations = assert_converges(&old, &new);
    assert!(creates(&mutations).is_empty());
    assert!(deletes(&mutations).is_empty());
    match &mutations[..] {
        [Mutation::Remove { index: 1, .. }, Mutation::Remove { index: 0, .. }, Mutation::Insert { child: first_in, index: 0, .. }, Mutation::Insert { child: second_in, index: 1, .. }] =>
        {
            assert_eq!(first_in.tag, Tag(3));
            assert_eq!(second_in.tag, Tag(2));
        }
        other => panic!("unexpected stream:\n{}", format_mutations(other)),
    }
}

#[test]
fn deep_replace_cleans_up_and_builds_in_safe_order() {
    let x = leaf(10);
    let a = Arc::new(container(2, vec![x]));
    let y = leaf(20);
    let b = Arc::new(container(3, vec![y]));
    let (old, new) = roots(vec![a], vec![b]);

    let mutations = assert_converges(&old, &new);
    // The stub tree already enforces ordering; additionally pin the exact
    // stream: X's destructive removal precedes A's delete, B's create
    // precedes Y's insert under it, and the top-level insert comes last.
    match &mutations[..] {
        [Mutation::Remove { child: removed_x, index: 0, .. }, Mutation::Delete { child: deleted_x }, Mutation::Remove { child: removed_a, index: 0, .. }, Mutation::Delete { child: deleted_a }, Mutation::Create { child: created_b }, Mutation::Create { child: created_y }, Mutation::Insert { parent: inner_parent, child: inserted_y, index: 0 }, Mutation::Insert { child: inserted_b, index: 0, .. }] =>
        {
            assert_eq!(removed_x.tag, Tag(10));
            assert_eq!(deleted_x.tag, Tag(10));
            assert_eq!(removed_a.tag, Tag(2));
            assert_eq!(deleted_a.tag, Tag(2));
            assert_eq!(created_b.tag, Tag(3));
            assert_eq!(created_y.tag, Tag(20));
            assert_eq!(inner_parent.tag, Tag(3));
            assert_eq!(inserted_y.tag, Tag(20));
            assert_eq!(inserted_b.tag, Tag(3));
        }
        other => panic!("unexpected stream:\n{}", format_mutations(other)),
    }
}

#[test]
fn root_identity_change_leads_the_stream() {
    let a = leaf(2);
    let old = container(1, vec![Arc::clone(&a)]);
    let new = old.clone_with(Some(Arc::new(Props::default())), Some(vec![a, leaf(3)]));

    let mutations = calculate_mutations(&old, &new);
    assert!(matches!(
        mutations[0],
        Mutation::Update {
            index: Mutation::ROOT_INDEX,
            ..
        }
    ));

    let mut host = StubViewTree::from_shadow_node(&old);
    host.mount(&mutations);
    assert_eq!(host, StubViewTree::from_shadow_node(&new));
}

#[test]
fn flattened_wrappers_promote_children_with_accumulated_offsets() {
    // root -> wrapper(flattened, at (10, 20)) -> inner(flattened, at (1, 2))
    //      -> leaf(view, at (5, 5)).
    let leaf_node = Arc::new(
        ShadowNode::new(family(4), NodeTraits::view(), Arc::new(Props::default()))
            .with_layout_metrics(LayoutMetrics::with_frame(Rect::new(5.0, 5.0, 25.0, 25.0))),
    );
    let inner = Arc::new(
        ShadowNode::new(family(3), NodeTraits::flattened(), Arc::new(Props::default()))
            .with_layout_metrics(LayoutMetrics::with_frame(Rect::new(1.0, 2.0, 90.0, 90.0)))
            .with_children(vec![leaf_node]),
    );
    let wrapper = Arc::new(
        ShadowNode::new(family(2), NodeTraits::flattened(), Arc::new(Props::default()))
            .with_layout_metrics(LayoutMetrics::with_frame(Rect::new(10.0, 20.0, 110.0, 120.0)))
            .with_children(vec![inner]),
    );
    let empty = container(1, Vec::new());
    let populated = empty.clone_with(None, Some(vec![wrapper]));

    let mutations = assert_converges(&empty, &populated);
    // Only the leaf forms a view; the wrappers vanish and their origins
    // accumulate into its frame.
    assert_eq!(creates(&mutations), vec![Tag(4)]);
    let inserted_frame = mutations
        .iter()
        .find_map(|mutation| match mutation {
            Mutation::Insert { child, .. } => Some(child.layout_metrics.frame),
            _ => None,
        })
        .expect("leaf must be inserted");
    assert_eq!(inserted_frame, Rect::new(16.0, 27.0, 36.0, 47.0));
}

#[test]
fn order_index_positions_children_deterministically() {
    let first = Arc::new(
        ShadowNode::new(
            family(2),
            NodeTraits::stacking_context(),
            Arc::new(Props::default()),
        )
        .with_order_index(5),
    );
    let second = Arc::new(
        ShadowNode::new(
            family(3),
            NodeTraits::stacking_context(),
            Arc::new(Props::default()),
        )
        .with_order_index(-1),
    );
    let (old, new) = roots(Vec::new(), vec![first, second]);

    let mutations = assert_converges(&old, &new);
    let inserts: Vec<_> = mutations
        .iter()
        .filter_map(|mutation| match mutation {
            Mutation::Insert { child, index, .. } => Some((child.tag, *index)),
            _ => None,
        })
        .collect();
    assert_eq!(inserts, vec![(Tag(3), 0), (Tag(2), 1)]);
}

#[test]
fn reparenting_appears_as_delete_plus_create() {
    // The leaf moves from container A to container B: no cross-parent move
    // detection, so it must be deleted under A and created under B.
    let moved = leaf(10);
    let a_old = Arc::new(container(2, vec![Arc::clone(&moved)]));
    let b_old = Arc::new(container(3, Vec::new()));
    let a_new = Arc::new(a_old.clone_with(None, Some(Vec::new())));
    let b_new = Arc::new(b_old.clone_with(None, Some(vec![moved])));
    let (old, new) = roots(vec![a_old, b_old], vec![a_new, b_new]);

    let mutations = assert_converges(&old, &new);
    assert_eq!(deletes(&mutations), vec![Tag(10)]);
    assert_eq!(creates(&mutations), vec![Tag(10)]);
}

#[test]
fn kitchen_sink_converges() {
    // Shared, unchanged subtree.
    let stable = Arc::new(container(20, vec![leaf(21), leaf(22)]));
    // Subtree that changes internally.
    let churn_old = Arc::new(container(30, vec![leaf(31), leaf(32), leaf(33)]));
    let churn_new = Arc::new(churn_old.clone_with(
        None,
        Some(vec![
            leaf(33),
            Arc::new(container(34, vec![leaf(35)])),
            leaf(31),
        ]),
    ));
    // Subtree that disappears entirely.
    let doomed = Arc::new(container(40, vec![leaf(41), Arc::new(container(42, vec![leaf(43)]))]));
    // Flattened wrapper whose children surface at the root level.
    let wrapped = Arc::new(
        ShadowNode::new(family(50), NodeTraits::flattened(), Arc::new(Props::default()))
            .with_children(vec![leaf(51)]),
    );

    let (old, new) = roots(
        vec![Arc::clone(&stable), churn_old, doomed],
        vec![stable, churn_new, wrapped],
    );

    let mutations = assert_converges(&old, &new);
    // The stable subtree is untouched.
    assert!(!mutations.iter().any(|mutation| match mutation {
        Mutation::Create { child } | Mutation::Delete { child } => {
            matches!(child.tag, Tag(20 | 21 | 22))
        }
        _ => false,
    }));
    // The doomed subtree is fully deleted, children before parents.
    let deleted = deletes(&mutations);
    for tag in [41, 43, 42, 40] {
        assert!(deleted.contains(&Tag(tag)), "missing delete of {tag}");
    }
    let position = |tag: i32| deleted.iter().position(|t| *t == Tag(tag)).unwrap();
    assert!(position(43) < position(42));
}

#[test]
fn concurrent_diffs_over_shared_snapshots_agree() {
    // The differentiator is pure: concurrent calls over the same shared
    // snapshots must all produce the same stream.
    let stable = Arc::new(container(20, vec![leaf(21), leaf(22)]));
    let old = Arc::new(container(1, vec![Arc::clone(&stable), leaf(30)]));
    let new = Arc::new(old.clone_with(None, Some(vec![stable, leaf(31)])));

    let baseline = calculate_mutations(&old, &new);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let old = Arc::clone(&old);
            let new = Arc::clone(&new);
            std::thread::spawn(move || calculate_mutations(&old, &new))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), baseline);
    }
}

#[test]
fn updates_propagate_through_matched_prefixes() {
    let grandchild_old = leaf(10);
    let grandchild_new =
        Arc::new(grandchild_old.clone_with(Some(Arc::new(Props::default())), None));
    let child_old = Arc::new(container(2, vec![grandchild_old]));
    let child_new = Arc::new(child_old.clone_with(None, Some(vec![grandchild_new])));
    let (old, new) = roots(vec![child_old], vec![child_new]);

    let mutations = assert_converges(&old, &new);
    match &mutations[..] {
        [Mutation::Update {
            parent,
            new_child,
            index: 0,
            ..
        }] => {
            assert_eq!(parent.tag, Tag(2));
            assert_eq!(new_child.tag, Tag(10));
        }
        other => panic!("unexpected stream:\n{}", format_mutations(other)),
    }
}
