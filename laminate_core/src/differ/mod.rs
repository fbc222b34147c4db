// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shadow-tree differentiator.
//!
//! Given two snapshots rooted in the same
//! [family](crate::node::ShadowNodeFamily), [`calculate_mutations`] computes
//! the ordered [`Mutation`] list whose in-order application converges a
//! host tree matching the old snapshot's flattened projection onto the new
//! snapshot's.
//!
//! The algorithm is deliberately optimized for simplicity over minimal edit
//! distance. Each recursion step diffs one pair of effective sibling lists
//! (see [`slice_child_pairs`]) in four stages:
//!
//! 1. **Prefix alignment** — walk both lists while tags match, emitting
//!    `Update`s for changed views and recursing into matched subtrees.
//! 2. **Tail insertions** — every new child past the aligned prefix gets an
//!    `Insert`, recorded in a tiny tag-keyed map of inserted pairs.
//! 3. **Tail removals** — every old child past the prefix gets a `Remove`;
//!    a tag absent from the inserted map is truly gone (`Delete` plus
//!    destructive recursion), a present one is a reorder (recurse if the
//!    views differ, then tombstone the map entry so stage 4 skips it).
//! 4. **Creations** — inserted tags still in the map never existed before:
//!    `Create` plus constructive recursion.
//!
//! The per-level accumulators are flushed into the caller's list in a fixed
//! order — destructive subtree work, updates, removes (reversed, so each
//! stored index is still valid when applied), deletes, creates,
//! non-destructive subtree work, inserts — which is exactly the order that
//! keeps every intermediate host-tree state well-formed.
//!
//! Diffing is pure and synchronous: no shared state, no suspension points.
//! Concurrent calls are safe as long as each call owns its pair of roots.

mod slice;
mod tiny_map;

pub use slice::slice_child_pairs;

use crate::mutation::Mutation;
use crate::node::ShadowNode;
use crate::view::{ShadowView, ShadowViewNodePair};

use slice::reorder_in_place_if_needed;
use tiny_map::TinyMap;

/// Selects the diffing algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DifferentiatorMode {
    /// The shipped four-stage algorithm.
    #[default]
    Classic,
    /// Reserved for a move-optimizing variant with the same external
    /// contract. Currently runs [`Classic`](Self::Classic).
    OptimizedMoves,
}

/// Calculates the mutation list that transforms the host tree matching
/// `old_root`'s flattened projection into one matching `new_root`'s.
///
/// When the root views themselves differ, the first mutation is an
/// `Update` with the sentinel parent and index
/// [`ROOT_INDEX`](Mutation::ROOT_INDEX).
///
/// # Panics
///
/// Panics if the roots do not belong to the same family.
#[must_use]
pub fn calculate_mutations(old_root: &ShadowNode, new_root: &ShadowNode) -> Vec<Mutation> {
    calculate_mutations_with_mode(old_root, new_root, DifferentiatorMode::default())
}

/// Like [`calculate_mutations`], with an explicit [`DifferentiatorMode`].
#[must_use]
pub fn calculate_mutations_with_mode(
    old_root: &ShadowNode,
    new_root: &ShadowNode,
    mode: DifferentiatorMode,
) -> Vec<Mutation> {
    assert!(
        old_root.same_family(new_root),
        "diffed roots must belong to the same family: {:?} vs {:?}",
        old_root.family(),
        new_root.family()
    );

    // `OptimizedMoves` shares the Classic implementation until the
    // alternative algorithm lands behind it.
    let _ = mode;

    let mut mutations = Vec::with_capacity(256);

    let old_root_view = ShadowView::from(old_root);
    let new_root_view = ShadowView::from(new_root);

    if old_root_view != new_root_view {
        mutations.push(Mutation::Update {
            parent: ShadowView::default(),
            old_child: old_root_view.clone(),
            new_child: new_root_view,
            index: Mutation::ROOT_INDEX,
        });
    }

    diff_children(
        &mut mutations,
        &old_root_view,
        slice_child_pairs(old_root),
        slice_child_pairs(new_root),
    );

    mutations
}

fn diff_children<'a>(
    mutations: &mut Vec<Mutation>,
    parent_view: &ShadowView,
    mut old_pairs: Vec<ShadowViewNodePair<'a>>,
    mut new_pairs: Vec<ShadowViewNodePair<'a>>,
) {
    if old_pairs.is_empty() && new_pairs.is_empty() {
        return;
    }

    reorder_in_place_if_needed(&mut old_pairs);
    reorder_in_place_if_needed(&mut new_pairs);

    let mut create_mutations = Vec::new();
    let mut delete_mutations = Vec::new();
    let mut insert_mutations = Vec::new();
    let mut remove_mutations = Vec::new();
    let mut update_mutations = Vec::new();
    let mut downward_mutations = Vec::new();
    let mut destructive_downward_mutations = Vec::new();

    // Maps inserted tags to their pairs in `new_pairs`.
    let mut inserted_pairs: TinyMap<&ShadowViewNodePair<'a>> = TinyMap::new();

    // Stage 1: prefix alignment and `Update` collection.
    let mut index = 0;
    while index < old_pairs.len() && index < new_pairs.len() {
        let old_pair = &old_pairs[index];
        let new_pair = &new_pairs[index];

        if old_pair.view.tag != new_pair.view.tag {
            // Totally different nodes; no further alignment is possible.
            break;
        }

        if old_pair.view != new_pair.view {
            update_mutations.push(Mutation::Update {
                parent: parent_view.clone(),
                old_child: old_pair.view.clone(),
                new_child: new_pair.view.clone(),
                index: as_index(index),
            });
        }

        let old_grandchild_pairs = slice_child_pairs(old_pair.node);
        let new_grandchild_pairs = slice_child_pairs(new_pair.node);
        // A subtree whose new layer is empty only removes things; its
        // mutations must precede the deletion of ancestors.
        let target = if new_grandchild_pairs.is_empty() {
            &mut destructive_downward_mutations
        } else {
            &mut downward_mutations
        };
        diff_children(
            target,
            &old_pair.view,
            old_grandchild_pairs,
            new_grandchild_pairs,
        );

        index += 1;
    }

    let last_index_after_first_stage = index;

    // Stage 2: `Insert` collection.
    for index in last_index_after_first_stage..new_pairs.len() {
        let new_pair = &new_pairs[index];

        insert_mutations.push(Mutation::Insert {
            parent: parent_view.clone(),
            child: new_pair.view.clone(),
            index: as_index(index),
        });

        inserted_pairs.insert(new_pair.view.tag, new_pair);
    }

    // Stage 3: `Remove` and `Delete` collection, reinsertion detection.
    for index in last_index_after_first_stage..old_pairs.len() {
        let old_pair = &old_pairs[index];

        // Even a view that is reinserted elsewhere must be removed from its
        // old position first.
        remove_mutations.push(Mutation::Remove {
            parent: parent_view.clone(),
            child: old_pair.view.clone(),
            index: as_index(index),
        });

        match inserted_pairs.find(old_pair.view.tag) {
            None => {
                // Truly gone: delete and clean up the entire subtree.
                delete_mutations.push(Mutation::Delete {
                    child: old_pair.view.clone(),
                });

                diff_children(
                    &mut destructive_downward_mutations,
                    &old_pair.view,
                    slice_child_pairs(old_pair.node),
                    Vec::new(),
                );
            }
            Some(slot) => {
                // Reinserted elsewhere in this sibling list.
                let new_pair = *inserted_pairs.get(slot);

                if new_pair.view != old_pair.view {
                    let old_grandchild_pairs = slice_child_pairs(old_pair.node);
                    let new_grandchild_pairs = slice_child_pairs(new_pair.node);
                    let target = if new_grandchild_pairs.is_empty() {
                        &mut destructive_downward_mutations
                    } else {
                        &mut downward_mutations
                    };
                    diff_children(
                        target,
                        &new_pair.view,
                        old_grandchild_pairs,
                        new_grandchild_pairs,
                    );
                }

                // Tombstone the entry: the view existed before, so stage 4
                // must not emit a `Create` for it.
                inserted_pairs.erase(slot);
            }
        }
    }

    // Stage 4: `Create` collection.
    for index in last_index_after_first_stage..new_pairs.len() {
        let new_pair = &new_pairs[index];

        if inserted_pairs.find(new_pair.view.tag).is_none() {
            // The view was reinserted, not created.
            continue;
        }

        create_mutations.push(Mutation::Create {
            child: new_pair.view.clone(),
        });

        diff_children(
            &mut downward_mutations,
            &new_pair.view,
            Vec::new(),
            slice_child_pairs(new_pair.node),
        );
    }

    // Flush in the unique order that keeps every intermediate host-tree
    // state well-formed.
    mutations.append(&mut destructive_downward_mutations);
    mutations.append(&mut update_mutations);
    mutations.extend(remove_mutations.into_iter().rev());
    mutations.append(&mut delete_mutations);
    mutations.append(&mut create_mutations);
    mutations.append(&mut downward_mutations);
    mutations.append(&mut insert_mutations);
}

fn as_index(index: usize) -> i32 {
    i32::try_from(index).expect("sibling list exceeds i32::MAX entries")
}
