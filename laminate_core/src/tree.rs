// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface shadow trees and the commit-and-mount pipeline.
//!
//! A [`ShadowTree`] owns the current committed snapshot for one surface and
//! the bookkeeping needed to keep a host tree converged with it: the last
//! snapshot that was actually mounted, a monotonic commit counter, and the
//! [`CommitMode`] gate. Each successful commit diffs the last-mounted root
//! against the new root and hands the resulting [`MountingTransaction`] to
//! the [`Mounter`].
//!
//! # Locking
//!
//! One writer lock serializes commits; the mounter runs *while the commit
//! lock is held*, so transactions reach it in commit order and never
//! interleave. The mounter must not reenter the tree.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::differ::calculate_mutations;
use crate::id::SurfaceId;
use crate::mutation::Mutation;
use crate::node::SharedShadowNode;

/// Whether commits reach the host tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommitMode {
    /// Commits are diffed and mounted normally.
    #[default]
    Normal,
    /// Commits advance the tree but nothing is mounted. Switching back to
    /// [`Normal`](Self::Normal) mounts everything committed meanwhile in
    /// one catch-up transaction.
    Suspended,
}

/// Outcome of a [`ShadowTree::commit`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitStatus {
    /// The new root was committed (and mounted, unless suspended).
    Succeeded,
    /// The commit function declined to produce a new root.
    Cancelled,
}

/// Timing observations for one transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionTelemetry {
    /// Wall-clock time spent in the differentiator.
    pub diff_duration: Duration,
}

/// One commit's ordered mutation output, as handed to the [`Mounter`].
#[derive(Debug)]
pub struct MountingTransaction {
    /// The surface the mutations apply to.
    pub surface_id: SurfaceId,
    /// Monotonic commit number within this tree.
    pub number: u64,
    /// The ordered mutation list; apply strictly in order.
    pub mutations: Vec<Mutation>,
    /// Timing observations for this transaction.
    pub telemetry: TransactionTelemetry,
}

/// Applies mounting transactions to a platform-native view hierarchy.
///
/// Platform backends implement this to translate mutations into native view
/// operations; `laminate_debug` provides a strict in-memory simulator for
/// tests. Transactions arrive in commit order and must be applied
/// completely, in order, before the next one. Implementations must not call
/// back into the [`ShadowTree`] that invoked them.
pub trait Mounter: Send + Sync {
    /// Applies one transaction to the backing host tree.
    fn mount(&self, transaction: MountingTransaction);
}

struct TreeInner {
    root: SharedShadowNode,
    last_mounted_root: SharedShadowNode,
    commit_number: u64,
    commit_mode: CommitMode,
}

/// The committed shadow tree of one surface.
pub struct ShadowTree {
    surface_id: SurfaceId,
    mounter: Arc<dyn Mounter>,
    inner: RwLock<TreeInner>,
}

impl std::fmt::Debug for ShadowTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowTree")
            .field("surface_id", &self.surface_id)
            .finish_non_exhaustive()
    }
}

impl ShadowTree {
    /// Creates a tree seeded with `root` (typically a childless root node).
    ///
    /// The seed is considered already mounted; host views appear with the
    /// first commit that adds content.
    #[must_use]
    pub fn new(surface_id: SurfaceId, root: SharedShadowNode, mounter: Arc<dyn Mounter>) -> Self {
        Self {
            surface_id,
            mounter,
            inner: RwLock::new(TreeInner {
                last_mounted_root: Arc::clone(&root),
                root,
                commit_number: 0,
                commit_mode: CommitMode::Normal,
            }),
        }
    }

    /// The surface this tree belongs to.
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// A snapshot handle to the current committed root.
    #[must_use]
    pub fn root(&self) -> SharedShadowNode {
        Arc::clone(&self.inner.read().root)
    }

    /// The current commit mode.
    #[must_use]
    pub fn commit_mode(&self) -> CommitMode {
        self.inner.read().commit_mode
    }

    /// Commits the root produced by `commit_fn`, diffing and mounting the
    /// result unless the tree is suspended.
    ///
    /// `commit_fn` receives the current root and returns the replacement,
    /// or `None` to cancel. It runs under the commit lock and must not
    /// touch this tree.
    ///
    /// # Panics
    ///
    /// Panics if the replacement root is not of the same family as the
    /// current root.
    pub fn commit(
        &self,
        commit_fn: impl FnOnce(&SharedShadowNode) -> Option<SharedShadowNode>,
    ) -> CommitStatus {
        let mut inner = self.inner.write();

        let Some(new_root) = commit_fn(&inner.root) else {
            return CommitStatus::Cancelled;
        };
        assert!(
            inner.root.same_family(&new_root),
            "commit must preserve the root family"
        );

        inner.root = new_root;
        inner.commit_number += 1;

        if inner.commit_mode == CommitMode::Normal {
            self.mount_pending(&mut inner);
        }

        CommitStatus::Succeeded
    }

    /// Commits a childless clone of the current root, tearing down every
    /// mounted host view of the surface.
    pub fn commit_empty(&self) -> CommitStatus {
        self.commit(|root| {
            if root.children().is_empty() {
                return None;
            }
            Some(Arc::new(root.clone_with(None, Some(Vec::new()))))
        })
    }

    /// Switches the commit mode.
    ///
    /// Leaving [`Suspended`](CommitMode::Suspended) mounts everything
    /// committed while suspended as a single catch-up transaction.
    pub fn set_commit_mode(&self, commit_mode: CommitMode) {
        let mut inner = self.inner.write();
        if inner.commit_mode == commit_mode {
            return;
        }
        inner.commit_mode = commit_mode;

        if commit_mode == CommitMode::Normal {
            self.mount_pending(&mut inner);
        }
    }

    /// Diffs the last-mounted root against the current root and dispatches
    /// the transaction. No-op when nothing changed.
    fn mount_pending(&self, inner: &mut TreeInner) {
        if Arc::ptr_eq(&inner.last_mounted_root, &inner.root) {
            return;
        }

        let diff_start = Instant::now();
        let mutations = calculate_mutations(&inner.last_mounted_root, &inner.root);
        let telemetry = TransactionTelemetry {
            diff_duration: diff_start.elapsed(),
        };

        inner.last_mounted_root = Arc::clone(&inner.root);

        log::trace!(
            "surface {:?}: commit {} produced {} mutation(s) in {:?}",
            self.surface_id,
            inner.commit_number,
            mutations.len(),
            telemetry.diff_duration,
        );

        self.mounter.mount(MountingTransaction {
            surface_id: self.surface_id,
            number: inner.commit_number,
            mutations,
            telemetry,
        });
    }
}
