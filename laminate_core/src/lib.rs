// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow-tree differentiation and surface lifecycle for host-view mounting.
//!
//! `laminate_core` keeps a platform-native view hierarchy (the *host tree*)
//! converged with immutable snapshots of a UI scene graph (the *shadow
//! tree*). Each commit produces a new snapshot; the differentiator compares
//! the previous and new snapshots and emits a linearly ordered list of
//! primitive [`Mutation`]s whose in-order application transforms the host
//! tree to match the new snapshot.
//!
//! # Architecture
//!
//! The crate is organized around the commit path that turns snapshot pairs
//! into mounted host views:
//!
//! ```text
//!   SurfaceHandler ──► UiManager::start_surface() ──► ShadowTree
//!                                                         │
//!   ShadowTree::commit(f) ──► calculate_mutations(old, new)
//!                                       │
//!                                       ▼
//!   MountingTransaction ──► Mounter::mount() ──► host view tree
//! ```
//!
//! **[`node`]** — Immutable, structurally shared shadow nodes with stable
//! [`Tag`](id::Tag) identities, flattening [`traits`], and an ordered child
//! list. New generations are produced with
//! [`clone_with`](node::ShadowNode::clone_with), reusing unchanged subtrees.
//!
//! **[`view`]** — [`ShadowView`](view::ShadowView), the value-type projection
//! of a node that carries exactly the fields affecting host-side appearance.
//!
//! **[`differ`]** — The recursive tree differentiator: view flattening,
//! stable sibling reordering, reinsertion detection, and the strict flush
//! ordering of the emitted mutation stream.
//!
//! **[`mutation`]** — The five primitive host-tree operations.
//!
//! **[`tree`]** — [`ShadowTree`](tree::ShadowTree), the per-surface
//! commit-and-mount pipeline, and the [`Mounter`](tree::Mounter) trait that
//! platform backends implement to apply transactions to native trees.
//!
//! **[`registry`]** — Surface-indexed store of live trees under a
//! reader/writer lock.
//!
//! **[`surface`]** — Per-surface lifecycle state machine
//! (Unregistered → Registered → Running) with separately locked link and
//! parameter halves.
//!
//! **[`event_beat`]** — Requestable event-delivery beats and their registry.
//!
//! **[`text`]** — Attributed-string assembly from text-bearing subtrees.
//!
//! # Threading
//!
//! The differentiator is purely functional and synchronous: it may run
//! concurrently from any number of threads as long as each call diffs its
//! own pair of snapshots. All shared state (registry, surface handlers,
//! trees, event beats) is synchronized internally; see the module docs for
//! the locking discipline of each.

pub mod differ;
pub mod event_beat;
pub mod id;
pub mod layout;
pub mod mutation;
pub mod node;
pub mod props;
pub mod registry;
pub mod surface;
pub mod text;
pub mod traits;
pub mod tree;
pub mod view;

pub use differ::{calculate_mutations, slice_child_pairs, DifferentiatorMode};
pub use mutation::Mutation;
