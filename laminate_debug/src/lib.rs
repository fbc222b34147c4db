// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development and test tooling for laminate diagnostics.
//!
//! - [`stub::StubViewTree`] — an in-memory host-tree simulator that applies
//!   mutation lists with strict invariant checking, for verifying that a
//!   mutation stream converges a host tree onto the intended projection.
//! - [`stub::RecordingMounter`] — a [`Mounter`](laminate_core::tree::Mounter)
//!   that records transactions for inspection.
//! - [`pretty`] — human-readable one-line-per-mutation output.

pub mod pretty;
pub mod stub;
