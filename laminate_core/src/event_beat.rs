// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-delivery beats.
//!
//! An [`EventBeat`] is a thin callback surface between event producers and
//! the runtime that drains them: producers [`request`](EventBeat::request)
//! a beat when they have work queued, and the owner
//! [`induce`](EventBeat::induce)s it at a convenient synchronization point,
//! firing the callback only when a request is pending.
//!
//! The [`EventBeatRegistry`] ties beats to a periodic driver. A plain mutex
//! protects the set of weakly held beats; the tick snapshots the live beats
//! under the mutex and dispatches outside it, so callbacks may freely
//! register or unregister beats.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// A requestable event-delivery beat.
pub struct EventBeat {
    requested: AtomicBool,
    on_beat: Box<dyn Fn() + Send + Sync>,
}

impl std::fmt::Debug for EventBeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBeat")
            .field("requested", &self.requested.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventBeat {
    /// Creates a beat that invokes `on_beat` when induced after a request.
    #[must_use]
    pub fn new(on_beat: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            requested: AtomicBool::new(false),
            on_beat: Box::new(on_beat),
        }
    }

    /// Marks the beat as having pending work.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns whether a request is pending.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Consumes a pending request, firing the callback if one was set.
    pub fn induce(&self) {
        if self.requested.swap(false, Ordering::AcqRel) {
            (self.on_beat)();
        }
    }
}

/// The set of beats driven by a periodic tick.
///
/// Beats are held weakly: a beat dropped by its owner simply stops being
/// ticked, and the registry prunes the dead entry on the next tick.
#[derive(Default)]
pub struct EventBeatRegistry {
    beats: Mutex<Vec<Weak<EventBeat>>>,
}

impl std::fmt::Debug for EventBeatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBeatRegistry")
            .field("beats", &self.beats.lock().len())
            .finish()
    }
}

impl EventBeatRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a beat to the tick set.
    pub fn register(&self, beat: &Arc<EventBeat>) {
        self.beats.lock().push(Arc::downgrade(beat));
    }

    /// Removes a beat from the tick set. Silent when absent.
    pub fn unregister(&self, beat: &Arc<EventBeat>) {
        let mut beats = self.beats.lock();
        beats.retain(|candidate| {
            candidate
                .upgrade()
                .is_some_and(|live| !Arc::ptr_eq(&live, beat))
        });
    }

    /// Induces every live beat.
    ///
    /// The live set is snapshotted under the mutex and dispatched outside
    /// it; dead entries are pruned in the same pass.
    pub fn tick(&self) {
        let live: Vec<Arc<EventBeat>> = {
            let mut beats = self.beats.lock();
            beats.retain(|beat| beat.strong_count() > 0);
            beats.iter().filter_map(Weak::upgrade).collect()
        };

        for beat in live {
            beat.induce();
        }
    }
}
