// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active touch bookkeeping: at most two tracked touches with position history.
//!
//! The store keeps touches in arrival order. A third touch is rejected until
//! one of the tracked touches ends.
//!
//! ```
//! use kurbo::Point;
//! use understory_pan_zoom::touches::{TouchId, TouchSampleStore};
//!
//! let mut store = TouchSampleStore::new();
//! assert!(store.insert(TouchId(1), Point::new(0.0, 0.0), 0.0));
//! assert!(store.insert(TouchId(2), Point::new(10.0, 0.0), 0.0));
//! assert!(!store.insert(TouchId(3), Point::new(5.0, 5.0), 0.0));
//!
//! store.update(TouchId(1), Point::new(-2.0, 0.0));
//! let first = store.primary().unwrap();
//! assert_eq!(first.previous, Point::new(0.0, 0.0));
//! assert_eq!(first.current, Point::new(-2.0, 0.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Maximum number of simultaneously tracked touches.
pub const MAX_TRACKED_TOUCHES: usize = 2;

/// Opaque touch identity, stable from touch-down to touch-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// One tracked touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    /// Identity assigned by the host.
    pub id: TouchId,
    /// Latest reported position (parent space).
    pub current: Point,
    /// Position before the latest update.
    pub previous: Point,
    /// Position at touch-down.
    pub start: Point,
    /// Controller clock (seconds) at touch-down.
    pub started_at: f64,
}

impl TouchSample {
    /// Movement applied by the latest update.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.current - self.previous
    }
}

/// Ordered collection of the active touches.
#[derive(Clone, Debug, Default)]
pub struct TouchSampleStore {
    samples: SmallVec<[TouchSample; MAX_TRACKED_TOUCHES]>,
}

impl TouchSampleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked touches (0, 1 or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no touch is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns `true` if `id` is currently tracked.
    #[must_use]
    pub fn contains(&self, id: TouchId) -> bool {
        self.get(id).is_some()
    }

    /// Looks up a tracked touch.
    #[must_use]
    pub fn get(&self, id: TouchId) -> Option<&TouchSample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// The earliest still-active touch.
    #[must_use]
    pub fn primary(&self) -> Option<&TouchSample> {
        self.samples.first()
    }

    /// Both touches, in arrival order, when exactly two are tracked.
    #[must_use]
    pub fn pair(&self) -> Option<(&TouchSample, &TouchSample)> {
        match self.samples.as_slice() {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }

    /// Starts tracking a touch.
    ///
    /// Returns `false` (and tracks nothing) if the store is full or `id` is
    /// already tracked.
    pub fn insert(&mut self, id: TouchId, position: Point, now: f64) -> bool {
        if self.samples.len() >= MAX_TRACKED_TOUCHES || self.contains(id) {
            return false;
        }
        self.samples.push(TouchSample {
            id,
            current: position,
            previous: position,
            start: position,
            started_at: now,
        });
        true
    }

    /// Records a new position for `id`.
    ///
    /// The other tracked touch did not move in this event, so its previous
    /// position is settled onto its current one. Returns the updated sample,
    /// or `None` if `id` is not tracked.
    pub fn update(&mut self, id: TouchId, position: Point) -> Option<TouchSample> {
        if !self.contains(id) {
            return None;
        }
        let mut updated = None;
        for sample in &mut self.samples {
            if sample.id == id {
                sample.previous = sample.current;
                sample.current = position;
                updated = Some(*sample);
            } else {
                sample.previous = sample.current;
            }
        }
        updated
    }

    /// Treats every touch's current position as its new reference point.
    pub fn reanchor(&mut self) {
        for sample in &mut self.samples {
            sample.previous = sample.current;
        }
    }

    /// Stops tracking `id`, returning its final sample.
    pub fn remove(&mut self, id: TouchId) -> Option<TouchSample> {
        let index = self.samples.iter().position(|s| s.id == id)?;
        Some(self.samples.remove(index))
    }
}
