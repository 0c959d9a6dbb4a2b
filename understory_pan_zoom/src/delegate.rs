// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callbacks fired by [`crate::PanZoomController`].
//!
//! Every driving method on the controller takes `&mut impl PanZoomDelegate`
//! and calls it inline, in event order. Since the controller is mutably
//! borrowed for the duration of the call, a delegate cannot reenter it.
//!
//! Hosts that prefer polling can pass a `Vec<PanZoomEvent>`:
//!
//! ```
//! use kurbo::Point;
//! use understory_pan_zoom::{PanZoomConfig, PanZoomController, PanZoomEvent, TouchId};
//!
//! let mut pz = PanZoomController::new(PanZoomConfig::default());
//! let mut events = Vec::new();
//! pz.touch_began(TouchId(1), Point::new(10.0, 10.0), 1, &mut events);
//! pz.touch_ended(TouchId(1), &mut events);
//! assert_eq!(
//!     events,
//!     [PanZoomEvent::Clicked { at: Point::new(10.0, 10.0), tap_count: 1 }]
//! );
//! ```

use alloc::vec::Vec;

use kurbo::Point;

/// Receiver of controller notifications. Every method defaults to doing nothing.
///
/// Positions are in parent space; convert with
/// [`Transform::parent_to_local`](crate::Transform::parent_to_local) to find
/// the content under the finger.
pub trait PanZoomDelegate {
    /// A tap was recognized. Only sent in [`PanZoomMode::Sheet`](crate::PanZoomMode::Sheet).
    fn clicked(&mut self, _at: Point, _tap_count: u32) {}

    /// The single held touch moved, or the content moved under it.
    fn touch_position_updated(&mut self, _position: Point) {}

    /// The touch started dragging; sent once per touch, with the position it
    /// moved away from.
    fn touch_move_began(&mut self, _at: Point) {}
}

impl PanZoomDelegate for () {}

/// Recorded delegate notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanZoomEvent {
    /// See [`PanZoomDelegate::clicked`].
    Clicked {
        /// Release position.
        at: Point,
        /// Platform tap count.
        tap_count: u32,
    },
    /// See [`PanZoomDelegate::touch_position_updated`].
    TouchPositionUpdated(Point),
    /// See [`PanZoomDelegate::touch_move_began`].
    TouchMoveBegan(Point),
}

impl PanZoomDelegate for Vec<PanZoomEvent> {
    fn clicked(&mut self, at: Point, tap_count: u32) {
        self.push(PanZoomEvent::Clicked { at, tap_count });
    }

    fn touch_position_updated(&mut self, position: Point) {
        self.push(PanZoomEvent::TouchPositionUpdated(position));
    }

    fn touch_move_began(&mut self, at: Point) {
        self.push(PanZoomEvent::TouchMoveBegan(at));
    }
}

impl<D: PanZoomDelegate + ?Sized> PanZoomDelegate for &mut D {
    fn clicked(&mut self, at: Point, tap_count: u32) {
        (**self).clicked(at, tap_count);
    }

    fn touch_position_updated(&mut self, position: Point) {
        (**self).touch_position_updated(position);
    }

    fn touch_move_began(&mut self, at: Point) {
        (**self).touch_move_began(at);
    }
}
