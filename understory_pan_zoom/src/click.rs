// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognition for a single touch: accumulate drag distance and decide
//! between click and drag.
//!
//! ## Usage
//!
//! 1) Call [`ClickDetector::on_down`] when the first touch lands.
//! 2) Feed every move of that touch to [`ClickDetector::on_move`]; it reports
//!    the moment the touch first starts moving.
//! 3) Call [`ClickDetector::invalidate`] if a second touch arrives.
//! 4) Call [`ClickDetector::on_up`] on release to learn whether it was a click.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_pan_zoom::click::ClickDetector;
//! use understory_pan_zoom::touches::TouchId;
//!
//! let mut clicks = ClickDetector::new(15.0);
//! clicks.on_down(TouchId(1), Point::new(0.0, 0.0), 1);
//!
//! // Small wobble: movement begins, but it is still a tap.
//! let began = clicks.on_move(TouchId(1), Point::new(5.0, 5.0));
//! assert_eq!(began, Some(Point::new(0.0, 0.0)));
//!
//! let click = clicks.on_up(TouchId(1), Point::new(5.0, 5.0)).unwrap();
//! assert_eq!(click.at, Point::new(5.0, 5.0));
//! assert_eq!(click.tap_count, 1);
//! ```

use kurbo::Point;

use crate::touches::TouchId;

/// Accumulated path length under which motion is treated as noise.
pub const NEGLIGIBLE_MOVE_DISTANCE: f64 = 0.5;

/// A recognized click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    /// Release position (parent space).
    pub at: Point,
    /// Tap count reported by the platform at touch-down.
    pub tap_count: u32,
}

/// Click candidate for the touch that started the interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickCandidate {
    /// Touch this candidate follows.
    pub id: TouchId,
    /// Tap count from the originating touch-down.
    pub tap_count: u32,
}

/// Path tracking for the single active touch.
///
/// Outlives the click candidate: a touch that can no longer click still
/// reports when it starts moving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveTrack {
    /// Touch being followed.
    pub id: TouchId,
    /// Last position seen for the touch.
    pub last_pos: Point,
    /// Accumulated path length.
    pub distance: f64,
    /// Whether the movement start was already reported.
    pub moving: bool,
}

impl MoveTrack {
    fn new(id: TouchId, pos: Point) -> Self {
        Self {
            id,
            last_pos: pos,
            distance: 0.0,
            moving: false,
        }
    }
}

/// Click/drag disambiguation for one touch lifetime.
#[derive(Clone, Debug)]
pub struct ClickDetector {
    max_distance: f64,
    candidate: Option<ClickCandidate>,
    track: Option<MoveTrack>,
}

impl ClickDetector {
    /// Creates a detector that rejects clicks dragged further than `max_distance`.
    #[must_use]
    pub fn new(max_distance: f64) -> Self {
        Self {
            max_distance,
            candidate: None,
            track: None,
        }
    }

    /// Changes the drag distance above which a tap is disqualified.
    pub fn set_max_distance(&mut self, max_distance: f64) {
        self.max_distance = max_distance;
    }

    /// Returns the live candidate, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&ClickCandidate> {
        self.candidate.as_ref()
    }

    /// Returns the path tracking of the active touch, if any.
    #[must_use]
    pub fn track(&self) -> Option<&MoveTrack> {
        self.track.as_ref()
    }

    /// Starts following `id` as a click candidate.
    pub fn on_down(&mut self, id: TouchId, pos: Point, tap_count: u32) {
        self.candidate = Some(ClickCandidate { id, tap_count });
        self.track = Some(MoveTrack::new(id, pos));
    }

    /// Accounts for a move of `id`.
    ///
    /// Returns the position the touch moved away from the first time its
    /// accumulated distance leaves the noise threshold. Fires at most once
    /// per touch lifetime, whether or not the touch can still click.
    pub fn on_move(&mut self, id: TouchId, pos: Point) -> Option<Point> {
        let track = self.track.as_mut().filter(|t| t.id == id)?;
        let from = track.last_pos;
        track.distance += from.distance(pos);
        track.last_pos = pos;

        let mut began = None;
        if !track.moving && track.distance > NEGLIGIBLE_MOVE_DISTANCE {
            track.moving = true;
            began = Some(from);
        }
        if track.distance > self.max_distance && self.candidate.is_some_and(|c| c.id == id) {
            self.candidate = None;
        }
        began
    }

    /// Makes `id` the active touch at `pos` without counting the jump as motion.
    ///
    /// Used when a touch is left alone after a pinch. A touch that was already
    /// followed keeps its path and movement state.
    pub fn follow(&mut self, id: TouchId, pos: Point) {
        match self.track.as_mut() {
            Some(track) if track.id == id => track.last_pos = pos,
            _ => self.track = Some(MoveTrack::new(id, pos)),
        }
    }

    /// Drops the candidate; no click will be reported for the current touch.
    pub fn invalidate(&mut self) {
        self.candidate = None;
    }

    /// Finishes the lifetime of `id`, returning a click if it still qualifies.
    pub fn on_up(&mut self, id: TouchId, pos: Point) -> Option<Click> {
        self.forget_track(id);
        let candidate = self.candidate.filter(|c| c.id == id)?;
        self.candidate = None;
        Some(Click {
            at: pos,
            tap_count: candidate.tap_count,
        })
    }

    /// Forgets everything about `id` without reporting a click.
    pub fn cancel(&mut self, id: TouchId) {
        self.forget_track(id);
        if self.candidate.is_some_and(|c| c.id == id) {
            self.candidate = None;
        }
    }

    fn forget_track(&mut self, id: TouchId) {
        if self.track.is_some_and(|t| t.id == id) {
            self.track = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Click, ClickDetector};
    use crate::touches::TouchId;

    const T: TouchId = TouchId(1);

    #[test]
    fn short_wobble_is_a_click() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 2);
        clicks.on_move(T, Point::new(5.0, 5.0));
        assert_eq!(
            clicks.on_up(T, Point::new(5.0, 5.0)),
            Some(Click {
                at: Point::new(5.0, 5.0),
                tap_count: 2,
            })
        );
    }

    #[test]
    fn long_drag_disqualifies_and_reports_move_start() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        let began = clicks.on_move(T, Point::new(20.0, 0.0));
        assert_eq!(began, Some(Point::ORIGIN));
        assert!(clicks.candidate().is_none());

        // Coming back does not restore the candidate.
        assert_eq!(clicks.on_move(T, Point::ORIGIN), None);
        assert_eq!(clicks.on_up(T, Point::ORIGIN), None);
    }

    #[test]
    fn distance_accumulates_along_the_path() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        clicks.on_move(T, Point::new(6.0, 0.0));
        clicks.on_move(T, Point::new(0.0, 0.0));
        assert!(clicks.candidate().is_some());
        clicks.on_move(T, Point::new(0.0, 8.0));
        // 20 units travelled, displacement only 8.
        assert_eq!(clicks.on_up(T, Point::new(0.0, 8.0)), None);
    }

    #[test]
    fn move_began_fires_once() {
        let mut clicks = ClickDetector::new(100.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        assert_eq!(clicks.on_move(T, Point::new(0.2, 0.0)), None);
        assert_eq!(
            clicks.on_move(T, Point::new(2.0, 0.0)),
            Some(Point::new(0.2, 0.0))
        );
        assert_eq!(clicks.on_move(T, Point::new(4.0, 0.0)), None);
    }

    #[test]
    fn invalidate_blocks_click() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        clicks.invalidate();
        // Movement is still reported for a touch that cannot click.
        assert_eq!(clicks.on_move(T, Point::new(3.0, 0.0)), Some(Point::ORIGIN));
        assert_eq!(clicks.on_up(T, Point::new(3.0, 0.0)), None);
    }

    #[test]
    fn move_began_fires_even_with_tiny_click_distance() {
        let mut clicks = ClickDetector::new(0.2);
        clicks.on_down(T, Point::ORIGIN, 1);
        assert_eq!(clicks.on_move(T, Point::new(0.3, 0.0)), None);
        assert!(clicks.candidate().is_none());
        assert_eq!(
            clicks.on_move(T, Point::new(40.0, 0.0)),
            Some(Point::new(0.3, 0.0))
        );
    }

    #[test]
    fn follow_resyncs_without_counting_the_jump() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        clicks.invalidate();
        clicks.follow(T, Point::new(100.0, 0.0));
        assert_eq!(clicks.track().map(|t| t.distance), Some(0.0));
        assert_eq!(
            clicks.on_move(T, Point::new(110.0, 0.0)),
            Some(Point::new(100.0, 0.0))
        );

        // A different touch starts a fresh track.
        let other = TouchId(2);
        clicks.follow(other, Point::new(5.0, 5.0));
        assert_eq!(clicks.on_move(T, Point::new(120.0, 0.0)), None);
        assert_eq!(
            clicks.on_move(other, Point::new(5.0, 10.0)),
            Some(Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn other_touch_ids_are_ignored() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        assert_eq!(clicks.on_move(TouchId(9), Point::new(50.0, 0.0)), None);
        assert_eq!(clicks.on_up(TouchId(9), Point::new(50.0, 0.0)), None);
        assert!(clicks.on_up(T, Point::ORIGIN).is_some());
    }

    #[test]
    fn cancel_never_clicks() {
        let mut clicks = ClickDetector::new(15.0);
        clicks.on_down(T, Point::ORIGIN, 1);
        clicks.cancel(T);
        assert!(clicks.candidate().is_none());
        assert!(clicks.track().is_none());
        assert_eq!(clicks.on_up(T, Point::ORIGIN), None);
    }
}
