// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-hold autoscroll zones for [`PanZoomMode::Frame`](crate::PanZoomMode::Frame).
//!
//! Each edge of the pan bounds has a zone of configurable width extending
//! inward. A touch inside a zone scrolls the content so that more of the area
//! beyond that edge comes into view. Speed grows linearly from `min_speed` at
//! the zone's inner boundary to `max_speed` at the bounds edge; contributions
//! from several edges add up.
//!
//! ```
//! use kurbo::{Insets, Point, Rect};
//! use understory_pan_zoom::frame::FrameZoneState;
//!
//! let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
//! let zones = FrameZoneState::compute(
//!     bounds,
//!     Insets::uniform(100.0),
//!     Point::new(0.0, 200.0),
//!     100.0,
//!     1000.0,
//! );
//! assert!(zones.left);
//! assert_eq!(zones.velocity.x, 1000.0);
//! assert_eq!(zones.velocity.y, 0.0);
//! ```

use kurbo::{Insets, Point, Rect, Vec2};

/// Which zones a touch is in and the resulting scroll velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameZoneState {
    /// Touch is inside the left zone.
    pub left: bool,
    /// Touch is inside the top zone.
    pub top: bool,
    /// Touch is inside the right zone.
    pub right: bool,
    /// Touch is inside the bottom zone.
    pub bottom: bool,
    /// Content velocity in parent units per second.
    pub velocity: Vec2,
}

impl FrameZoneState {
    /// Evaluates the zones for a touch at `touch` (parent space).
    ///
    /// `margins` holds the zone widths (`x0` left, `y0` top, `x1` right,
    /// `y1` bottom). A zero width disables that edge.
    #[must_use]
    pub fn compute(
        bounds: Rect,
        margins: Insets,
        touch: Point,
        min_speed: f64,
        max_speed: f64,
    ) -> Self {
        let speed = |distance: f64, margin: f64| edge_speed(distance, margin, min_speed, max_speed);

        let left = speed(touch.x - bounds.x0, margins.x0);
        let top = speed(touch.y - bounds.y0, margins.y0);
        let right = speed(bounds.x1 - touch.x, margins.x1);
        let bottom = speed(bounds.y1 - touch.y, margins.y1);

        // Near the left edge the content slides right to reveal what lies
        // beyond it, and so on for the other edges (y grows downward).
        let velocity = Vec2::new(
            left.unwrap_or(0.0) - right.unwrap_or(0.0),
            top.unwrap_or(0.0) - bottom.unwrap_or(0.0),
        );

        Self {
            left: left.is_some(),
            top: top.is_some(),
            right: right.is_some(),
            bottom: bottom.is_some(),
            velocity,
        }
    }

    /// Returns `true` if the touch is in at least one zone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.left || self.top || self.right || self.bottom
    }
}

/// Scroll speed for a touch `distance` inside an edge with a zone of width `margin`.
///
/// Depth into the zone is `margin - distance`, clamped to `[0, margin]`.
/// Returns `None` outside the zone (depth zero) or when the zone is disabled.
#[must_use]
pub fn edge_speed(distance: f64, margin: f64, min_speed: f64, max_speed: f64) -> Option<f64> {
    if margin <= 0.0 {
        return None;
    }
    let depth = (margin - distance).clamp(0.0, margin);
    if depth <= 0.0 {
        return None;
    }
    Some(min_speed + (max_speed - min_speed) * (depth / margin))
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Point, Rect, Vec2};

    use super::{FrameZoneState, edge_speed};

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 400.0);

    fn zones(p: Point) -> FrameZoneState {
        FrameZoneState::compute(BOUNDS, Insets::uniform(100.0), p, 100.0, 1000.0)
    }

    #[test]
    fn speed_ramps_from_min_to_max() {
        assert_eq!(edge_speed(0.0, 100.0, 100.0, 1000.0), Some(1000.0));
        assert_eq!(edge_speed(50.0, 100.0, 100.0, 1000.0), Some(550.0));
        let near_outer = edge_speed(99.999, 100.0, 100.0, 1000.0).unwrap();
        assert!((near_outer - 100.0).abs() < 0.1);
        assert_eq!(edge_speed(100.0, 100.0, 100.0, 1000.0), None);
        assert_eq!(edge_speed(150.0, 100.0, 100.0, 1000.0), None);
    }

    #[test]
    fn beyond_the_edge_saturates() {
        assert_eq!(edge_speed(-40.0, 100.0, 100.0, 1000.0), Some(1000.0));
    }

    #[test]
    fn disabled_edge() {
        assert_eq!(edge_speed(0.0, 0.0, 100.0, 1000.0), None);
    }

    #[test]
    fn center_is_quiet() {
        let z = zones(Point::new(200.0, 200.0));
        assert!(!z.is_active());
        assert_eq!(z.velocity, Vec2::ZERO);
    }

    #[test]
    fn directions_reveal_beyond_edge() {
        assert!(zones(Point::new(10.0, 200.0)).velocity.x > 0.0);
        assert!(zones(Point::new(390.0, 200.0)).velocity.x < 0.0);
        assert!(zones(Point::new(200.0, 10.0)).velocity.y > 0.0);
        assert!(zones(Point::new(200.0, 390.0)).velocity.y < 0.0);
    }

    #[test]
    fn corners_combine() {
        let z = zones(Point::new(0.0, 50.0));
        assert!(z.left && z.top);
        assert_eq!(z.velocity, Vec2::new(1000.0, 550.0));
    }
}
