// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan bounds, rubber-band overshoot and timed recovery.
//!
//! Bounds are a parent-space rectangle. On each axis the surface position is
//! admissible when the scaled content either covers the bounds (content
//! larger than the bounds) or stays inside them (content smaller). With a
//! zero content size this reduces to keeping the position inside the bounds.
//!
//! During a gesture the position may leave the admissible region by up to the
//! rubber margin. When the gesture ends, a [`RubberBand`] animates the
//! transform back.

use kurbo::{Insets, Point, Rect, Size};

use crate::transform::Transform;

/// Relative slack for ending a recovery, absorbing rounding in summed ticks.
const FINISH_TOLERANCE: f64 = 1e-9;

/// Positions at which content of `content_size` at `scale` respects `bounds`.
///
/// The returned rectangle is always well ordered (`x0 <= x1`, `y0 <= y1`).
#[must_use]
pub fn allowed_positions(bounds: Rect, content_size: Size, scale: f64) -> Rect {
    let extent = content_size * scale;
    let (x0, x1) = axis_range(bounds.x0, bounds.x1, extent.width);
    let (y0, y1) = axis_range(bounds.y0, bounds.y1, extent.height);
    Rect::new(x0, y0, x1, y1)
}

fn axis_range(lo: f64, hi: f64, extent: f64) -> (f64, f64) {
    let a = lo;
    let b = hi - extent;
    (a.min(b), a.max(b))
}

/// Smallest scale at which the content still covers `bounds` on both axes.
///
/// Returns `0.0` (no constraint) for empty content.
#[must_use]
pub fn min_covering_scale(bounds: Rect, content_size: Size) -> f64 {
    if content_size.width <= 0.0 || content_size.height <= 0.0 {
        return 0.0;
    }
    (bounds.width() / content_size.width).max(bounds.height() / content_size.height)
}

/// Clamps `pos` into `allowed` grown by `margin` on every side.
#[must_use]
pub fn clamp_position(pos: Point, allowed: Rect, margin: f64) -> Point {
    let r = allowed.inflate(margin, margin);
    Point::new(pos.x.clamp(r.x0, r.x1), pos.y.clamp(r.y0, r.y1))
}

/// Distance by which `pos` lies outside `allowed`, per side.
///
/// `x0` is how far the position sits left of the admissible region, `y0`
/// above it, `x1` right of it and `y1` below it. All zero when admissible.
#[must_use]
pub fn overshoot(pos: Point, allowed: Rect) -> Insets {
    Insets::new(
        (allowed.x0 - pos.x).max(0.0),
        (allowed.y0 - pos.y).max(0.0),
        (pos.x - allowed.x1).max(0.0),
        (pos.y - allowed.y1).max(0.0),
    )
}

/// In-flight recovery animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RubberState {
    /// Seconds since the recovery started.
    pub elapsed: f64,
    /// Total animation time in seconds.
    pub duration: f64,
    /// Transform when the recovery started.
    pub from: Transform,
    /// Transform the recovery ends on.
    pub to: Transform,
}

impl RubberState {
    /// Fraction of the animation completed, in `[0, 1]`.
    ///
    /// Reaches exactly `1.0` once `elapsed` is within rounding of `duration`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 || self.elapsed >= self.duration * (1.0 - FINISH_TOLERANCE) {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Transform at the current progress.
    ///
    /// Linear in both position and scale, and exactly [`Self::to`] once the
    /// duration has elapsed.
    #[must_use]
    pub fn current(&self) -> Transform {
        self.from.lerp(self.to, self.progress())
    }
}

/// Recovery animator.
#[derive(Clone, Debug, Default)]
pub struct RubberBand {
    state: Option<RubberState>,
}

impl RubberBand {
    /// Creates an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a recovery is in flight.
    #[must_use]
    pub fn is_recovering(&self) -> bool {
        self.state.is_some()
    }

    /// The in-flight recovery, if any.
    #[must_use]
    pub fn state(&self) -> Option<&RubberState> {
        self.state.as_ref()
    }

    /// Begins animating from `from` to `to` over `duration` seconds.
    ///
    /// With a non-positive duration nothing is animated and `to` is returned
    /// for the caller to apply. Otherwise returns `None`.
    pub fn start(&mut self, from: Transform, to: Transform, duration: f64) -> Option<Transform> {
        if duration <= 0.0 {
            self.state = None;
            return Some(to);
        }
        log::debug!("rubber-band recovery {from:?} -> {to:?} over {duration}s");
        self.state = Some(RubberState {
            elapsed: 0.0,
            duration,
            from,
            to,
        });
        None
    }

    /// Advances the animation by `dt` seconds and returns the transform to apply.
    ///
    /// The state is dropped on the step that reaches the target.
    pub fn advance(&mut self, dt: f64) -> Option<Transform> {
        let state = self.state.as_mut()?;
        state.elapsed += dt;
        let current = state.current();
        if state.progress() >= 1.0 {
            log::debug!("rubber-band recovery finished at {current:?}");
            self.state = None;
        }
        Some(current)
    }

    /// Stops the animation where it is. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        self.state.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Point, Rect, Size};

    use super::{RubberBand, allowed_positions, clamp_position, min_covering_scale, overshoot};
    use crate::transform::Transform;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn zero_content_clamps_position_into_bounds() {
        let allowed = allowed_positions(BOUNDS, Size::ZERO, 2.0);
        assert_eq!(allowed, BOUNDS);
        assert_eq!(
            clamp_position(Point::new(-30.0, 150.0), allowed, 0.0),
            Point::new(0.0, 100.0)
        );
    }

    #[test]
    fn large_content_must_cover_bounds() {
        // 200x200 content at scale 1 over 100x100 bounds.
        let allowed = allowed_positions(BOUNDS, Size::new(200.0, 200.0), 1.0);
        assert_eq!(allowed, Rect::new(-100.0, -100.0, 0.0, 0.0));
    }

    #[test]
    fn small_content_stays_inside_bounds() {
        let allowed = allowed_positions(BOUNDS, Size::new(40.0, 10.0), 1.0);
        assert_eq!(allowed, Rect::new(0.0, 0.0, 60.0, 90.0));
    }

    #[test]
    fn margin_allows_limited_overshoot() {
        let allowed = allowed_positions(BOUNDS, Size::ZERO, 1.0);
        let p = clamp_position(Point::new(-50.0, 50.0), allowed, 10.0);
        assert_eq!(p, Point::new(-10.0, 50.0));
        assert_eq!(overshoot(p, allowed), Insets::new(10.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn overshoot_is_zero_inside() {
        let allowed = allowed_positions(BOUNDS, Size::ZERO, 1.0);
        assert_eq!(overshoot(Point::new(50.0, 50.0), allowed), Insets::ZERO);
        assert_eq!(
            overshoot(Point::new(103.0, 120.0), allowed),
            Insets::new(0.0, 0.0, 3.0, 20.0)
        );
    }

    #[test]
    fn covering_scale() {
        assert_eq!(min_covering_scale(BOUNDS, Size::ZERO), 0.0);
        assert_eq!(min_covering_scale(BOUNDS, Size::new(400.0, 200.0)), 0.5);
    }

    #[test]
    fn zero_duration_returns_target_without_state() {
        let mut rb = RubberBand::new();
        let to = Transform::new(Point::ORIGIN, 1.0);
        let snapped = rb.start(Transform::new(Point::new(-10.0, 0.0), 1.0), to, 0.0);
        assert_eq!(snapped, Some(to));
        assert!(!rb.is_recovering());
    }

    #[test]
    fn recovery_is_monotonic_and_exact_at_end() {
        let mut rb = RubberBand::new();
        let from = Transform::new(Point::new(-10.0, 0.0), 1.0);
        let to = Transform::new(Point::ORIGIN, 1.0);
        assert_eq!(rb.start(from, to, 0.2), None);

        let mut last = from.position.x;
        for _ in 0..3 {
            let t = rb.advance(0.05).unwrap();
            assert!(t.position.x > last);
            assert!(t.position.x < 0.0);
            last = t.position.x;
        }
        // Overshooting the duration lands exactly on the target.
        let end = rb.advance(0.06).unwrap();
        assert_eq!(end, to);
        assert!(!rb.is_recovering());
        assert_eq!(rb.advance(0.05), None);
    }

    #[test]
    fn frame_ticks_finish_on_time() {
        let mut rb = RubberBand::new();
        let to = Transform::IDENTITY;
        rb.start(Transform::new(Point::new(-10.0, 0.0), 1.0), to, 0.2);
        // Twelve 60 Hz frames sum to slightly less than 0.2.
        for _ in 0..11 {
            rb.advance(1.0 / 60.0);
            assert!(rb.is_recovering());
        }
        assert_eq!(rb.advance(1.0 / 60.0), Some(to));
        assert!(!rb.is_recovering());
    }

    #[test]
    fn cancel_freezes() {
        let mut rb = RubberBand::new();
        rb.start(
            Transform::new(Point::new(-10.0, 0.0), 1.0),
            Transform::IDENTITY,
            0.2,
        );
        let mid = rb.advance(0.1).unwrap();
        assert!((mid.position.x + 5.0).abs() < 1e-9);
        assert!(rb.cancel());
        assert!(!rb.cancel());
        assert_eq!(rb.advance(0.1), None);
    }
}
