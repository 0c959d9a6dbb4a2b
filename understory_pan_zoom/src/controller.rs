// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::bounds::{self, RubberBand, RubberState};
use crate::click::ClickDetector;
use crate::config::{self, PanZoomConfig};
use crate::delegate::PanZoomDelegate;
use crate::frame::FrameZoneState;
use crate::gesture::{GestureClassifier, GestureState};
use crate::modes::PanZoomMode;
use crate::touches::{MAX_TRACKED_TOUCHES, TouchId, TouchSampleStore};
use crate::transform::Transform;

/// Touch-driven pan/zoom controller for one surface.
///
/// `PanZoomController` owns the surface [`Transform`] and updates it from raw
/// touch events and a per-frame tick. It:
/// - Pans with one committed touch ([`PanZoomMode::Sheet`]).
/// - Pinch-zooms and pans with two touches, anchored at their midpoint.
/// - Recognizes taps and reports them as clicks.
/// - Keeps the surface within optional pan bounds, allowing a rubber-band
///   overshoot that recovers when the gesture ends.
/// - Autoscrolls while a touch is held near the bounds edges
///   ([`PanZoomMode::Frame`]).
///
/// All methods run on the caller's thread; there is no internal locking. The
/// host applies [`PanZoomController::transform`] to its scene after each call.
#[derive(Clone, Debug)]
pub struct PanZoomController {
    config: PanZoomConfig,
    transform: Transform,
    content_size: Size,
    touches: TouchSampleStore,
    gesture: GestureClassifier,
    clicks: ClickDetector,
    rubber: RubberBand,
    frame_zones: FrameZoneState,
    /// Seconds accumulated from [`PanZoomController::tick`].
    clock: f64,
}

impl PanZoomController {
    /// Creates a controller with an identity transform and empty content.
    ///
    /// The configuration is [normalized](PanZoomConfig::normalized) first. If
    /// pan bounds are set, the initial transform is moved into them.
    #[must_use]
    pub fn new(config: PanZoomConfig) -> Self {
        let config = config.normalized();
        let mut pz = Self {
            config,
            transform: Transform::IDENTITY,
            content_size: Size::ZERO,
            touches: TouchSampleStore::new(),
            gesture: GestureClassifier::new(config.multitouch_detection_delay),
            clicks: ClickDetector::new(config.max_touch_distance_to_click),
            rubber: RubberBand::new(),
            frame_zones: FrameZoneState::default(),
            clock: 0.0,
        };
        pz.transform = pz.settled(pz.transform);
        pz
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// Returns the surface transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the surface content size in local units.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns the current gesture state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Number of tracked touches.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Returns `true` while a rubber-band recovery animation is running.
    #[must_use]
    pub fn is_recovering(&self) -> bool {
        self.rubber.is_recovering()
    }

    /// The running rubber-band recovery, if any.
    #[must_use]
    pub fn rubber_state(&self) -> Option<&RubberState> {
        self.rubber.state()
    }

    /// Autoscroll zones evaluated on the last tick.
    #[must_use]
    pub fn frame_zones(&self) -> FrameZoneState {
        self.frame_zones
    }

    /// Lowest scale currently reachable.
    ///
    /// This is `min_scale`, raised (up to `max_scale`) when the content must
    /// keep covering the pan bounds.
    #[must_use]
    pub fn effective_min_scale(&self) -> f64 {
        let covering = self
            .config
            .pan_bounds
            .map_or(0.0, |b| bounds::min_covering_scale(b, self.content_size));
        self.config.min_scale.max(covering).min(self.config.max_scale)
    }

    /// How far the surface currently sits outside its pan bounds, per side.
    ///
    /// Always zero without bounds.
    #[must_use]
    pub fn overshoot(&self) -> Insets {
        match self.allowed_positions(self.transform.scale) {
            Some(allowed) => bounds::overshoot(self.transform.position, allowed),
            None => Insets::ZERO,
        }
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: PanZoomConfig) {
        self.config = config.normalized();
        self.gesture.set_delay(self.config.multitouch_detection_delay);
        self.clicks
            .set_max_distance(self.config.max_touch_distance_to_click);
        self.reconstrain();
    }

    /// Sets both zoom limits. Reversed limits are swapped.
    ///
    /// The current scale is clamped into the new range right away.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        self.set_config(PanZoomConfig {
            min_scale,
            max_scale,
            ..self.config
        });
    }

    /// Sets the upper zoom limit.
    pub fn set_max_scale(&mut self, max_scale: f64) {
        self.set_scale_limits(self.config.min_scale, max_scale);
    }

    /// Sets the lower zoom limit.
    pub fn set_min_scale(&mut self, min_scale: f64) {
        self.set_scale_limits(min_scale, self.config.max_scale);
    }

    /// Sets the scroll bounds in parent space; `None` scrolls without limit.
    pub fn set_pan_bounds(&mut self, pan_bounds: Option<Rect>) {
        let pan_bounds = config::normalized_bounds(pan_bounds);
        if self.config.pan_bounds == pan_bounds {
            return;
        }
        self.config.pan_bounds = pan_bounds;
        self.reconstrain();
    }

    /// Sets the drag distance above which a tap is no longer a click.
    pub fn set_max_touch_distance_to_click(&mut self, distance: f64) {
        let distance = config::non_negative(distance, "max_touch_distance_to_click");
        self.config.max_touch_distance_to_click = distance;
        self.clicks.set_max_distance(distance);
    }

    /// Switches between Sheet and Frame interaction.
    pub fn set_mode(&mut self, mode: PanZoomMode) {
        self.config.mode = mode;
        if mode != PanZoomMode::Frame {
            self.frame_zones = FrameZoneState::default();
        }
    }

    /// Sets the autoscroll speed range. Reversed limits are swapped.
    pub fn set_speed_limits(&mut self, min_speed: f64, max_speed: f64) {
        let min_speed = config::non_negative(min_speed, "min_speed");
        let max_speed = config::non_negative(max_speed, "max_speed");
        let (min_speed, max_speed) = config::ordered(min_speed, max_speed, "speed limits");
        self.config.min_speed = min_speed;
        self.config.max_speed = max_speed;
    }

    /// Sets the slowest autoscroll speed.
    pub fn set_min_speed(&mut self, min_speed: f64) {
        self.set_speed_limits(min_speed, self.config.max_speed);
    }

    /// Sets the fastest autoscroll speed.
    pub fn set_max_speed(&mut self, max_speed: f64) {
        self.set_speed_limits(self.config.min_speed, max_speed);
    }

    /// Sets all four autoscroll zone widths.
    pub fn set_frame_margins(&mut self, margins: Insets) {
        self.config.frame_margins = Insets::new(
            config::non_negative(margins.x0, "left frame margin"),
            config::non_negative(margins.y0, "top frame margin"),
            config::non_negative(margins.x1, "right frame margin"),
            config::non_negative(margins.y1, "bottom frame margin"),
        );
    }

    /// Sets the top autoscroll zone width.
    pub fn set_top_frame_margin(&mut self, margin: f64) {
        self.set_frame_margins(Insets {
            y0: margin,
            ..self.config.frame_margins
        });
    }

    /// Sets the bottom autoscroll zone width.
    pub fn set_bottom_frame_margin(&mut self, margin: f64) {
        self.set_frame_margins(Insets {
            y1: margin,
            ..self.config.frame_margins
        });
    }

    /// Sets the left autoscroll zone width.
    pub fn set_left_frame_margin(&mut self, margin: f64) {
        self.set_frame_margins(Insets {
            x0: margin,
            ..self.config.frame_margins
        });
    }

    /// Sets the right autoscroll zone width.
    pub fn set_right_frame_margin(&mut self, margin: f64) {
        self.set_frame_margins(Insets {
            x1: margin,
            ..self.config.frame_margins
        });
    }

    /// Sets the rubber-band recovery time in seconds; `0.0` snaps back instantly.
    pub fn set_rubber_edges_recovery_time(&mut self, seconds: f64) {
        self.config.rubber_edges_recovery_time =
            config::non_negative(seconds, "rubber_edges_recovery_time");
    }

    /// Sets how far past the pan bounds the surface may be dragged.
    pub fn set_rubber_edges_margin(&mut self, margin: f64) {
        self.config.rubber_edges_margin = config::non_negative(margin, "rubber_edges_margin");
        self.reconstrain();
    }

    /// Sets how long a lone touch waits for a second finger before panning.
    pub fn set_multitouch_detection_delay(&mut self, seconds: f64) {
        let seconds = config::non_negative(seconds, "multitouch_detection_delay");
        self.config.multitouch_detection_delay = seconds;
        self.gesture.set_delay(seconds);
    }

    /// Sets the surface content size in local units.
    ///
    /// Larger-than-bounds content must keep covering the pan bounds, which
    /// may raise the effective minimum scale.
    pub fn set_content_size(&mut self, size: Size) {
        let size = Size::new(
            config::non_negative(size.width, "content width"),
            config::non_negative(size.height, "content height"),
        );
        if self.content_size == size {
            return;
        }
        self.content_size = size;
        self.reconstrain();
    }

    /// Moves the surface programmatically.
    ///
    /// Cancels any recovery. Scale is clamped and position is kept within the
    /// rubber margin of the pan bounds.
    pub fn set_transform(&mut self, transform: Transform) {
        self.rubber.cancel();
        self.transform = self.constrained(transform);
    }

    /// Handles a touch-down at `position` (parent space).
    ///
    /// `tap_count` is the platform's consecutive tap count for this touch and
    /// is reported back with the click. A third simultaneous touch is ignored.
    pub fn touch_began(
        &mut self,
        id: TouchId,
        position: Point,
        tap_count: u32,
        _delegate: &mut impl PanZoomDelegate,
    ) {
        if self.touches.len() >= MAX_TRACKED_TOUCHES {
            log::trace!("ignoring touch {id:?}: already tracking {MAX_TRACKED_TOUCHES}");
            return;
        }
        if !self.touches.insert(id, position, self.clock) {
            log::trace!("ignoring duplicate touch-down for {id:?}");
            return;
        }
        if self.rubber.cancel() {
            log::debug!("rubber-band recovery interrupted at {:?}", self.transform);
        }

        let count = self.touches.len();
        self.gesture.touch_began(count, self.clock);
        if count == 1 {
            self.clicks.on_down(id, position, tap_count);
        } else {
            self.clicks.invalidate();
        }
    }

    /// Handles a move of a tracked touch to `position` (parent space).
    ///
    /// Moves of untracked touches are ignored.
    pub fn touch_moved(
        &mut self,
        id: TouchId,
        position: Point,
        delegate: &mut impl PanZoomDelegate,
    ) {
        let Some(sample) = self.touches.update(id, position) else {
            log::trace!("ignoring move of untracked touch {id:?}");
            return;
        };
        self.gesture.poll(self.clock, self.touches.len());

        if self.touches.len() == 1 {
            if let Some(from) = self.clicks.on_move(id, position) {
                delegate.touch_move_began(from);
            }
        }

        match self.gesture.state() {
            GestureState::Single => {
                if self.config.mode == PanZoomMode::Sheet {
                    let t = Transform::new(
                        self.transform.position + sample.delta(),
                        self.transform.scale,
                    );
                    self.apply_user(t);
                }
                delegate.touch_position_updated(sample.current);
            }
            GestureState::Multi => self.pinch(),
            // Ambiguous motion before the commit is never applied.
            GestureState::PendingSingle | GestureState::Idle => {}
        }
    }

    /// Handles the release of a tracked touch.
    ///
    /// Sends a click in Sheet mode if the touch stayed within the click
    /// distance and no second touch joined during its lifetime.
    pub fn touch_ended(&mut self, id: TouchId, delegate: &mut impl PanZoomDelegate) {
        self.release(id, true, delegate);
    }

    /// Handles a touch the platform aborted. Never produces a click.
    pub fn touch_cancelled(&mut self, id: TouchId, delegate: &mut impl PanZoomDelegate) {
        self.release(id, false, delegate);
    }

    /// Advances time by `dt` seconds.
    ///
    /// Commits a pending single touch whose delay has passed, steps the
    /// rubber-band recovery, and applies Frame-mode autoscroll.
    pub fn tick(&mut self, dt: f64, delegate: &mut impl PanZoomDelegate) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;
        self.gesture.poll(self.clock, self.touches.len());

        if let Some(t) = self.rubber.advance(dt) {
            self.transform = t;
        }

        self.autoscroll(dt, delegate);
    }

    /// Snapshot of the controller state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PanZoomDebugInfo {
        PanZoomDebugInfo {
            transform: self.transform,
            content_size: self.content_size,
            pan_bounds: self.config.pan_bounds,
            mode: self.config.mode,
            gesture_state: self.gesture.state(),
            touch_count: self.touches.len(),
            min_scale: self.effective_min_scale(),
            max_scale: self.config.max_scale,
            overshoot: self.overshoot(),
            recovery_progress: self.rubber.state().map(RubberState::progress),
            autoscroll_velocity: self.frame_zones.velocity,
            clock: self.clock,
        }
    }

    fn release(&mut self, id: TouchId, allow_click: bool, delegate: &mut impl PanZoomDelegate) {
        let Some(sample) = self.touches.remove(id) else {
            log::trace!("ignoring release of untracked touch {id:?}");
            return;
        };
        let saw_multi = self.gesture.saw_multi();
        let state = self.gesture.touch_ended(self.touches.len());

        let click = if allow_click {
            self.clicks.on_up(id, sample.current)
        } else {
            self.clicks.cancel(id);
            None
        };
        if let Some(click) = click {
            if self.config.mode == PanZoomMode::Sheet && !saw_multi {
                delegate.clicked(click.at, click.tap_count);
            }
        }

        match state {
            // The remaining finger becomes the pan anchor where it is now.
            GestureState::Single => {
                self.touches.reanchor();
                if let Some(rest) = self.touches.primary() {
                    self.clicks.follow(rest.id, rest.current);
                }
            }
            GestureState::Idle => {
                self.frame_zones = FrameZoneState::default();
                self.begin_recovery();
            }
            GestureState::PendingSingle | GestureState::Multi => {}
        }
    }

    fn pinch(&mut self) {
        let Some((a, b)) = self.touches.pair() else {
            return;
        };
        let old_mid = a.previous.midpoint(b.previous);
        let new_mid = a.current.midpoint(b.current);
        let d0 = a.previous.distance(b.previous);
        let d1 = a.current.distance(b.current);

        // Coincident touches carry no usable distance ratio; translate only.
        let scale = if d0 > 0.0 && d1 > 0.0 {
            self.clamp_scale(self.transform.scale * (d1 / d0))
        } else {
            self.transform.scale
        };
        let t = self.transform.zoomed_about(old_mid, scale, new_mid - old_mid);
        self.apply_user(t);
    }

    fn autoscroll(&mut self, dt: f64, delegate: &mut impl PanZoomDelegate) {
        let (PanZoomMode::Frame, Some(bounds), Some(primary)) = (
            self.config.mode,
            self.config.pan_bounds,
            self.touches.primary(),
        ) else {
            self.frame_zones = FrameZoneState::default();
            return;
        };
        let touch = primary.current;
        self.frame_zones = FrameZoneState::compute(
            bounds,
            self.config.frame_margins,
            touch,
            self.config.min_speed,
            self.config.max_speed,
        );
        if !self.frame_zones.is_active() || dt == 0.0 {
            return;
        }

        let before = self.transform;
        let t = Transform::new(
            before.position + self.frame_zones.velocity * dt,
            before.scale,
        );
        self.apply_user(t);
        if self.transform != before && self.touches.len() == 1 {
            delegate.touch_position_updated(touch);
        }
    }

    /// Applies a user-driven transform; user input always preempts recovery.
    fn apply_user(&mut self, t: Transform) {
        self.rubber.cancel();
        self.transform = self.constrained(t);
    }

    /// Animates (or snaps) back into bounds if needed.
    fn begin_recovery(&mut self) {
        let target = self.settled(self.transform);
        if target == self.transform {
            return;
        }
        if let Some(snap) =
            self.rubber
                .start(self.transform, target, self.config.rubber_edges_recovery_time)
        {
            self.transform = snap;
        }
    }

    /// Re-applies limits after a configuration change.
    fn reconstrain(&mut self) {
        self.rubber.cancel();
        self.transform = self.constrained(self.transform);
        if self.touches.is_empty() {
            self.begin_recovery();
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.effective_min_scale(), self.config.max_scale)
    }

    fn allowed_positions(&self, scale: f64) -> Option<Rect> {
        self.config
            .pan_bounds
            .map(|b| bounds::allowed_positions(b, self.content_size, scale))
    }

    /// Limits `t` to the valid scale range and the rubber margin.
    fn constrained(&self, t: Transform) -> Transform {
        self.limit(t, self.config.rubber_edges_margin)
    }

    /// Limits `t` to the valid scale range and strictly inside the bounds.
    fn settled(&self, t: Transform) -> Transform {
        self.limit(t, 0.0)
    }

    fn limit(&self, t: Transform, margin: f64) -> Transform {
        let scale = self.clamp_scale(t.scale);
        let position = match self.allowed_positions(scale) {
            Some(allowed) => bounds::clamp_position(t.position, allowed, margin),
            None => t.position,
        };
        Transform::new(position, scale)
    }
}

/// Debug snapshot of a [`PanZoomController`] state.
#[derive(Clone, Copy, Debug)]
pub struct PanZoomDebugInfo {
    /// Current surface transform.
    pub transform: Transform,
    /// Surface content size in local units.
    pub content_size: Size,
    /// Pan bounds, if any.
    pub pan_bounds: Option<Rect>,
    /// Interaction mode.
    pub mode: PanZoomMode,
    /// Gesture state.
    pub gesture_state: GestureState,
    /// Number of tracked touches.
    pub touch_count: usize,
    /// Effective minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Distance outside the pan bounds, per side.
    pub overshoot: Insets,
    /// Progress of the running recovery in `[0, 1]`, if any.
    pub recovery_progress: Option<f64>,
    /// Autoscroll velocity from the last tick.
    pub autoscroll_velocity: Vec2,
    /// Seconds accumulated from ticks.
    pub clock: f64,
}
