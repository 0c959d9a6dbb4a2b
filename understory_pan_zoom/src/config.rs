// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Rect};

use crate::modes::PanZoomMode;

/// Default upper zoom limit.
pub const DEFAULT_MAX_SCALE: f64 = 3.0;
/// Default lower zoom limit.
pub const DEFAULT_MIN_SCALE: f64 = 0.5;
/// Default drag distance above which a tap stops being a click.
pub const DEFAULT_MAX_TOUCH_DISTANCE_TO_CLICK: f64 = 15.0;
/// Default slowest autoscroll speed, in parent units per second.
pub const DEFAULT_MIN_SPEED: f64 = 100.0;
/// Default fastest autoscroll speed, in parent units per second.
pub const DEFAULT_MAX_SPEED: f64 = 1000.0;
/// Default width of each autoscroll zone.
pub const DEFAULT_FRAME_MARGIN: f64 = 100.0;
/// Default wait before a lone touch is committed as a pan, in seconds.
pub const DEFAULT_MULTITOUCH_DETECTION_DELAY: f64 = 0.05;

/// Tunables for [`crate::PanZoomController`].
///
/// Build one with struct update syntax over [`Default`], then hand it to
/// [`crate::PanZoomController::new`]. Every field can also be changed later
/// through the controller's setters.
///
/// ```
/// use kurbo::Rect;
/// use understory_pan_zoom::{PanZoomConfig, PanZoomMode};
///
/// let config = PanZoomConfig {
///     mode: PanZoomMode::Frame,
///     pan_bounds: Some(Rect::new(0.0, 0.0, 320.0, 480.0)),
///     ..PanZoomConfig::default()
/// };
/// assert_eq!(config.max_scale, 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomConfig {
    /// Upper zoom limit.
    pub max_scale: f64,
    /// Lower zoom limit.
    pub min_scale: f64,
    /// Scroll bounds in parent space; `None` scrolls without limit.
    pub pan_bounds: Option<Rect>,
    /// Accumulated drag distance above which a tap is disqualified.
    pub max_touch_distance_to_click: f64,
    /// Sheet (swipe to scroll) or Frame (edge-hold autoscroll).
    pub mode: PanZoomMode,
    /// Autoscroll speed at the outer boundary of a frame zone.
    pub min_speed: f64,
    /// Autoscroll speed at the pan bounds edge itself.
    pub max_speed: f64,
    /// Autoscroll zone widths measured inward from the pan bounds edges.
    ///
    /// `x0` is the left zone, `y0` the top, `x1` the right and `y1` the bottom.
    pub frame_margins: Insets,
    /// Seconds taken to animate back into bounds; `0.0` snaps immediately.
    pub rubber_edges_recovery_time: f64,
    /// How far past the pan bounds the surface may be dragged.
    pub rubber_edges_margin: f64,
    /// Seconds a lone touch waits for a second finger before it pans.
    pub multitouch_detection_delay: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: DEFAULT_MAX_SCALE,
            min_scale: DEFAULT_MIN_SCALE,
            pan_bounds: None,
            max_touch_distance_to_click: DEFAULT_MAX_TOUCH_DISTANCE_TO_CLICK,
            mode: PanZoomMode::Sheet,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            frame_margins: Insets::uniform(DEFAULT_FRAME_MARGIN),
            rubber_edges_recovery_time: 0.0,
            rubber_edges_margin: 0.0,
            multitouch_detection_delay: DEFAULT_MULTITOUCH_DETECTION_DELAY,
        }
    }
}

impl PanZoomConfig {
    /// Returns a copy with every invalid value repaired.
    ///
    /// - Reversed scale or speed ranges are swapped.
    /// - Non-finite or non-positive scale limits fall back to the defaults.
    /// - Negative or non-finite distances, margins and times become `0.0`.
    /// - Pan bounds with non-finite coordinates are dropped; reversed
    ///   corners are reordered.
    #[must_use]
    pub fn normalized(self) -> Self {
        let min_scale = positive_or(self.min_scale, DEFAULT_MIN_SCALE, "min_scale");
        let max_scale = positive_or(self.max_scale, DEFAULT_MAX_SCALE, "max_scale");
        let (min_scale, max_scale) = ordered(min_scale, max_scale, "scale limits");

        let min_speed = non_negative(self.min_speed, "min_speed");
        let max_speed = non_negative(self.max_speed, "max_speed");
        let (min_speed, max_speed) = ordered(min_speed, max_speed, "speed limits");

        let m = self.frame_margins;
        let frame_margins = Insets::new(
            non_negative(m.x0, "left frame margin"),
            non_negative(m.y0, "top frame margin"),
            non_negative(m.x1, "right frame margin"),
            non_negative(m.y1, "bottom frame margin"),
        );

        Self {
            max_scale,
            min_scale,
            pan_bounds: normalized_bounds(self.pan_bounds),
            max_touch_distance_to_click: non_negative(
                self.max_touch_distance_to_click,
                "max_touch_distance_to_click",
            ),
            mode: self.mode,
            min_speed,
            max_speed,
            frame_margins,
            rubber_edges_recovery_time: non_negative(
                self.rubber_edges_recovery_time,
                "rubber_edges_recovery_time",
            ),
            rubber_edges_margin: non_negative(self.rubber_edges_margin, "rubber_edges_margin"),
            multitouch_detection_delay: non_negative(
                self.multitouch_detection_delay,
                "multitouch_detection_delay",
            ),
        }
    }
}

pub(crate) fn normalized_bounds(bounds: Option<Rect>) -> Option<Rect> {
    let b = bounds?;
    if !(b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite()) {
        log::warn!("ignoring non-finite pan bounds {b:?}");
        return None;
    }
    Some(b.abs())
}

pub(crate) fn non_negative(value: f64, what: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{what} must be a finite, non-negative value, got {value}; using 0");
        0.0
    }
}

fn positive_or(value: f64, fallback: f64, what: &str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{what} must be finite and positive, got {value}; using {fallback}");
        fallback
    }
}

pub(crate) fn ordered(lo: f64, hi: f64, what: &str) -> (f64, f64) {
    if lo <= hi {
        (lo, hi)
    } else {
        log::warn!("{what} reversed ({lo} > {hi}); swapping");
        (hi, lo)
    }
}
