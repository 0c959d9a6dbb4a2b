// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pan_zoom --heading-base-level=0

//! Understory Pan Zoom: touch gestures driving a 2D surface transform.
//!
//! This crate turns raw multi-touch input into a position + scale for a
//! surface embedded in some parent space. It focuses on:
//! - One-finger pan and two-finger pinch zoom anchored at the finger midpoint.
//! - Telling the start of a pinch apart from a pan with a short commit delay.
//! - Tap recognition.
//! - Optional pan bounds with rubber-band overshoot and timed recovery.
//! - Edge-hold autoscrolling ("frame" mode) for dragging things across a
//!   surface larger than the screen.
//!
//! It does **not** own any scene graph, touch source, or frame clock. Callers
//! are expected to:
//! - Forward touch begin/move/end/cancel events with stable per-touch ids and
//!   positions in the surface's parent space.
//! - Call [`PanZoomController::tick`] once per frame with the elapsed time.
//! - Apply [`PanZoomController::transform`] to their surface after each call.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_pan_zoom::{PanZoomConfig, PanZoomController, TouchId};
//!
//! let mut pz = PanZoomController::new(PanZoomConfig::default());
//!
//! // Two fingers 100 units apart spread to 200: zoom in 2x.
//! pz.touch_began(TouchId(1), Point::new(100.0, 100.0), 1, &mut ());
//! pz.touch_began(TouchId(2), Point::new(200.0, 100.0), 1, &mut ());
//! pz.touch_moved(TouchId(2), Point::new(300.0, 100.0), &mut ());
//! assert!((pz.transform().scale - 2.0).abs() < 1e-9);
//!
//! pz.touch_ended(TouchId(2), &mut ());
//! pz.touch_ended(TouchId(1), &mut ());
//! ```
//!
//! ## Bounds and rubber band
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_pan_zoom::{PanZoomConfig, PanZoomController, TouchId};
//!
//! let mut pz = PanZoomController::new(PanZoomConfig {
//!     pan_bounds: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
//!     rubber_edges_margin: 20.0,
//!     rubber_edges_recovery_time: 0.2,
//!     ..PanZoomConfig::default()
//! });
//!
//! pz.touch_began(TouchId(1), Point::new(50.0, 50.0), 1, &mut ());
//! pz.tick(0.1, &mut ()); // commit the single touch as a pan
//! pz.touch_moved(TouchId(1), Point::new(10.0, 50.0), &mut ());
//! // Dragged 40 left, but only 20 of overshoot is allowed.
//! assert_eq!(pz.transform().position.x, -20.0);
//!
//! pz.touch_ended(TouchId(1), &mut ());
//! assert!(pz.is_recovering());
//! pz.tick(0.25, &mut ());
//! assert_eq!(pz.transform().position.x, 0.0);
//! ```
//!
//! ## Design notes
//!
//! - The controller is single threaded and event driven. Delegates are called
//!   inline and cannot reenter the controller.
//! - The commit delay is measured on a clock advanced only by `tick`.
//! - Parent space is y-down: "top" is the minimum y.
//! - Rotation and inertial scrolling are out of scope.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

pub mod bounds;
pub mod click;
mod config;
mod controller;
mod delegate;
pub mod frame;
pub mod gesture;
mod modes;
pub mod touches;
mod transform;

pub use config::{
    DEFAULT_FRAME_MARGIN, DEFAULT_MAX_SCALE, DEFAULT_MAX_SPEED,
    DEFAULT_MAX_TOUCH_DISTANCE_TO_CLICK, DEFAULT_MIN_SCALE, DEFAULT_MIN_SPEED,
    DEFAULT_MULTITOUCH_DETECTION_DELAY, PanZoomConfig,
};
pub use controller::{PanZoomController, PanZoomDebugInfo};
pub use delegate::{PanZoomDelegate, PanZoomEvent};
pub use gesture::GestureState;
pub use modes::PanZoomMode;
pub use touches::TouchId;
pub use transform::Transform;
