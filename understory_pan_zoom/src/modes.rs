// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a held single touch interacts with the surface.
///
/// Consulted by [`crate::PanZoomController`] for single-touch moves, clicks,
/// and edge autoscrolling. Two-finger pinch zoom works in both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanZoomMode {
    /// Swipe to scroll: a committed single touch pans the surface and short
    /// taps are reported as clicks.
    #[default]
    Sheet,
    /// Drag inside the surface: a single touch does not pan, but holding it
    /// near an edge of the pan bounds scrolls in that direction.
    ///
    /// No clicks are reported in this mode.
    Frame,
}
