// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Position and uniform scale of the controlled surface in parent space.
///
/// A local (content) point `p` lands at `position + p * scale` in the
/// parent. The surface is axis aligned; rotation is not modeled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Parent‑space location of the surface's local origin.
    pub position: Point,
    /// Uniform scale factor. Always positive.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Local origin at the parent origin, scale `1.0`.
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        scale: 1.0,
    };

    /// Creates a transform from a position and scale.
    #[must_use]
    pub const fn new(position: Point, scale: f64) -> Self {
        Self { position, scale }
    }

    /// Returns the equivalent affine map from local into parent space.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::scale(self.scale)
    }

    /// Converts a local (content) point into parent coordinates.
    #[must_use]
    pub fn local_to_parent(self, pt: Point) -> Point {
        self.position + pt.to_vec2() * self.scale
    }

    /// Converts a parent point into local (content) coordinates.
    #[must_use]
    pub fn parent_to_local(self, pt: Point) -> Point {
        ((pt - self.position) / self.scale).to_point()
    }

    /// Returns the parent‑space rectangle covered by content of `content_size`.
    #[must_use]
    pub fn surface_rect(self, content_size: Size) -> Rect {
        Rect::from_origin_size(self.position, content_size * self.scale)
    }

    /// Rescales around `anchor` (parent space), then translates by `pan`.
    ///
    /// The local point under `anchor` before the call ends up under
    /// `anchor + pan` afterwards.
    #[must_use]
    pub fn zoomed_about(self, anchor: Point, new_scale: f64, pan: Vec2) -> Self {
        let local_anchor = self.parent_to_local(anchor);
        let position = anchor + pan - local_anchor.to_vec2() * new_scale;
        Self {
            position,
            scale: new_scale,
        }
    }

    /// Interpolates position and scale linearly; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return other;
        }
        Self {
            position: self.position.lerp(other.position, t),
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}
