//! Pointer tracking
//!
//! Converts raw client coordinates into an offset from the tracked element's
//! center. Pure functions: the caller routes samples into a pipeline.

use tiltfx_core::{Point, Rect};

/// Pointer offset from the tracked element's center, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub dx: f32,
    pub dy: f32,
}

impl PointerSample {
    pub const ZERO: PointerSample = PointerSample { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// Samples the pointer relative to a bounding rect
pub struct PointerTracker;

impl PointerTracker {
    /// Offset of `client` from the center of `rect`
    ///
    /// Degenerate rects (not laid out yet, zero or negative size, non-finite
    /// coordinates) and non-finite pointer positions yield a zero offset.
    pub fn sample(rect: &Rect, client: Point) -> PointerSample {
        if rect.is_degenerate() || !client.is_finite() {
            return PointerSample::ZERO;
        }
        let center = rect.center();
        PointerSample::new(client.x - center.x, client.y - center.y)
    }

    /// Sample reported once the pointer leaves the element
    pub fn leave() -> PointerSample {
        PointerSample::ZERO
    }

    /// Position of `client` relative to the rect's top-left corner
    pub fn local_point(rect: &Rect, client: Point) -> Point {
        if rect.is_degenerate() || !client.is_finite() {
            return Point::ZERO;
        }
        Point::new(client.x - rect.x(), client.y - rect.y())
    }
}
