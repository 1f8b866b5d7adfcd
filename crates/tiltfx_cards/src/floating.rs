//! Ambient background motion
//!
//! [`FloatingField`] scatters small drifting dots over a section; [`Parallax`]
//! turns the pointer and scroll position into offsets for the large blurred
//! background blobs and the pointer-following light.

use crate::palette::{ThemeColor, ThemePalette};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tiltfx_animation::{Easing, FloatAnimation};
use tiltfx_core::{Color, Point, Size};

/// Dots per field when no count is given
pub const DEFAULT_FLOATING_COUNT: usize = 5;

const SIZES: [f32; 3] = [4.0, 6.0, 8.0];
const TINTS: [ThemeColor; 3] = [ThemeColor::Primary, ThemeColor::Accent, ThemeColor::Secondary];
const TINT_ALPHA: f32 = 0.4;

// ─────────────────────────────────────────────────────────────────────────────
// Floating field
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Drift {
    x: FloatAnimation,
    y: FloatAnimation,
    scale: FloatAnimation,
    opacity: FloatAnimation,
}

impl Drift {
    fn new(duration: f32, delay: f32) -> Self {
        let duration_ms = (duration * 1000.0).round() as u32;
        let delay_ms = (delay * 1000.0).round() as u32;
        let track = |values: &[f32]| {
            let mut anim = FloatAnimation::sequence(duration_ms, values, Easing::EaseInOut)
                .delay(delay_ms)
                .looping(true);
            anim.start();
            anim
        };
        Self {
            x: track(&[0.0, 15.0, -15.0, 0.0]),
            y: track(&[0.0, -30.0, 0.0]),
            scale: track(&[1.0, 1.2, 1.0]),
            opacity: track(&[0.4, 0.8, 0.4]),
        }
    }

    fn tick(&mut self, dt_ms: f32) {
        self.x.tick(dt_ms);
        self.y.tick(dt_ms);
        self.scale.tick(dt_ms);
        self.opacity.tick(dt_ms);
    }
}

/// One drifting dot
#[derive(Clone, Debug)]
pub struct FloatingElement {
    /// Anchor, as a percentage of the field (0..100)
    pub anchor: Point,
    pub color: Color,
    pub size: f32,
    /// Seconds per drift cycle (3..7)
    pub duration: f32,
    /// Seconds before the first cycle (0..2)
    pub delay: f32,
    drift: Drift,
}

/// A floating element's pose this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingSample {
    pub anchor: Point,
    /// Drift offset from the anchor (px)
    pub offset: Point,
    pub scale: f32,
    pub opacity: f32,
    pub size: f32,
    pub color: Color,
}

/// A seeded set of floating dots
#[derive(Clone, Debug, Default)]
pub struct FloatingField {
    elements: Vec<FloatingElement>,
}

impl FloatingField {
    /// Scatter `count` dots; the same seed always gives the same field
    pub fn scatter(count: usize, seed: u64, palette: &ThemePalette) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let elements = (0..count)
            .map(|_| {
                let anchor = Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
                let tint = TINTS[rng.gen_range(0..TINTS.len())];
                let size = SIZES[rng.gen_range(0..SIZES.len())];
                let duration = 3.0 + rng.gen_range(0.0..4.0);
                let delay = rng.gen_range(0.0..2.0);
                FloatingElement {
                    anchor,
                    color: palette.alpha(tint, TINT_ALPHA),
                    size,
                    duration,
                    delay,
                    drift: Drift::new(duration, delay),
                }
            })
            .collect();
        tracing::debug!(count, seed, "scattered floating field");
        Self { elements }
    }

    pub fn elements(&self) -> &[FloatingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Advance every drift by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt_ms = dt * 1000.0;
        for element in &mut self.elements {
            element.drift.tick(dt_ms);
        }
    }

    pub fn sample(&self) -> Vec<FloatingSample> {
        self.elements
            .iter()
            .map(|e| FloatingSample {
                anchor: e.anchor,
                offset: Point::new(
                    e.drift.x.value().unwrap_or(0.0),
                    e.drift.y.value().unwrap_or(0.0),
                ),
                scale: e.drift.scale.value().unwrap_or(1.0),
                opacity: e.drift.opacity.value().unwrap_or(TINT_ALPHA),
                size: e.size,
                color: e.color,
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parallax
// ─────────────────────────────────────────────────────────────────────────────

/// `(pointer factor, scroll factor)` per background blob
pub const BLOB_FACTORS: [(f32, f32); 3] = [(20.0, 0.1), (-15.0, -0.05), (10.0, 0.08)];

/// Pointer and scroll driven background offsets
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parallax {
    /// Pointer in normalized device coordinates (-1..1, y up)
    pub pointer: Point,
    /// Vertical scroll offset (px)
    pub scroll: f32,
}

impl Parallax {
    /// Map a viewport position to normalized device coordinates
    ///
    /// An empty viewport or non-finite position maps to the center.
    pub fn normalize(client: Point, viewport: Size) -> Point {
        if viewport.is_empty() || !client.is_finite() {
            return Point::ZERO;
        }
        Point::new(
            client.x / viewport.width * 2.0 - 1.0,
            -(client.y / viewport.height) * 2.0 + 1.0,
        )
    }

    pub fn set_pointer(&mut self, client: Point, viewport: Size) {
        self.pointer = Self::normalize(client, viewport);
    }

    pub fn set_scroll(&mut self, scroll: f32) {
        if scroll.is_finite() {
            self.scroll = scroll;
        }
    }

    /// Translation for each background blob (px)
    pub fn blob_offsets(&self) -> [Point; 3] {
        BLOB_FACTORS.map(|(pointer, scroll)| {
            Point::new(
                self.pointer.x * pointer,
                self.pointer.y * pointer + self.scroll * scroll,
            )
        })
    }

    /// Position of the pointer-following light, as a percentage of the viewport
    pub fn follower(&self) -> Point {
        Point::new((self.pointer.x + 1.0) * 50.0, (-self.pointer.y + 1.0) * 50.0)
    }
}
