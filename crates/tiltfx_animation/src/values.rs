//! Animatable value types
//!
//! Interpolation for the value types card layers animate, and keyframe tracks
//! built on top of it. Tracks are what drive decorative motion such as a slow
//! 360° particle spin or a `[1, 1.2, 1]` pulse.

use crate::easing::Easing;
use smallvec::SmallVec;
use tiltfx_core::{Color, Point, Vec3};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// Implementations
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Keyframe tracks
// ============================================================================

/// A keyframe holding a value of type T
#[derive(Clone, Debug)]
pub struct TypedKeyframe<T: Interpolate> {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: T,
    /// Easing applied on the way TO this keyframe
    pub easing: Easing,
}

impl<T: Interpolate> TypedKeyframe<T> {
    pub fn new(time: f32, value: T, easing: Easing) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
            easing,
        }
    }

    pub fn linear(time: f32, value: T) -> Self {
        Self::new(time, value, Easing::Linear)
    }
}

/// A keyframe track for any interpolatable type
///
/// The track waits `delay_ms` after `start()` before its clock runs, then plays
/// over `duration_ms`, optionally looping forever. While delayed it reports the
/// first keyframe's value.
#[derive(Clone, Debug)]
pub struct TypedKeyframeAnimation<T: Interpolate> {
    duration_ms: u32,
    delay_ms: u32,
    keyframes: SmallVec<[TypedKeyframe<T>; 4]>,
    /// Time since start, delay included
    current_time: f32,
    playing: bool,
    looping: bool,
}

impl<T: Interpolate> TypedKeyframeAnimation<T> {
    /// Create a new animation with given duration
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            keyframes: SmallVec::new(),
            current_time: 0.0,
            playing: false,
            looping: false,
        }
    }

    /// Evenly spaced keyframes (`[1.0, 1.2, 1.0]` style) with one easing
    pub fn sequence(duration_ms: u32, values: &[T], easing: Easing) -> Self {
        let mut anim = Self::new(duration_ms);
        let last = values.len().saturating_sub(1).max(1) as f32;
        for (i, value) in values.iter().enumerate() {
            anim = anim.keyframe(i as f32 / last, value.clone(), easing);
        }
        anim
    }

    /// Add a keyframe (builder pattern)
    pub fn keyframe(mut self, time: f32, value: T, easing: Easing) -> Self {
        self.keyframes.push(TypedKeyframe::new(time, value, easing));
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Add a keyframe with linear easing
    pub fn at(self, time: f32, value: T) -> Self {
        self.keyframe(time, value, Easing::Linear)
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Delay before the first play-through, in milliseconds
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Start (or restart) the animation from the beginning
    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Progress through the current play-through (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let delay = self.delay_ms as f32;
        if self.current_time < delay {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        ((self.current_time - delay) / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> Option<T> {
        self.sample_at(self.progress())
    }

    /// Advance animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }

        self.current_time += dt_ms;

        let delay = self.delay_ms as f32;
        let end = delay + self.duration_ms as f32;
        if self.current_time >= end {
            if self.looping && self.duration_ms > 0 {
                self.current_time = delay + (self.current_time - delay) % self.duration_ms as f32;
            } else {
                self.current_time = end;
                self.playing = false;
            }
        }
    }

    /// Sample at a specific progress (0.0 to 1.0)
    pub fn sample_at(&self, progress: f32) -> Option<T> {
        let first = self.keyframes.first()?;
        let progress = progress.clamp(0.0, 1.0);

        let mut prev_kf = first;
        let mut next_kf = first;

        for kf in &self.keyframes {
            if kf.time <= progress {
                prev_kf = kf;
            }
            if kf.time >= progress {
                next_kf = kf;
                break;
            }
        }

        if (prev_kf.time - next_kf.time).abs() < f32::EPSILON {
            return Some(prev_kf.value.clone());
        }

        let local_progress = (progress - prev_kf.time) / (next_kf.time - prev_kf.time);
        let eased = next_kf.easing.apply(local_progress);

        Some(prev_kf.value.lerp(&next_kf.value, eased))
    }
}

// ============================================================================
// Type Aliases for Common Types
// ============================================================================

/// Keyframe track for f32 values
pub type FloatAnimation = TypedKeyframeAnimation<f32>;

/// Keyframe track for 2D offsets
pub type PointAnimation = TypedKeyframeAnimation<Point>;

/// Keyframe track for Vec3 values
pub type Vec3Animation = TypedKeyframeAnimation<Vec3>;

/// Keyframe track for Color values
pub type ColorAnimation = TypedKeyframeAnimation<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_point_interpolation() {
        let mid = Point::new(0.0, 0.0).lerp(&Point::new(10.0, -20.0), 0.5);
        assert!(mid.approx_eq(&Point::new(5.0, -10.0), 1e-6));
    }

    #[test]
    fn test_typed_keyframe_animation() {
        let mut anim = Vec3Animation::new(1000)
            .at(0.0, Vec3::new(0.0, 0.0, 0.0))
            .at(1.0, Vec3::new(100.0, 0.0, 0.0));

        anim.start();
        assert!((anim.value().unwrap().x - 0.0).abs() < 1e-4);

        anim.tick(500.0);
        assert!((anim.value().unwrap().x - 50.0).abs() < 1e-4);

        anim.tick(500.0);
        assert!((anim.value().unwrap().x - 100.0).abs() < 1e-4);
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_looping_rotation_wraps() {
        let mut spin = FloatAnimation::new(20_000)
            .at(0.0, 0.0)
            .at(1.0, 360.0)
            .looping(true);
        spin.start();

        spin.tick(25_000.0);
        assert!(spin.is_playing());
        assert!((spin.value().unwrap() - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_delay_holds_first_value() {
        let mut pulse = FloatAnimation::sequence(2000, &[1.0, 1.2, 1.0], Easing::EaseInOut)
            .delay(500)
            .looping(true);
        pulse.start();

        pulse.tick(400.0);
        assert_eq!(pulse.value(), Some(1.0));

        // 500ms delay + half of the 2s cycle = the peak
        pulse.tick(1100.0);
        assert!((pulse.value().unwrap() - 1.2).abs() < 1e-4);
    }

    #[test]
    fn test_sequence_spacing() {
        let anim = FloatAnimation::sequence(1000, &[0.0, -30.0, 0.0], Easing::Linear);
        assert_eq!(anim.sample_at(0.25), Some(-15.0));
        assert_eq!(anim.sample_at(0.5), Some(-30.0));
    }

    #[test]
    fn test_empty_track_has_no_value() {
        let anim = FloatAnimation::new(1000);
        assert!(anim.value().is_none());
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut anim = FloatAnimation::new(1000).at(0.0, 0.0).at(1.0, 1.0);
        anim.start();
        anim.tick(f32::NAN);
        anim.tick(-10.0);
        assert_eq!(anim.progress(), 0.0);
    }
}
