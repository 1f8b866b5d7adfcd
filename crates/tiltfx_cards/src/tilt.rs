//! Tilt projection
//!
//! Maps smoothed pointer offsets to a rotation pair. The horizontal offset turns
//! the card about its vertical axis (`rotate_y`) and the vertical offset about
//! its horizontal axis (`rotate_x`, inverted), so the card dips toward the
//! pointer: moving right pushes the right edge away, moving down brings the top
//! edge forward.

use tiltfx_core::Transform3D;

/// Pixel offset that maps to full tilt
pub const DEFAULT_INPUT_RANGE: f32 = 300.0;

/// Rotation pair applied to the card root, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltAngles {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl TiltAngles {
    pub const ZERO: TiltAngles = TiltAngles {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    pub const fn new(rotate_x: f32, rotate_y: f32) -> Self {
        Self { rotate_x, rotate_y }
    }

    pub fn is_finite(&self) -> bool {
        self.rotate_x.is_finite() && self.rotate_y.is_finite()
    }

    /// Clamp both axes to `±max_degrees`
    pub fn clamped(&self, max_degrees: f32) -> Self {
        let max = max_degrees.abs();
        Self {
            rotate_x: self.rotate_x.clamp(-max, max),
            rotate_y: self.rotate_y.clamp(-max, max),
        }
    }

    /// Largest absolute rotation across both axes
    pub fn magnitude(&self) -> f32 {
        self.rotate_x.abs().max(self.rotate_y.abs())
    }

    pub fn to_transform(&self) -> Transform3D {
        Transform3D::tilt(self.rotate_x, self.rotate_y)
    }
}

/// Project already-normalized offsets (`-1..=1`) into clamped angles
pub fn project(x: f32, y: f32, max_degrees: f32) -> TiltAngles {
    TiltAngles::new(-y * max_degrees, x * max_degrees).clamped(max_degrees)
}

/// Linear pixel-offset to angle projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltProjector {
    max_degrees: f32,
    input_range: f32,
}

impl TiltProjector {
    /// Projector with a custom input range
    ///
    /// Non-positive or non-finite values fall back to the defaults (15° over
    /// 300px).
    pub fn new(max_degrees: f32, input_range: f32) -> Self {
        let max_degrees = if max_degrees.is_finite() && max_degrees > 0.0 {
            max_degrees
        } else {
            15.0
        };
        let input_range = if input_range.is_finite() && input_range > 0.0 {
            input_range
        } else {
            DEFAULT_INPUT_RANGE
        };
        Self {
            max_degrees,
            input_range,
        }
    }

    pub fn max_degrees(&self) -> f32 {
        self.max_degrees
    }

    pub fn input_range(&self) -> f32 {
        self.input_range
    }

    /// Spring outputs (pixels) to angles, clamped to `±max_degrees`
    pub fn project(&self, spring_x: f32, spring_y: f32) -> TiltAngles {
        project(
            spring_x / self.input_range,
            spring_y / self.input_range,
            self.max_degrees,
        )
    }
}

impl Default for TiltProjector {
    fn default() -> Self {
        Self::new(15.0, DEFAULT_INPUT_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_are_swapped_and_inverted() {
        let p = TiltProjector::default();
        let a = p.project(150.0, 0.0);
        assert_eq!(a, TiltAngles::new(0.0, 7.5));

        let a = p.project(0.0, -120.0);
        assert_eq!(a.rotate_y, 0.0);
        assert!((a.rotate_x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_right_pushes_right_edge_away() {
        let t = TiltProjector::default().project(200.0, 0.0).to_transform();
        assert!(t.surface_depth(120.0, 0.0) < 0.0);
    }

    #[test]
    fn test_output_is_clamped() {
        let p = TiltProjector::new(15.0, 300.0);
        let a = p.project(10_000.0, -10_000.0);
        assert_eq!(a, TiltAngles::new(15.0, 15.0));
        assert_eq!(project(-3.0, 3.0, 10.0), TiltAngles::new(-10.0, -10.0));
    }

    #[test]
    fn test_invalid_parameters_fall_back() {
        let p = TiltProjector::new(f32::NAN, 0.0);
        assert_eq!(p, TiltProjector::default());
    }

    #[test]
    fn test_compact_mapping_matches_divide_by_twenty() {
        // 15° over 300px is the same slope as offset / 20
        let a = TiltProjector::default().project(100.0, 60.0);
        assert!((a.rotate_y - 100.0 / 20.0).abs() < 1e-5);
        assert!((a.rotate_x + 60.0 / 20.0).abs() < 1e-5);
    }
}
