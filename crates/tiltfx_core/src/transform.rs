//! 3D card transform
//!
//! A flattened CSS-style transform: `perspective() translate3d() rotateX() rotateY()
//! rotateZ() scale()`. Components at their identity value are omitted when the
//! transform is rendered, so an untouched card renders as `none`.

use crate::color::trim_float;

/// Transform applied to a card root or one of its layers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    /// Perspective distance in pixels (`None` = flat)
    pub perspective: Option<f32>,
    pub translate_x: f32,
    pub translate_y: f32,
    pub translate_z: f32,
    /// Rotation about the horizontal axis, degrees
    pub rotate_x: f32,
    /// Rotation about the vertical axis, degrees
    pub rotate_y: f32,
    /// In-plane rotation, degrees
    pub rotate_z: f32,
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D {
        perspective: None,
        translate_x: 0.0,
        translate_y: 0.0,
        translate_z: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: 0.0,
        scale: 1.0,
    };

    /// Tilt-only transform
    pub fn tilt(rotate_x: f32, rotate_y: f32) -> Self {
        Self {
            rotate_x,
            rotate_y,
            ..Self::IDENTITY
        }
    }

    /// Translation-only transform
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            translate_z: z,
            ..Self::IDENTITY
        }
    }

    pub fn with_perspective(mut self, distance: f32) -> Self {
        self.perspective = Some(distance);
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self.translate_z = z;
        self
    }

    pub fn with_rotate_z(mut self, degrees: f32) -> Self {
        self.rotate_z = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when every component is a finite number
    ///
    /// A non-finite transform would break the rendered surface, so callers
    /// must not commit one.
    pub fn is_finite(&self) -> bool {
        self.perspective.map_or(true, f32::is_finite)
            && self.translate_x.is_finite()
            && self.translate_y.is_finite()
            && self.translate_z.is_finite()
            && self.rotate_x.is_finite()
            && self.rotate_y.is_finite()
            && self.rotate_z.is_finite()
            && self.scale.is_finite()
    }

    /// Depth offset of a surface point after rotation (positive = toward the viewer)
    ///
    /// `x`/`y` are measured from the card center in CSS pixels (y down). Rotation
    /// order matches the CSS list: `rotateY` is applied to the point first, then
    /// `rotateX`.
    pub fn surface_depth(&self, x: f32, y: f32) -> f32 {
        let ax = self.rotate_x.to_radians();
        let ay = self.rotate_y.to_radians();
        let z_after_y = -ay.sin() * x;
        ax.sin() * y + ax.cos() * z_after_y
    }

    /// CSS `transform` value
    pub fn to_css(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(p) = self.perspective {
            parts.push(format!("perspective({}px)", trim_float(p)));
        }
        if self.translate_x != 0.0 || self.translate_y != 0.0 || self.translate_z != 0.0 {
            parts.push(format!(
                "translate3d({}px, {}px, {}px)",
                trim_float(self.translate_x),
                trim_float(self.translate_y),
                trim_float(self.translate_z)
            ));
        }
        if self.rotate_x != 0.0 {
            parts.push(format!("rotateX({}deg)", trim_float(self.rotate_x)));
        }
        if self.rotate_y != 0.0 {
            parts.push(format!("rotateY({}deg)", trim_float(self.rotate_y)));
        }
        if self.rotate_z != 0.0 {
            parts.push(format!("rotateZ({}deg)", trim_float(self.rotate_z)));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({})", trim_float(self.scale)));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_css() {
        assert_eq!(Transform3D::IDENTITY.to_css(), "none");
        assert!(Transform3D::default().is_identity());
    }

    #[test]
    fn test_full_css_order() {
        let t = Transform3D::tilt(5.0, -2.5)
            .with_perspective(1000.0)
            .with_translate(0.0, -10.0, 0.0)
            .with_scale(1.02);
        assert_eq!(
            t.to_css(),
            concat!(
                "perspective(1000px) translate3d(0px, -10px, 0px) ",
                "rotateX(5deg) rotateY(-2.5deg) scale(1.02)"
            )
        );
    }

    #[test]
    fn test_positive_rotate_y_pushes_right_edge_away() {
        let t = Transform3D::tilt(0.0, 10.0);
        assert!(t.surface_depth(100.0, 0.0) < 0.0);
        assert!(t.surface_depth(-100.0, 0.0) > 0.0);
    }

    #[test]
    fn test_positive_rotate_x_pushes_top_edge_away() {
        let t = Transform3D::tilt(10.0, 0.0);
        assert!(t.surface_depth(0.0, -80.0) < 0.0);
        assert!(t.surface_depth(0.0, 80.0) > 0.0);
    }

    #[test]
    fn test_non_finite_detected() {
        assert!(!Transform3D::tilt(f32::NAN, 0.0).is_finite());
        assert!(!Transform3D::IDENTITY.with_perspective(f32::INFINITY).is_finite());
        assert!(Transform3D::tilt(15.0, -15.0).is_finite());
    }
}
