//! Color and visual types
//!
//! Colors are stored as straight (non-premultiplied) RGBA in the 0..1 range and
//! rendered back to CSS syntax for the surfaces that consume card styles.

use smallvec::SmallVec;

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// `#rrggbb`, ignoring alpha
    pub fn to_hex_string(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// CSS color syntax. Opaque colors render as hex, translucent ones as `rgba()`.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            self.to_hex_string()
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                trim_float(self.a.max(0.0))
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format a float without trailing zeros (`0.2`, `1`, `0.35`)
pub(crate) fn trim_float(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Direction of a linear gradient
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GradientDirection {
    /// `to bottom right` (`bg-gradient-to-br`)
    #[default]
    ToBottomRight,
    /// `to right` (`bg-gradient-to-r`)
    ToRight,
    /// Explicit angle in degrees
    Angle(f32),
}

impl GradientDirection {
    fn to_css(self) -> String {
        match self {
            GradientDirection::ToBottomRight => "to bottom right".to_string(),
            GradientDirection::ToRight => "to right".to_string(),
            GradientDirection::Angle(deg) => format!("{}deg", trim_float(deg)),
        }
    }
}

/// Linear gradient used for card backgrounds and border highlights
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub direction: GradientDirection,
    /// Color stops sorted by offset
    pub stops: SmallVec<[GradientStop; 3]>,
}

impl Gradient {
    /// Two-color gradient
    pub fn linear(direction: GradientDirection, from: Color, to: Color) -> Self {
        let mut stops = SmallVec::new();
        stops.push(GradientStop::new(0.0, from));
        stops.push(GradientStop::new(1.0, to));
        Self { direction, stops }
    }

    /// Three-color `from / via / to` gradient
    pub fn with_via(direction: GradientDirection, from: Color, via: Color, to: Color) -> Self {
        let mut stops = SmallVec::new();
        stops.push(GradientStop::new(0.0, from));
        stops.push(GradientStop::new(0.5, via));
        stops.push(GradientStop::new(1.0, to));
        Self { direction, stops }
    }

    /// Rotate the stop colors by one position (`a b c` -> `c a b`)
    ///
    /// Used by cycling border animations.
    pub fn rotated(&self, steps: usize) -> Self {
        let colors: SmallVec<[Color; 3]> = self.stops.iter().map(|s| s.color).collect();
        let n = colors.len();
        let mut out = self.clone();
        if n == 0 {
            return out;
        }
        for (i, stop) in out.stops.iter_mut().enumerate() {
            stop.color = colors[(i + n - steps % n) % n];
        }
        out
    }

    pub fn first_color(&self) -> Color {
        self.stops
            .first()
            .map(|s| s.color)
            .unwrap_or(Color::BLACK)
    }

    pub fn last_color(&self) -> Color {
        self.stops.last().map(|s| s.color).unwrap_or(Color::BLACK)
    }

    /// CSS `linear-gradient(...)` syntax
    pub fn to_css(&self) -> String {
        let stops: Vec<String> = self.stops.iter().map(|s| s.color.to_css()).collect();
        format!(
            "linear-gradient({}, {})",
            self.direction.to_css(),
            stops.join(", ")
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shadow
// ─────────────────────────────────────────────────────────────────────────────

/// Box shadow, used for glow rings
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread: 0.0,
            color,
        }
    }

    /// Centered glow ring (`0 0 {blur}px color`)
    pub fn glow(blur: f32, color: Color) -> Self {
        Self::new(0.0, 0.0, blur, color)
    }

    /// Scale the shadow alpha by `factor` (hover fades)
    pub fn faded(&self, factor: f32) -> Self {
        let mut out = *self;
        out.color.a *= factor.clamp(0.0, 1.0);
        out
    }

    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}",
            trim_float(self.offset_x),
            trim_float(self.offset_y),
            trim_float(self.blur),
            self.color.to_css()
        )
    }
}
