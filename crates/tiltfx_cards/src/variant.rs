//! Card variants
//!
//! A [`CardVariant`] is the immutable visual recipe for one card treatment:
//! surface, border, glow, padding, hover lift and the fixed list of decorative
//! layers stacked around the content plane.

use crate::palette::{ThemeColor, ThemePalette};
use serde::Deserialize;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use tiltfx_core::{Color, Gradient, GradientDirection, Point, Shadow};

/// z-index of the content plane; layers above it must not hide content
pub const CONTENT_Z_INDEX: i32 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Layers
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of decorative layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Drifting background gradient
    Gradient,
    /// Slowly rotating accent dots
    Particles,
    /// Light band sweeping across the surface
    Scanline,
    /// Gradient border highlight
    Border,
    /// Outer glow ring
    Glow,
}

impl LayerKind {
    /// Default stacking position
    pub fn default_z_index(self) -> i32 {
        match self {
            LayerKind::Gradient => 0,
            LayerKind::Scanline => 1,
            LayerKind::Particles => 2,
            LayerKind::Glow => 5,
            LayerKind::Border => 20,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Gradient => "gradient",
            LayerKind::Particles => "particles",
            LayerKind::Scanline => "scanline",
            LayerKind::Border => "border",
            LayerKind::Glow => "glow",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When a layer is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerReveal {
    Always,
    /// Fades in while the card is hovered
    OnHover,
}

/// A decorative layer declaration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorativeLayer {
    pub kind: LayerKind,
    pub z_index: i32,
    /// Whether the layer's clock runs regardless of hover
    pub always_animating: bool,
    pub reveal: LayerReveal,
    /// Opacity transition duration for hover reveals (seconds)
    pub fade_duration: f32,
}

impl DecorativeLayer {
    pub fn new(kind: LayerKind) -> Self {
        let (reveal, fade_duration) = match kind {
            LayerKind::Glow => (LayerReveal::OnHover, 0.3),
            LayerKind::Particles => (LayerReveal::Always, 0.5),
            _ => (LayerReveal::OnHover, 0.5),
        };
        Self {
            kind,
            z_index: kind.default_z_index(),
            always_animating: true,
            reveal,
            fade_duration,
        }
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn reveal(mut self, reveal: LayerReveal) -> Self {
        self.reveal = reveal;
        self
    }

    pub fn always_animating(mut self, always: bool) -> Self {
        self.always_animating = always;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Styles
// ─────────────────────────────────────────────────────────────────────────────

/// Card surface fill
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Solid(Color),
    Gradient(Gradient),
}

impl Background {
    pub fn to_css(&self) -> String {
        match self {
            Background::Solid(color) => color.to_css(),
            Background::Gradient(gradient) => gradient.to_css(),
        }
    }
}

/// Card border and its hover highlight
#[derive(Clone, Debug, PartialEq)]
pub struct BorderStyle {
    pub width: f32,
    pub color: Color,
    /// Gradient drawn by the border layer
    pub highlight: Gradient,
    /// Whether the highlight colors cycle over time
    pub cycling: bool,
    /// Thin accent bar along the top edge, scaled in on hover
    pub accent_bar: Option<Gradient>,
}

/// Glow ring(s) drawn by the glow layer
#[derive(Clone, Debug, PartialEq)]
pub struct GlowStyle {
    pub shadows: SmallVec<[Shadow; 3]>,
    /// Alternate ring set the glow pulses toward, if animated
    pub pulse: Option<SmallVec<[Shadow; 3]>>,
    /// Cycle length of the pulse (seconds)
    pub pulse_duration: f32,
}

impl GlowStyle {
    pub fn new(shadows: SmallVec<[Shadow; 3]>) -> Self {
        Self {
            shadows,
            pulse: None,
            pulse_duration: 3.0,
        }
    }

    /// Scale every ring's alpha
    pub fn intensified(&self, factor: f32) -> Self {
        let scale = |shadows: &SmallVec<[Shadow; 3]>| -> SmallVec<[Shadow; 3]> {
            shadows
                .iter()
                .map(|s| {
                    let mut s = *s;
                    s.color.a = (s.color.a * factor).clamp(0.0, 1.0);
                    s
                })
                .collect()
        };
        Self {
            shadows: scale(&self.shadows),
            pulse: self.pulse.as_ref().map(scale),
            pulse_duration: self.pulse_duration,
        }
    }

    pub fn to_css(&self) -> String {
        self.shadows
            .iter()
            .map(Shadow::to_css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which card corner a particle is inset from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Breathing animation on a particle dot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    /// Peak scale (`[1, peak, 1]`)
    pub scale_peak: f32,
    /// Opacity range (`[low, high, low]`)
    pub opacity: (f32, f32),
    pub duration: f32,
    pub delay: f32,
}

/// One accent dot on the particles layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDot {
    pub corner: Corner,
    /// Inset from `corner`, in px
    pub inset: Point,
    pub diameter: f32,
    pub color: Color,
    pub pulse: Option<Pulse>,
}

impl ParticleDot {
    fn new(corner: Corner, inset: Point, diameter: f32, color: Color) -> Self {
        Self {
            corner,
            inset,
            diameter,
            color,
            pulse: None,
        }
    }

    fn pulsing(mut self, pulse: Pulse) -> Self {
        self.pulse = Some(pulse);
        self
    }
}

/// Padding preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl CardSize {
    /// Inner padding in px
    pub fn padding(self) -> f32 {
        match self {
            CardSize::Sm => 16.0,
            CardSize::Md => 24.0,
            CardSize::Lg => 32.0,
            CardSize::Xl => 40.0,
        }
    }
}

/// Lift and scale blended in while hovered
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverLift {
    /// Vertical offset at full hover (px, negative is up)
    pub lift: f32,
    pub scale: f32,
    /// Transition duration (seconds)
    pub duration: f32,
}

impl HoverLift {
    pub const NONE: HoverLift = HoverLift {
        lift: 0.0,
        scale: 1.0,
        duration: 0.3,
    };

    /// Interactive card lift: 10px, 2%
    pub fn interactive() -> Self {
        Self {
            lift: -10.0,
            scale: 1.02,
            duration: 0.3,
        }
    }

    /// Advanced card lift: 15px, 3%
    pub fn advanced() -> Self {
        Self {
            lift: -15.0,
            scale: 1.03,
            duration: 0.4,
        }
    }

    /// Holographic card lift: 15px, 5%
    pub fn holographic() -> Self {
        Self {
            lift: -15.0,
            scale: 1.05,
            duration: 0.4,
        }
    }
}

impl Default for HoverLift {
    fn default() -> Self {
        Self::advanced()
    }
}

/// Holographic overlay strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoloIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl HoloIntensity {
    /// `(from/via/to)` overlay alphas
    fn alphas(self) -> (f32, f32, f32) {
        match self {
            HoloIntensity::Low => (0.1, 0.05, 0.1),
            HoloIntensity::Medium => (0.2, 0.1, 0.2),
            HoloIntensity::High => (0.3, 0.2, 0.3),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variant
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable visual recipe for a card
#[derive(Clone, Debug, PartialEq)]
pub struct CardVariant {
    pub key: String,
    pub background: Background,
    pub border: BorderStyle,
    pub glow: GlowStyle,
    pub size: CardSize,
    pub hover: HoverLift,
    /// Gradient drawn by the gradient layer
    pub overlay: Gradient,
    /// Gradient layer drift cycle (seconds)
    pub overlay_cycle: f32,
    pub particles: SmallVec<[ParticleDot; 4]>,
    /// Layers in declaration order
    pub layers: SmallVec<[DecorativeLayer; 5]>,
}

impl CardVariant {
    pub fn padding(&self) -> f32 {
        self.size.padding()
    }

    pub fn has_layer(&self, kind: LayerKind) -> bool {
        self.layers.iter().any(|l| l.kind == kind)
    }

    pub fn layer_kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.layers.iter().map(|l| l.kind)
    }

    /// Replace the layer list, keeping each kind's default declaration
    pub fn with_layers(mut self, kinds: &[LayerKind]) -> Self {
        self.layers = kinds.iter().map(|k| self.declaration_for(*k)).collect();
        self
    }

    fn declaration_for(&self, kind: LayerKind) -> DecorativeLayer {
        self.layers
            .iter()
            .find(|l| l.kind == kind)
            .copied()
            .unwrap_or_else(|| DecorativeLayer::new(kind))
    }

    // ── built-in recipes ─────────────────────────────────────────────────────

    /// Plain card surface with neutral border
    pub fn default_variant(palette: &ThemePalette) -> Self {
        Self {
            key: "default".to_string(),
            background: Background::Solid(palette.card),
            border: BorderStyle {
                width: 1.0,
                color: palette.border,
                highlight: highlight(palette, 0.2),
                cycling: false,
                accent_bar: None,
            },
            glow: GlowStyle::new(smallvec![Shadow::glow(
                20.0,
                palette.alpha(ThemeColor::Primary, 0.2)
            )]),
            size: CardSize::Md,
            hover: HoverLift::advanced(),
            overlay: soft_overlay(palette),
            overlay_cycle: 3.0,
            particles: corner_dots(palette, false),
            layers: layers(&[
                LayerKind::Gradient,
                LayerKind::Particles,
                LayerKind::Border,
                LayerKind::Glow,
            ]),
        }
    }

    /// Layered gradient surface with a top accent bar
    pub fn premium(palette: &ThemePalette) -> Self {
        let card = palette.card;
        Self {
            key: "premium".to_string(),
            background: Background::Gradient(Gradient::with_via(
                GradientDirection::ToBottomRight,
                card,
                card.with_alpha(0.95),
                card.with_alpha(0.9),
            )),
            border: BorderStyle {
                width: 2.0,
                color: palette.alpha(ThemeColor::Primary, 0.2),
                highlight: highlight(palette, 0.2),
                cycling: false,
                accent_bar: Some(Gradient::with_via(
                    GradientDirection::ToRight,
                    palette.primary,
                    palette.accent,
                    palette.secondary,
                )),
            },
            glow: GlowStyle::new(smallvec![Shadow::glow(
                30.0,
                palette.alpha(ThemeColor::Primary, 0.25)
            )]),
            size: CardSize::Md,
            hover: HoverLift::advanced(),
            overlay: soft_overlay(palette),
            overlay_cycle: 3.0,
            particles: corner_dots(palette, true),
            layers: layers(&[
                LayerKind::Gradient,
                LayerKind::Particles,
                LayerKind::Border,
                LayerKind::Glow,
            ]),
        }
    }

    /// Translucent surface, no glow
    pub fn glass(palette: &ThemePalette) -> Self {
        Self {
            key: "glass".to_string(),
            background: Background::Solid(palette.card.with_alpha(0.8)),
            border: BorderStyle {
                width: 1.0,
                color: Color::WHITE.with_alpha(0.1),
                highlight: highlight(palette, 0.2),
                cycling: false,
                accent_bar: None,
            },
            glow: GlowStyle::new(SmallVec::new()),
            size: CardSize::Md,
            hover: HoverLift::advanced(),
            overlay: soft_overlay(palette),
            overlay_cycle: 3.0,
            particles: corner_dots(palette, false),
            layers: layers(&[LayerKind::Gradient, LayerKind::Particles, LayerKind::Border]),
        }
    }

    /// Double glow ring and border, nothing else
    pub fn neon(palette: &ThemePalette) -> Self {
        Self {
            key: "neon".to_string(),
            background: Background::Solid(palette.card),
            border: BorderStyle {
                width: 1.0,
                color: palette.alpha(ThemeColor::Primary, 0.3),
                highlight: highlight(palette, 0.3),
                cycling: false,
                accent_bar: None,
            },
            glow: GlowStyle::new(smallvec![
                Shadow::glow(20.0, palette.alpha(ThemeColor::Primary, 0.3)),
                Shadow::glow(40.0, palette.alpha(ThemeColor::Primary, 0.2)),
            ]),
            size: CardSize::Md,
            hover: HoverLift::advanced(),
            overlay: soft_overlay(palette),
            overlay_cycle: 3.0,
            particles: SmallVec::new(),
            layers: layers(&[LayerKind::Glow, LayerKind::Border]),
        }
    }

    /// Tinted gradient surface
    pub fn gradient(palette: &ThemePalette) -> Self {
        Self {
            key: "gradient".to_string(),
            background: Background::Gradient(Gradient::with_via(
                GradientDirection::ToBottomRight,
                palette.alpha(ThemeColor::Primary, 0.05),
                palette.card,
                palette.alpha(ThemeColor::Accent, 0.05),
            )),
            border: BorderStyle {
                width: 1.0,
                color: palette.alpha(ThemeColor::Primary, 0.2),
                highlight: highlight(palette, 0.2),
                cycling: false,
                accent_bar: None,
            },
            glow: GlowStyle::new(smallvec![Shadow::glow(
                20.0,
                palette.alpha(ThemeColor::Primary, 0.2)
            )]),
            size: CardSize::Md,
            hover: HoverLift::advanced(),
            overlay: soft_overlay(palette),
            overlay_cycle: 3.0,
            particles: corner_dots(palette, false),
            layers: layers(&[
                LayerKind::Gradient,
                LayerKind::Particles,
                LayerKind::Border,
                LayerKind::Glow,
            ]),
        }
    }

    /// Iridescent overlay, scanlines, pulsing dots and a cycling border
    pub fn holographic(palette: &ThemePalette, intensity: HoloIntensity) -> Self {
        let (from, via, to) = intensity.alphas();
        Self {
            key: "holographic".to_string(),
            background: Background::Solid(palette.card),
            border: BorderStyle {
                width: 2.0,
                color: palette.alpha(ThemeColor::Primary, 0.2),
                highlight: Gradient::with_via(
                    GradientDirection::Angle(45.0),
                    palette.primary,
                    palette.accent,
                    palette.secondary,
                ),
                cycling: true,
                accent_bar: None,
            },
            glow: GlowStyle {
                shadows: smallvec![
                    Shadow::glow(20.0, palette.alpha(ThemeColor::Primary, 0.3)),
                    Shadow::glow(40.0, palette.alpha(ThemeColor::Primary, 0.2)),
                    Shadow::glow(60.0, palette.alpha(ThemeColor::Accent, 0.1)),
                ],
                pulse: Some(smallvec![
                    Shadow::glow(30.0, palette.alpha(ThemeColor::Accent, 0.4)),
                    Shadow::glow(50.0, palette.alpha(ThemeColor::Accent, 0.3)),
                    Shadow::glow(70.0, palette.alpha(ThemeColor::Secondary, 0.2)),
                ]),
                pulse_duration: 3.0,
            },
            size: CardSize::Md,
            hover: HoverLift::holographic(),
            overlay: Gradient::with_via(
                GradientDirection::ToBottomRight,
                palette.alpha(ThemeColor::Primary, from),
                palette.alpha(ThemeColor::Accent, via),
                palette.alpha(ThemeColor::Secondary, to),
            ),
            overlay_cycle: 4.0,
            particles: smallvec![
                ParticleDot::new(
                    Corner::TopLeft,
                    Point::new(16.0, 16.0),
                    12.0,
                    palette.alpha(ThemeColor::Primary, 0.4)
                )
                .pulsing(Pulse {
                    scale_peak: 1.2,
                    opacity: (0.4, 0.8),
                    duration: 2.0,
                    delay: 0.0,
                }),
                ParticleDot::new(
                    Corner::TopRight,
                    Point::new(48.0, 32.0),
                    8.0,
                    palette.alpha(ThemeColor::Accent, 0.6)
                )
                .pulsing(Pulse {
                    scale_peak: 1.5,
                    opacity: (0.3, 0.7),
                    duration: 3.0,
                    delay: 0.5,
                }),
                ParticleDot::new(
                    Corner::BottomLeft,
                    Point::new(32.0, 24.0),
                    6.0,
                    palette.alpha(ThemeColor::Secondary, 0.5)
                )
                .pulsing(Pulse {
                    scale_peak: 1.3,
                    opacity: (0.2, 0.6),
                    duration: 2.5,
                    delay: 1.0,
                }),
            ],
            layers: layers(&[
                LayerKind::Gradient,
                LayerKind::Scanline,
                LayerKind::Particles,
                LayerKind::Glow,
                LayerKind::Border,
            ]),
        }
    }
}

fn layers(kinds: &[LayerKind]) -> SmallVec<[DecorativeLayer; 5]> {
    kinds.iter().copied().map(DecorativeLayer::new).collect()
}

fn highlight(palette: &ThemePalette, alpha: f32) -> Gradient {
    Gradient::with_via(
        GradientDirection::ToRight,
        palette.alpha(ThemeColor::Primary, alpha),
        palette.alpha(ThemeColor::Accent, alpha),
        palette.alpha(ThemeColor::Secondary, alpha),
    )
}

fn soft_overlay(palette: &ThemePalette) -> Gradient {
    Gradient::with_via(
        GradientDirection::ToBottomRight,
        palette.alpha(ThemeColor::Primary, 0.05),
        Color::TRANSPARENT,
        palette.alpha(ThemeColor::Accent, 0.05),
    )
}

fn corner_dots(palette: &ThemePalette, fourth: bool) -> SmallVec<[ParticleDot; 4]> {
    let mut dots: SmallVec<[ParticleDot; 4]> = smallvec![
        ParticleDot::new(
            Corner::TopLeft,
            Point::new(16.0, 16.0),
            8.0,
            palette.alpha(ThemeColor::Primary, 0.4)
        ),
        ParticleDot::new(
            Corner::TopRight,
            Point::new(48.0, 32.0),
            6.0,
            palette.alpha(ThemeColor::Accent, 0.6)
        ),
        ParticleDot::new(
            Corner::BottomLeft,
            Point::new(32.0, 24.0),
            4.0,
            palette.alpha(ThemeColor::Secondary, 0.5)
        ),
    ];
    if fourth {
        dots.push(ParticleDot::new(
            Corner::BottomRight,
            Point::new(16.0, 16.0),
            6.0,
            palette.alpha(ThemeColor::Primary, 0.3),
        ));
    }
    dots
}
