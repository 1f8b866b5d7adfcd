//! Layer composition
//!
//! The [`LayerComposer`] turns a variant recipe, the current tilt and the hover
//! flag into a [`ComposedCard`]: a root transform, a content plane pushed
//! forward in z, and the decorative layers in stable z-order.
//!
//! Every decorative layer runs its looping tracks on its own clock, advanced by
//! [`LayerComposer::advance`]. Hover-revealed layers fade in and out on a
//! per-layer transition driven only by the hovered flag, never by tilt. The
//! composer owns no timers; the card drives `advance` from a scheduler tick.

use crate::tilt::TiltAngles;
use crate::variant::{
    Background, CardVariant, Corner, DecorativeLayer, LayerKind, LayerReveal, ParticleDot,
    CONTENT_Z_INDEX,
};
use smallvec::SmallVec;
use std::sync::Arc;
use tiltfx_animation::{Easing, FloatAnimation, Interpolate};
use tiltfx_core::{Color, Gradient, Point, PointerEvents, Shadow, Size, Transform3D};

/// Distance the content plane floats above the card surface (px)
pub const CONTENT_DEPTH: f32 = 20.0;

/// Particle layer revolution period (seconds)
const PARTICLE_SPIN: f32 = 20.0;

/// Scanline sweep period (seconds)
const SCANLINE_SWEEP: f32 = 2.0;

/// Border color cycle period (seconds)
const BORDER_CYCLE: f32 = 2.0;

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

/// A particle dot ready to draw, in card-local coordinates before layer rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedDot {
    pub center: Point,
    pub diameter: f32,
    pub scale: f32,
    pub color: Color,
}

/// What a layer paints this frame
#[derive(Clone, Debug, PartialEq)]
pub enum LayerPaint {
    /// Overlay gradient; `position` is the background-position drift (0..1)
    Gradient { gradient: Gradient, position: f32 },
    /// Accent dots; the layer transform carries the slow spin
    Particles { dots: SmallVec<[RenderedDot; 4]> },
    /// Light band; `offset` sweeps from -1 (left) to 1 (right)
    Scanline { offset: f32, color: Color },
    /// Border highlight and optional accent bar (`scale_x` 0..1)
    Border {
        width: f32,
        gradient: Gradient,
        accent_bar: Option<(Gradient, f32)>,
    },
    Glow { shadows: SmallVec<[Shadow; 3]> },
}

/// A decorative layer for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedLayer {
    pub kind: LayerKind,
    pub z_index: i32,
    pub opacity: f32,
    pub transform: Transform3D,
    pub pointer_events: PointerEvents,
    pub paint: LayerPaint,
}

/// The content plane holding caller-supplied content
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentPlane {
    pub transform: Transform3D,
    pub z_index: i32,
    pub padding: f32,
    pub pointer_events: PointerEvents,
}

/// Everything needed to draw a card for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedCard {
    pub variant: String,
    pub size: Size,
    pub root: Transform3D,
    /// Root opacity (entrance fade)
    pub opacity: f32,
    pub background: Background,
    pub border_width: f32,
    pub border_color: Color,
    pub content: ContentPlane,
    /// Decorative layers sorted by `(z_index, declaration order)`
    pub layers: Vec<RenderedLayer>,
    /// 0..1 eased hover blend
    pub hover_progress: f32,
}

impl ComposedCard {
    /// Layers stacked below the content plane
    pub fn layers_below(&self) -> impl Iterator<Item = &RenderedLayer> {
        self.layers.iter().filter(|l| l.z_index < self.content.z_index)
    }

    /// Layers stacked above the content plane
    pub fn layers_above(&self) -> impl Iterator<Item = &RenderedLayer> {
        self.layers.iter().filter(|l| l.z_index >= self.content.z_index)
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&RenderedLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer clocks
// ─────────────────────────────────────────────────────────────────────────────

struct DotPulse {
    scale: FloatAnimation,
    opacity: FloatAnimation,
}

enum LayerClock {
    Gradient { drift: FloatAnimation },
    Particles {
        spin: FloatAnimation,
        pulses: SmallVec<[Option<DotPulse>; 4]>,
    },
    Scanline { sweep: FloatAnimation },
    Border { cycle: FloatAnimation },
    Glow { pulse: Option<FloatAnimation> },
}

fn run_forever(anim: FloatAnimation) -> FloatAnimation {
    let mut anim = anim.looping(true);
    anim.start();
    anim
}

fn secs_to_ms(secs: f32) -> u32 {
    (secs.max(0.0) * 1000.0).round() as u32
}

impl LayerClock {
    fn for_layer(kind: LayerKind, variant: &CardVariant) -> Self {
        match kind {
            LayerKind::Gradient => LayerClock::Gradient {
                drift: run_forever(FloatAnimation::sequence(
                    secs_to_ms(variant.overlay_cycle),
                    &[0.0, 1.0, 0.0],
                    Easing::Linear,
                )),
            },
            LayerKind::Particles => LayerClock::Particles {
                spin: run_forever(
                    FloatAnimation::new(secs_to_ms(PARTICLE_SPIN))
                        .at(0.0, 0.0)
                        .at(1.0, 360.0),
                ),
                pulses: variant
                    .particles
                    .iter()
                    .map(|dot| {
                        dot.pulse.map(|p| DotPulse {
                            scale: run_forever(
                                FloatAnimation::sequence(
                                    secs_to_ms(p.duration),
                                    &[1.0, p.scale_peak, 1.0],
                                    Easing::EaseInOut,
                                )
                                .delay(secs_to_ms(p.delay)),
                            ),
                            opacity: run_forever(
                                FloatAnimation::sequence(
                                    secs_to_ms(p.duration),
                                    &[p.opacity.0, p.opacity.1, p.opacity.0],
                                    Easing::EaseInOut,
                                )
                                .delay(secs_to_ms(p.delay)),
                            ),
                        })
                    })
                    .collect(),
            },
            LayerKind::Scanline => LayerClock::Scanline {
                sweep: run_forever(
                    FloatAnimation::new(secs_to_ms(SCANLINE_SWEEP))
                        .at(0.0, -1.0)
                        .at(1.0, 1.0),
                ),
            },
            LayerKind::Border => LayerClock::Border {
                cycle: run_forever(
                    FloatAnimation::new(secs_to_ms(BORDER_CYCLE))
                        .at(0.0, 0.0)
                        .at(1.0, 3.0),
                ),
            },
            LayerKind::Glow => LayerClock::Glow {
                pulse: variant.glow.pulse.as_ref().map(|_| {
                    run_forever(FloatAnimation::sequence(
                        secs_to_ms(variant.glow.pulse_duration),
                        &[0.0, 1.0, 0.0],
                        Easing::EaseInOut,
                    ))
                }),
            },
        }
    }

    fn tick(&mut self, dt_ms: f32) {
        match self {
            LayerClock::Gradient { drift } => drift.tick(dt_ms),
            LayerClock::Particles { spin, pulses } => {
                spin.tick(dt_ms);
                for pulse in pulses.iter_mut().flatten() {
                    pulse.scale.tick(dt_ms);
                    pulse.opacity.tick(dt_ms);
                }
            }
            LayerClock::Scanline { sweep } => sweep.tick(dt_ms),
            LayerClock::Border { cycle } => cycle.tick(dt_ms),
            LayerClock::Glow { pulse } => {
                if let Some(pulse) = pulse {
                    pulse.tick(dt_ms);
                }
            }
        }
    }
}

struct LayerState {
    layer: DecorativeLayer,
    /// Linear 0..1 progress of the reveal transition
    fade: f32,
    clock: LayerClock,
}

// ─────────────────────────────────────────────────────────────────────────────
// Composer
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the per-frame card description for one card instance
pub struct LayerComposer {
    variant: Arc<CardVariant>,
    size: Size,
    perspective: f32,
    /// Layers sorted once at construction
    layers: Vec<LayerState>,
    hovered: bool,
    /// Linear 0..1 progress of the hover lift
    hover_t: f32,
}

impl LayerComposer {
    pub fn new(variant: Arc<CardVariant>, size: Size, perspective: f32) -> Self {
        let mut layers: Vec<LayerState> = variant
            .layers
            .iter()
            .map(|layer| LayerState {
                layer: *layer,
                fade: if layer.reveal == LayerReveal::Always {
                    1.0
                } else {
                    0.0
                },
                clock: LayerClock::for_layer(layer.kind, &variant),
            })
            .collect();
        // Stable: equal z-indexes keep declaration order
        layers.sort_by_key(|state| state.layer.z_index);

        Self {
            variant,
            size,
            perspective,
            layers,
            hovered: false,
            hover_t: 0.0,
        }
    }

    pub fn variant(&self) -> &CardVariant {
        &self.variant
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Drop hover state: no lift, hover-revealed layers hidden
    ///
    /// Layer clocks keep their phase.
    pub fn reset_hover(&mut self) {
        self.hovered = false;
        self.hover_t = 0.0;
        for state in &mut self.layers {
            state.fade = if state.layer.reveal == LayerReveal::Always {
                1.0
            } else {
                0.0
            };
        }
    }

    /// Eased hover blend (0 = resting, 1 = fully lifted)
    pub fn hover_progress(&self) -> f32 {
        Easing::EaseOut.apply(self.hover_t)
    }

    /// Layer kinds in render order
    pub fn layer_order(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|s| s.layer.kind).collect()
    }

    /// Advance hover transitions and every running layer clock by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let lift_duration = self.variant.hover.duration.max(1e-3);
        self.hover_t = step_toward(self.hover_t, self.hovered, dt / lift_duration);

        let dt_ms = dt * 1000.0;
        for state in &mut self.layers {
            let visible_target = match state.layer.reveal {
                LayerReveal::Always => true,
                LayerReveal::OnHover => self.hovered,
            };
            let fade_duration = state.layer.fade_duration.max(1e-3);
            state.fade = step_toward(state.fade, visible_target, dt / fade_duration);

            if state.layer.always_animating || visible_target {
                state.clock.tick(dt_ms);
            }
        }
    }

    /// Describe the card for this frame
    pub fn compose(&mut self, tilt: TiltAngles, hovered: bool) -> ComposedCard {
        self.hovered = hovered;
        let hover = self.hover_progress();
        let lift = self.variant.hover;

        let root = Transform3D::tilt(tilt.rotate_x, tilt.rotate_y)
            .with_perspective(self.perspective)
            .with_translate(0.0, lift.lift * hover, 0.0)
            .with_scale(1.0 + (lift.scale - 1.0) * hover);

        let layers = self
            .layers
            .iter()
            .map(|state| self.render_layer(state, hover))
            .collect();

        ComposedCard {
            variant: self.variant.key.clone(),
            size: self.size,
            root,
            opacity: 1.0,
            background: self.variant.background.clone(),
            border_width: self.variant.border.width,
            border_color: self.variant.border.color,
            content: ContentPlane {
                transform: Transform3D::translate(0.0, 0.0, CONTENT_DEPTH),
                z_index: CONTENT_Z_INDEX,
                padding: self.variant.padding(),
                pointer_events: PointerEvents::Auto,
            },
            layers,
            hover_progress: hover,
        }
    }

    fn render_layer(&self, state: &LayerState, hover: f32) -> RenderedLayer {
        let variant = &self.variant;
        let mut transform = Transform3D::IDENTITY;

        let paint = match &state.clock {
            LayerClock::Gradient { drift } => LayerPaint::Gradient {
                gradient: variant.overlay.clone(),
                position: drift.value().unwrap_or(0.0),
            },
            LayerClock::Particles { spin, pulses } => {
                transform = transform.with_rotate_z(spin.value().unwrap_or(0.0));
                let dots = variant
                    .particles
                    .iter()
                    .zip(pulses.iter())
                    .map(|(dot, pulse)| self.render_dot(dot, pulse.as_ref()))
                    .collect();
                LayerPaint::Particles { dots }
            }
            LayerClock::Scanline { sweep } => LayerPaint::Scanline {
                offset: sweep.value().unwrap_or(-1.0),
                color: Color::WHITE.with_alpha(0.1),
            },
            LayerClock::Border { cycle } => {
                let border = &variant.border;
                let gradient = if border.cycling {
                    let step = cycle.value().unwrap_or(0.0).floor().max(0.0) as usize;
                    border.highlight.rotated(step % 3)
                } else {
                    border.highlight.clone()
                };
                LayerPaint::Border {
                    width: border.width,
                    gradient,
                    accent_bar: border.accent_bar.clone().map(|bar| (bar, hover)),
                }
            }
            LayerClock::Glow { pulse } => {
                let glow = &variant.glow;
                let shadows = match (pulse, &glow.pulse) {
                    (Some(track), Some(alternate)) => {
                        let t = track.value().unwrap_or(0.0);
                        glow.shadows
                            .iter()
                            .zip(alternate.iter())
                            .map(|(a, b)| blend_shadow(a, b, t))
                            .collect()
                    }
                    _ => glow.shadows.clone(),
                };
                LayerPaint::Glow { shadows }
            }
        };

        RenderedLayer {
            kind: state.layer.kind,
            z_index: state.layer.z_index,
            opacity: Easing::EaseOut.apply(state.fade),
            transform,
            pointer_events: PointerEvents::None,
            paint,
        }
    }

    fn render_dot(&self, dot: &ParticleDot, pulse: Option<&DotPulse>) -> RenderedDot {
        let (w, h) = (self.size.width, self.size.height);
        let center = match dot.corner {
            Corner::TopLeft => Point::new(dot.inset.x, dot.inset.y),
            Corner::TopRight => Point::new(w - dot.inset.x, dot.inset.y),
            Corner::BottomLeft => Point::new(dot.inset.x, h - dot.inset.y),
            Corner::BottomRight => Point::new(w - dot.inset.x, h - dot.inset.y),
        };
        let (scale, opacity) = match pulse {
            Some(p) => (
                p.scale.value().unwrap_or(1.0),
                p.opacity.value().unwrap_or(1.0),
            ),
            None => (1.0, 1.0),
        };
        let mut color = dot.color;
        color.a *= opacity;
        RenderedDot {
            center,
            diameter: dot.diameter,
            scale,
            color,
        }
    }
}

fn step_toward(t: f32, up: bool, delta: f32) -> f32 {
    if up {
        (t + delta).min(1.0)
    } else {
        (t - delta).max(0.0)
    }
}

fn blend_shadow(a: &Shadow, b: &Shadow, t: f32) -> Shadow {
    Shadow {
        offset_x: Interpolate::lerp(&a.offset_x, &b.offset_x, t),
        offset_y: Interpolate::lerp(&a.offset_y, &b.offset_y, t),
        blur: Interpolate::lerp(&a.blur, &b.blur, t),
        spread: Interpolate::lerp(&a.spread, &b.spread, t),
        color: Color::lerp(&a.color, &b.color, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ThemePalette;
    use crate::variant::HoloIntensity;

    const FRAME: f32 = 1.0 / 60.0;

    fn composer(variant: CardVariant) -> LayerComposer {
        LayerComposer::new(Arc::new(variant), Size::new(240.0, 160.0), 1000.0)
    }

    #[test]
    fn test_layers_sorted_by_z_then_declaration() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::holographic(&palette, HoloIntensity::Medium));
        assert_eq!(
            c.layer_order(),
            vec![
                LayerKind::Gradient,
                LayerKind::Scanline,
                LayerKind::Particles,
                LayerKind::Glow,
                LayerKind::Border,
            ]
        );

        let first: Vec<_> = c
            .compose(TiltAngles::ZERO, false)
            .layers
            .iter()
            .map(|l| (l.kind, l.z_index))
            .collect();
        for i in 0..120 {
            c.advance(FRAME);
            let frame = c.compose(TiltAngles::new(5.0, -3.0), i % 2 == 0);
            let order: Vec<_> = frame.layers.iter().map(|l| (l.kind, l.z_index)).collect();
            assert_eq!(order, first);
        }
    }

    #[test]
    fn test_equal_z_keeps_declaration_order() {
        let palette = ThemePalette::dark();
        let mut variant = CardVariant::default_variant(&palette);
        for layer in variant.layers.iter_mut() {
            layer.z_index = 3;
        }
        let c = composer(variant);
        assert_eq!(
            c.layer_order(),
            vec![
                LayerKind::Gradient,
                LayerKind::Particles,
                LayerKind::Border,
                LayerKind::Glow,
            ]
        );
    }

    #[test]
    fn test_decorative_layers_ignore_pointer() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::premium(&palette));
        let card = c.compose(TiltAngles::ZERO, true);
        assert!(card.layers.iter().all(|l| l.pointer_events == PointerEvents::None));
        assert_eq!(card.content.pointer_events, PointerEvents::Auto);
        assert!(card.content.transform.translate_z > 0.0);
    }

    #[test]
    fn test_root_carries_tilt_and_perspective() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::glass(&palette));
        let card = c.compose(TiltAngles::new(6.0, -3.0), false);
        assert_eq!(card.root.to_css(), "perspective(1000px) rotateX(6deg) rotateY(-3deg)");
    }

    #[test]
    fn test_hover_fades_depend_only_on_flag() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::neon(&palette));

        // Large tilt without hover never reveals the glow
        for _ in 0..60 {
            c.advance(FRAME);
            let card = c.compose(TiltAngles::new(15.0, 15.0), false);
            assert_eq!(card.layer(LayerKind::Glow).map(|l| l.opacity), Some(0.0));
        }

        // Hover with no tilt reveals it fully
        c.compose(TiltAngles::ZERO, true);
        for _ in 0..60 {
            c.advance(FRAME);
        }
        let card = c.compose(TiltAngles::ZERO, true);
        assert_eq!(card.layer(LayerKind::Glow).map(|l| l.opacity), Some(1.0));
        assert_eq!(card.hover_progress, 1.0);
        assert_eq!(card.root.translate_y, -15.0);
        assert!((card.root.scale - 1.03).abs() < 1e-6);
    }

    #[test]
    fn test_particles_spin_without_hover() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::default_variant(&palette));
        c.compose(TiltAngles::ZERO, false);
        for _ in 0..300 {
            c.advance(FRAME);
        }
        let card = c.compose(TiltAngles::ZERO, false);
        let particles = card.layer(LayerKind::Particles).unwrap();
        // 5s of a 20s revolution
        assert!((particles.transform.rotate_z - 90.0).abs() < 0.5);
        assert_eq!(particles.opacity, 1.0);
        match &particles.paint {
            LayerPaint::Particles { dots } => {
                assert_eq!(dots.len(), 3);
                assert_eq!(dots[1].center, Point::new(192.0, 32.0));
            }
            other => panic!("unexpected paint {other:?}"),
        }
    }

    #[test]
    fn test_holographic_border_cycles() {
        let palette = ThemePalette::dark();
        let variant = CardVariant::holographic(&palette, HoloIntensity::Medium);
        let start = variant.border.highlight.clone();
        let mut c = composer(variant);
        // One third of the 2s cycle
        for _ in 0..42 {
            c.advance(FRAME);
        }
        let card = c.compose(TiltAngles::ZERO, false);
        match &card.layer(LayerKind::Border).unwrap().paint {
            LayerPaint::Border { gradient, .. } => assert_eq!(*gradient, start.rotated(1)),
            other => panic!("unexpected paint {other:?}"),
        }
    }

    #[test]
    fn test_layers_split_around_content() {
        let palette = ThemePalette::dark();
        let mut c = composer(CardVariant::default_variant(&palette));
        let card = c.compose(TiltAngles::ZERO, false);
        let above: Vec<_> = card.layers_above().map(|l| l.kind).collect();
        assert_eq!(above, vec![LayerKind::Border]);
        assert_eq!(card.layers_below().count(), 3);
    }
}
