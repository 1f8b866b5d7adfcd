//! Pointer → spring → tilt pipeline
//!
//! One [`TiltPipeline`] per card. Pointer events only record the newest sample;
//! all simulation happens in [`TiltPipeline::tick`], once per frame, in a fixed
//! order: consume the latest sample, integrate both springs, project, commit.

use crate::tilt::{TiltAngles, TiltProjector, DEFAULT_INPUT_RANGE};
use crate::tracker::{PointerSample, PointerTracker};
use tiltfx_animation::{Spring, SpringConfig};
use tiltfx_core::{PointerEvent, Rect, Result, TiltError};

/// Tilt tuning shared by the springs and the projector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    pub spring: SpringConfig,
    /// Maximum rotation on either axis, degrees
    pub max_degrees: f32,
    /// Pointer offset (px) that maps to `max_degrees`
    pub input_range: f32,
    /// Perspective distance applied to the card root (px)
    pub perspective: f32,
}

impl TiltConfig {
    /// Standard 3D card: 150/15 spring, ±15°
    pub fn card() -> Self {
        Self {
            spring: SpringConfig::card(),
            max_degrees: 15.0,
            input_range: DEFAULT_INPUT_RANGE,
            perspective: 1000.0,
        }
    }

    /// Compact team card: same spring, ±10°
    pub fn compact() -> Self {
        Self {
            max_degrees: 10.0,
            ..Self::card()
        }
    }

    /// Testimonial card: tighter 300/30 spring, ±15°
    pub fn testimonial() -> Self {
        Self {
            spring: SpringConfig::testimonial(),
            ..Self::card()
        }
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_max_degrees(mut self, max_degrees: f32) -> Self {
        self.max_degrees = max_degrees;
        self
    }

    /// Check every knob is usable
    pub fn validate(&self) -> Result<()> {
        if !self.spring.is_valid() {
            return Err(TiltError::Config(format!(
                "spring needs positive stiffness and mass and non-negative damping, got {:?}",
                self.spring
            )));
        }
        for (name, value) in [
            ("max_degrees", self.max_degrees),
            ("input_range", self.input_range),
            ("perspective", self.perspective),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TiltError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.max_degrees > 90.0 {
            return Err(TiltError::Config(format!(
                "max_degrees must not exceed 90, got {}",
                self.max_degrees
            )));
        }
        Ok(())
    }
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self::card()
    }
}

/// Per-card tilt simulation
///
/// `spring_x` follows the horizontal offset and drives `rotate_y`; `spring_y`
/// follows the vertical offset and drives `rotate_x`.
#[derive(Clone, Debug)]
pub struct TiltPipeline {
    config: TiltConfig,
    projector: TiltProjector,
    spring_x: Spring,
    spring_y: Spring,
    /// Newest sample since the last tick (moves are coalesced)
    pending: Option<PointerSample>,
    target: PointerSample,
    angles: TiltAngles,
    skipped_frames: u64,
}

impl TiltPipeline {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            projector: TiltProjector::new(config.max_degrees, config.input_range),
            spring_x: Spring::new(config.spring, 0.0),
            spring_y: Spring::new(config.spring, 0.0),
            pending: None,
            target: PointerSample::ZERO,
            angles: TiltAngles::ZERO,
            skipped_frames: 0,
        }
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    /// Record a pointer sample; only the newest one before a tick is used
    pub fn push_sample(&mut self, sample: PointerSample) {
        self.pending = Some(sample);
    }

    /// Route a pointer event over `rect` into the pipeline
    pub fn handle_event(&mut self, rect: &Rect, event: &PointerEvent) {
        let sample = match event.client() {
            Some(client) => PointerTracker::sample(rect, client),
            None => PointerTracker::leave(),
        };
        self.push_sample(sample);
    }

    /// Advance one frame and return the committed angles
    ///
    /// A step that would produce non-finite state is dropped: the springs keep
    /// their previous state and the last valid angles are returned.
    pub fn tick(&mut self, dt: f32) -> TiltAngles {
        let previous_target = self.target;
        if let Some(sample) = self.pending.take() {
            self.target = sample;
        }

        if !dt.is_finite() || dt <= 0.0 {
            tracing::debug!(dt, "skipping tilt frame with unusable delta");
            return self.angles;
        }

        let (saved_x, saved_y) = (self.spring_x, self.spring_y);
        self.spring_x.set_target(self.target.dx);
        self.spring_y.set_target(self.target.dy);
        let stepped = self.spring_x.step(dt) && self.spring_y.step(dt);
        let angles = self
            .projector
            .project(self.spring_x.value(), self.spring_y.value());

        if !stepped || !angles.is_finite() {
            tracing::warn!(
                target_dx = self.target.dx,
                target_dy = self.target.dy,
                "non-finite tilt state, frame skipped"
            );
            self.spring_x = saved_x;
            self.spring_y = saved_y;
            self.target = previous_target;
            self.skipped_frames += 1;
            return self.angles;
        }

        self.angles = angles;
        angles
    }

    /// Angles committed by the last tick
    pub fn angles(&self) -> TiltAngles {
        self.angles
    }

    /// Current spring target
    pub fn target(&self) -> PointerSample {
        self.target
    }

    /// Smoothed offsets `(x, y)` in pixels
    pub fn spring_values(&self) -> (f32, f32) {
        (self.spring_x.value(), self.spring_y.value())
    }

    /// Both springs at rest on their targets and no sample pending
    pub fn is_settled(&self) -> bool {
        self.pending.is_none() && self.spring_x.is_settled() && self.spring_y.is_settled()
    }

    /// Frames dropped because of non-finite state
    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    /// Back to rest at the origin
    pub fn reset(&mut self) {
        self.spring_x.reset(0.0);
        self.spring_y.reset(0.0);
        self.pending = None;
        self.target = PointerSample::ZERO;
        self.angles = TiltAngles::ZERO;
    }
}
