//! One-shot entrance reveal played the first time a card becomes visible

use serde::Deserialize;
use std::fmt;
use tiltfx_animation::Easing;
use tiltfx_core::Transform3D;

/// Default travel distance (px)
pub const ENTRANCE_DISTANCE: f32 = 50.0;

/// Entrance duration (seconds)
pub const ENTRANCE_DURATION: f32 = 0.8;

/// Tilt applied to directional entrances at their start (degrees)
const ENTRANCE_TILT: f32 = 15.0;

/// Direction the card comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntranceDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
    Fade,
    Scale,
}

impl EntranceDirection {
    pub fn name(self) -> &'static str {
        match self {
            EntranceDirection::Up => "up",
            EntranceDirection::Down => "down",
            EntranceDirection::Left => "left",
            EntranceDirection::Right => "right",
            EntranceDirection::Fade => "fade",
            EntranceDirection::Scale => "scale",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(EntranceDirection::Up),
            "down" => Some(EntranceDirection::Down),
            "left" => Some(EntranceDirection::Left),
            "right" => Some(EntranceDirection::Right),
            "fade" => Some(EntranceDirection::Fade),
            "scale" => Some(EntranceDirection::Scale),
            _ => None,
        }
    }

    /// Starting pose for a given travel distance
    pub fn initial_state(self, distance: f32) -> EntranceState {
        let hidden = EntranceState {
            opacity: 0.0,
            ..EntranceState::IDENTITY
        };
        match self {
            EntranceDirection::Up => EntranceState {
                y: distance,
                rotate_x: -ENTRANCE_TILT,
                ..hidden
            },
            EntranceDirection::Down => EntranceState {
                y: -distance,
                rotate_x: ENTRANCE_TILT,
                ..hidden
            },
            EntranceDirection::Left => EntranceState {
                x: distance,
                rotate_y: -ENTRANCE_TILT,
                ..hidden
            },
            EntranceDirection::Right => EntranceState {
                x: -distance,
                rotate_y: ENTRANCE_TILT,
                ..hidden
            },
            EntranceDirection::Fade => hidden,
            EntranceDirection::Scale => EntranceState { scale: 0.8, ..hidden },
        }
    }
}

impl fmt::Display for EntranceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pose of a card during its entrance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceState {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl EntranceState {
    /// Fully revealed
    pub const IDENTITY: EntranceState = EntranceState {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn mix(&self, to: &EntranceState, t: f32) -> EntranceState {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        EntranceState {
            opacity: lerp(self.opacity, to.opacity),
            x: lerp(self.x, to.x),
            y: lerp(self.y, to.y),
            rotate_x: lerp(self.rotate_x, to.rotate_x),
            rotate_y: lerp(self.rotate_y, to.rotate_y),
            scale: lerp(self.scale, to.scale),
        }
    }

    /// Offset transform to combine with the card root
    pub fn to_transform(&self) -> Transform3D {
        Transform3D {
            translate_x: self.x,
            translate_y: self.y,
            rotate_x: self.rotate_x,
            rotate_y: self.rotate_y,
            scale: self.scale,
            ..Transform3D::IDENTITY
        }
    }
}

impl Default for EntranceState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Not yet visible; holds the initial pose
    Waiting,
    Playing,
    Finished,
}

/// Entrance animation for one card
#[derive(Clone, Debug)]
pub struct Entrance {
    direction: EntranceDirection,
    distance: f32,
    /// Seconds to wait after becoming visible
    delay: f32,
    duration: f32,
    easing: Easing,
    elapsed: f32,
    phase: Phase,
}

impl Entrance {
    pub fn new(direction: EntranceDirection) -> Self {
        Self {
            direction,
            distance: ENTRANCE_DISTANCE,
            delay: 0.0,
            duration: ENTRANCE_DURATION,
            easing: Easing::EaseOut,
            elapsed: 0.0,
            phase: Phase::Waiting,
        }
    }

    /// An entrance that is already complete (cards without a reveal)
    pub fn finished() -> Self {
        Self {
            phase: Phase::Finished,
            ..Self::new(EntranceDirection::Fade)
        }
    }

    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = if distance.is_finite() { distance } else { ENTRANCE_DISTANCE };
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self
    }

    pub fn direction(&self) -> EntranceDirection {
        self.direction
    }

    /// Start playing; later calls do nothing
    pub fn play(&mut self) {
        if self.phase == Phase::Waiting {
            tracing::debug!(direction = %self.direction, delay = self.delay, "entrance started");
            self.phase = Phase::Playing;
            self.elapsed = 0.0;
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn advance(&mut self, dt: f32) {
        if self.phase != Phase::Playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay + self.duration {
            self.phase = Phase::Finished;
        }
    }

    /// Eased progress, 0 while waiting or delayed
    pub fn progress(&self) -> f32 {
        match self.phase {
            Phase::Waiting => 0.0,
            Phase::Finished => 1.0,
            Phase::Playing => {
                let t = (self.elapsed - self.delay) / self.duration.max(1e-3);
                self.easing.apply(t)
            }
        }
    }

    pub fn state(&self) -> EntranceState {
        match self.phase {
            Phase::Finished => EntranceState::IDENTITY,
            _ => self
                .direction
                .initial_state(self.distance)
                .mix(&EntranceState::IDENTITY, self.progress()),
        }
    }
}
