//! Spring physics animation
//!
//! Semi-implicit Euler springs for pointer-driven motion. A frame delta is split
//! into equal sub-steps short enough to keep stiff springs stable, so the state
//! is a pure function of the targets and frame deltas it has been fed.

/// Largest time step integrated in a single call (seconds)
///
/// A stalled frame (tab in background, debugger pause) would otherwise feed a
/// huge `dt` and make the integrator explode.
pub const MAX_DT: f32 = 1.0 / 30.0;

/// Longest integration sub-step (seconds)
pub const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Upper bound on sub-steps per call
const MAX_SUBSTEPS: u32 = 64;

/// Position and velocity tolerance under which a spring counts as settled
const EPSILON: f32 = 0.01;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot (good for playful UI)
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring (good for buttons)
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A very stiff spring with minimal oscillation
    pub fn snappy() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    /// A slow spring with no overshoot (critically damped)
    pub fn molasses() -> Self {
        Self::new(100.0, 20.0, 1.0)
    }

    /// The tilt spring used by 3D and interactive cards
    pub fn card() -> Self {
        Self::new(150.0, 15.0, 1.0)
    }

    /// The tighter tilt spring used by testimonial cards
    pub fn testimonial() -> Self {
        Self::new(300.0, 30.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }

    /// Positive, finite stiffness and mass with non-negative damping
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::card()
    }
}

/// A damped spring on one axis
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` at rest
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < EPSILON
    }

    /// Retarget and integrate one step, returning the new position
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        self.set_target(target);
        self.step(dt);
        self.value
    }

    /// Sub-steps used to integrate `dt`
    ///
    /// The sub-step stays under [`MAX_SUBSTEP`] and short enough that
    /// `damping * h / mass` and `h * sqrt(stiffness / mass)` stay at or below
    /// 0.25, where the Euler update keeps a critically damped spring from
    /// oscillating.
    pub fn substeps(&self, dt: f32) -> u32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let mut h = MAX_SUBSTEP;
        if damping > 0.0 {
            h = h.min(0.25 * mass / damping);
        }
        if stiffness > 0.0 {
            h = h.min(0.25 * (mass / stiffness).sqrt());
        }
        if !h.is_finite() || h <= 0.0 {
            return 1;
        }
        ((dt / h).ceil() as u32).clamp(1, MAX_SUBSTEPS)
    }

    /// Integrate `dt` (clamped to [`MAX_DT`]) in semi-implicit Euler sub-steps
    ///
    /// Returns `false` when the step was rejected (bad `dt` or a non-finite
    /// result); the previous state is kept in that case.
    pub fn step(&mut self, dt: f32) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return true;
        }

        let dt = dt.min(MAX_DT);
        let count = self.substeps(dt);
        let h = dt / count as f32;

        let (mut value, mut velocity) = (self.value, self.velocity);
        for _ in 0..count {
            let spring_force = self.config.stiffness * (self.target - value);
            let damping_force = self.config.damping * velocity;
            let acceleration = (spring_force - damping_force) / self.config.mass;

            velocity += acceleration * h;
            value += velocity * h;
        }
        if !value.is_finite() || !velocity.is_finite() {
            return false;
        }

        self.velocity = velocity;
        self.value = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);

        for _ in 0..120 {
            spring.step(FRAME);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(FRAME);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Retargeting mid-flight keeps momentum
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_critically_damped_is_monotonic() {
        for config in [
            SpringConfig::molasses(),
            SpringConfig::new(400.0, 40.0, 1.0),
            SpringConfig::new(300.0, 40.0, 1.0),
        ] {
            assert!(!config.is_underdamped());
            let mut spring = Spring::new(config, 0.0);
            let mut last = 0.0;
            for _ in 0..240 {
                let v = spring.update(100.0, FRAME);
                assert!(v >= last - 1e-4, "{config:?} moved backwards");
                assert!(v <= 100.0 + 1e-3, "{config:?} overshot to {v}");
                last = v;
            }
            assert!((spring.value() - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_card_spring_overshoot_is_bounded() {
        let mut spring = Spring::new(SpringConfig::card(), 0.0);
        let mut min = 0.0_f32;
        for _ in 0..240 {
            min = min.min(spring.update(-120.0, FRAME));
        }
        assert!(min < -120.0);
        assert!(min > -132.0);
        assert!((spring.value() + 120.0).abs() < 0.01);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut clamped = Spring::new(SpringConfig::card(), 0.0);
        let mut reference = clamped;
        clamped.update(100.0, 5.0);
        reference.update(100.0, MAX_DT);
        assert_eq!(clamped.value(), reference.value());
        assert_eq!(clamped.velocity(), reference.velocity());
    }

    #[test]
    fn test_bad_dt_is_noop() {
        let mut spring = Spring::new(SpringConfig::card(), 10.0);
        spring.set_target(50.0);
        assert!(!spring.step(0.0));
        assert!(!spring.step(-FRAME));
        assert!(!spring.step(f32::NAN));
        assert!(!spring.step(f32::INFINITY));
        assert_eq!(spring.value(), 10.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_non_finite_step_is_discarded() {
        let mut spring = Spring::new(SpringConfig::card(), 10.0);
        spring.update(20.0, FRAME);
        let (value, velocity) = (spring.value(), spring.velocity());

        spring.set_target(f32::NAN);
        assert!(!spring.step(FRAME));
        assert_eq!(spring.value(), value);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_settled_spring_snaps() {
        let mut spring = Spring::new(SpringConfig::card(), 0.0);
        spring.set_target(0.005);
        spring.step(FRAME);
        assert_eq!(spring.value(), 0.005);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_damping_classification() {
        assert!(SpringConfig::card().is_underdamped());
        assert!(SpringConfig::testimonial().is_underdamped());
        assert!(SpringConfig::molasses().is_critically_damped());
        assert!(SpringConfig::new(100.0, 30.0, 1.0).is_overdamped());
        assert!(!SpringConfig::new(0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_stiff_critically_damped_survives_dropped_frames() {
        for config in [
            SpringConfig::new(900.0, 60.0, 1.0),
            SpringConfig::new(2500.0, 100.0, 1.0),
        ] {
            assert!(config.is_critically_damped());
            for dt in [MAX_DT, FRAME] {
                let mut spring = Spring::new(config, 0.0);
                let mut last = 0.0;
                for _ in 0..120 {
                    let v = spring.update(100.0, dt);
                    assert!(v.is_finite());
                    assert!(v >= last - 1e-4, "{config:?} moved backwards at {dt}");
                    assert!(v <= 100.0 + 1e-3, "{config:?} overshot to {v} at {dt}");
                    last = v;
                }
                assert!((spring.value() - 100.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_spring_stable_with_large_time_steps() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            assert!(spring.step(0.1));
            assert!(spring.value() < 1100.0);
            assert!(spring.value() > 0.0);
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn test_heavier_mass_still_settles() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 25.0, 2.0), 0.0);
        spring.set_target(100.0);
        for _ in 0..240 {
            spring.step(FRAME);
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn test_substeps_follow_stiffness() {
        let soft = Spring::new(SpringConfig::card(), 0.0);
        assert!((8..=9).contains(&soft.substeps(MAX_DT)));

        let stiff = Spring::new(SpringConfig::new(2500.0, 100.0, 1.0), 0.0);
        assert_eq!(stiff.substeps(MAX_DT), 14);
        assert_eq!(stiff.substeps(1e-6), 1);
    }
}
