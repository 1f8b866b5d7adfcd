//! tiltfx Animation System
//!
//! Spring physics, easing curves, keyframe tracks and a frame scheduler.
//!
//! # Features
//!
//! - **Spring Physics**: semi-implicit Euler springs with stiffness, damping, mass
//! - **Easing**: the standard CSS curves plus arbitrary cubic-bézier
//! - **Keyframe Tracks**: looping, delayed tracks for `f32`, `Color`, `Point` and `Vec3`
//! - **Frame Scheduler**: per-frame tick callbacks and deferred actions, both
//!   cancelled when their guard is dropped

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod values;

pub use easing::Easing;
pub use scheduler::{
    FrameScheduler, SchedulerHandle, TickCallbackId, TickGuard, TimerGuard, TimerId,
};
pub use spring::{Spring, SpringConfig, MAX_DT, MAX_SUBSTEP};
pub use values::{
    ColorAnimation, FloatAnimation, Interpolate, PointAnimation, TypedKeyframe,
    TypedKeyframeAnimation, Vec3Animation,
};
