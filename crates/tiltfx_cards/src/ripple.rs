//! Click ripples
//!
//! Each click spawns a ripple at the card-local click point that expands from
//! 0 to 100px while fading out, and is removed by a scheduled action 600ms
//! later. Removal timers are held as guards keyed by ripple id, so dropping or
//! clearing the set cancels every outstanding removal.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;
use tiltfx_animation::{Easing, SchedulerHandle, TimerGuard};
use tiltfx_core::{Color, Point};

new_key_type! {
    /// Identifies a live ripple
    pub struct RippleId;
}

/// Ripple lifetime (seconds)
pub const RIPPLE_DURATION: f32 = 0.6;

/// Final ripple diameter (px)
pub const RIPPLE_DIAMETER: f32 = 100.0;

#[derive(Clone, Copy, Debug)]
struct Ripple {
    origin: Point,
    started_at: f64,
    seq: u64,
}

/// A ripple as it should be drawn this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleFrame {
    pub id: RippleId,
    /// Center in card-local coordinates
    pub origin: Point,
    pub diameter: f32,
    pub opacity: f32,
    pub color: Color,
}

#[derive(Default)]
struct RippleState {
    ripples: SlotMap<RippleId, Ripple>,
    timers: SecondaryMap<RippleId, TimerGuard>,
    next_seq: u64,
}

/// Live ripples of one card
pub struct RippleSet {
    scheduler: SchedulerHandle,
    state: Rc<RefCell<RippleState>>,
    color: Color,
}

impl RippleSet {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self {
            scheduler,
            state: Rc::new(RefCell::new(RippleState::default())),
            color: Color::WHITE.with_alpha(0.2),
        }
    }

    /// Spawn a ripple at `origin` (card-local)
    ///
    /// Returns `None` when the scheduler is gone, since nothing could ever
    /// remove the ripple.
    pub fn spawn(&self, origin: Point) -> Option<RippleId> {
        if !self.scheduler.is_alive() {
            tracing::debug!("scheduler detached, ripple not spawned");
            return None;
        }

        let id = {
            let mut state = self.state.borrow_mut();
            let seq = state.next_seq;
            state.next_seq += 1;
            state.ripples.insert(Ripple {
                origin,
                started_at: self.scheduler.now(),
                seq,
            })
        };

        let weak = Rc::downgrade(&self.state);
        let guard = self.scheduler.schedule(RIPPLE_DURATION, move || {
            if let Some(state) = weak.upgrade() {
                let finished = {
                    let mut state = state.borrow_mut();
                    state.ripples.remove(id);
                    state.timers.remove(id)
                };
                drop(finished);
            }
        });
        self.state.borrow_mut().timers.insert(id, guard);
        Some(id)
    }

    /// Ripples to draw at the scheduler's current time, oldest first
    pub fn frames(&self) -> Vec<RippleFrame> {
        self.ripples(self.scheduler.now())
    }

    /// Ripples to draw at scheduler time `now` (seconds), oldest first
    pub fn ripples(&self, now: f64) -> Vec<RippleFrame> {
        let state = self.state.borrow();
        let mut live: Vec<(RippleId, &Ripple)> = state.ripples.iter().collect();
        live.sort_by_key(|(_, r)| r.seq);

        live.into_iter()
            .map(|(id, ripple)| {
                let t = ((now - ripple.started_at) / RIPPLE_DURATION as f64) as f32;
                let eased = Easing::EaseOut.apply(t);
                RippleFrame {
                    id,
                    origin: ripple.origin,
                    diameter: RIPPLE_DIAMETER * eased,
                    opacity: 1.0 - eased,
                    color: self.color,
                }
            })
            .collect()
    }

    pub fn contains(&self, id: RippleId) -> bool {
        self.state.borrow().ripples.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removal actions still waiting to fire
    pub fn pending_removals(&self) -> usize {
        self.state
            .borrow()
            .timers
            .values()
            .filter(|guard| guard.is_pending())
            .count()
    }

    /// Remove every ripple and cancel their removal actions
    pub fn clear(&self) {
        let guards: Vec<TimerGuard> = {
            let mut state = self.state.borrow_mut();
            state.ripples.clear();
            state.timers.drain().map(|(_, guard)| guard).collect()
        };
        drop(guards);
    }
}

impl std::fmt::Debug for RippleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RippleSet")
            .field("live", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiltfx_animation::FrameScheduler;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_ripple_expands_and_fades() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        let id = ripples.spawn(Point::new(40.0, 30.0)).unwrap();

        let start = ripples.frames();
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].diameter, 0.0);
        assert_eq!(start[0].opacity, 1.0);

        for _ in 0..18 {
            scheduler.tick(FRAME);
        }
        let mid = ripples.frames();
        assert_eq!(mid[0].id, id);
        assert!(mid[0].diameter > 50.0 && mid[0].diameter < RIPPLE_DIAMETER);
        assert!(mid[0].opacity > 0.0 && mid[0].opacity < 0.5);
        assert_eq!(mid[0].origin, Point::new(40.0, 30.0));
    }

    #[test]
    fn test_ripple_removed_after_lifetime() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        let id = ripples.spawn(Point::ZERO).unwrap();

        for _ in 0..35 {
            scheduler.tick(FRAME);
        }
        assert!(ripples.contains(id));
        assert_eq!(ripples.pending_removals(), 1);

        scheduler.tick(FRAME);
        scheduler.tick(FRAME);
        assert!(!ripples.contains(id));
        assert!(ripples.is_empty());
        assert_eq!(scheduler.pending_timer_count(), 0);
    }

    #[test]
    fn test_ripples_at_explicit_time() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        ripples.spawn(Point::ZERO);
        let done = ripples.ripples(RIPPLE_DURATION as f64);
        assert_eq!(done[0].diameter, RIPPLE_DIAMETER);
        assert_eq!(done[0].opacity, 0.0);
    }

    #[test]
    fn test_frames_are_oldest_first() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        let first = ripples.spawn(Point::new(1.0, 1.0)).unwrap();
        scheduler.tick(FRAME);
        let second = ripples.spawn(Point::new(2.0, 2.0)).unwrap();

        let frames = ripples.frames();
        assert_eq!(frames.iter().map(|f| f.id).collect::<Vec<_>>(), vec![first, second]);
        assert!(frames[0].diameter > frames[1].diameter);
    }

    #[test]
    fn test_dropping_set_cancels_timers() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        ripples.spawn(Point::ZERO);
        ripples.spawn(Point::ZERO);
        assert_eq!(scheduler.pending_timer_count(), 2);

        drop(ripples);
        assert_eq!(scheduler.pending_timer_count(), 0);
        for _ in 0..60 {
            scheduler.tick(FRAME);
        }
    }

    #[test]
    fn test_clear_cancels_timers() {
        let scheduler = FrameScheduler::new();
        let ripples = RippleSet::new(scheduler.handle());
        ripples.spawn(Point::ZERO);
        ripples.clear();
        assert!(ripples.is_empty());
        assert_eq!(scheduler.pending_timer_count(), 0);
    }

    #[test]
    fn test_detached_scheduler_spawns_nothing() {
        let ripples = RippleSet::new(SchedulerHandle::detached());
        assert!(ripples.spawn(Point::ZERO).is_none());
        assert!(ripples.frames().is_empty());
    }
}
