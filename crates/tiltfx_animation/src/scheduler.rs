//! Frame scheduler
//!
//! A single-threaded, display-synchronized frame driver. The host calls
//! [`FrameScheduler::tick`] once per rendered frame; the scheduler then fires
//! every expired deferred action (timer) in deadline order, followed by every
//! registered per-frame callback.
//!
//! Components never own the scheduler. They hold a [`SchedulerHandle`] (a weak
//! reference) and register work through it, receiving a guard that removes the
//! registration when dropped:
//!
//! - [`TickGuard`] - a per-frame callback
//! - [`TimerGuard`] - a one-shot deferred action
//!
//! Registrations may be cancelled from inside other callbacks during the same
//! frame. A callback cancelled earlier in a frame does not fire later in it.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered per-frame callback
    pub struct TickCallbackId;
    /// Handle to a pending deferred action
    pub struct TimerId;
}

type TickFn = Rc<RefCell<dyn FnMut(f32)>>;

struct Timer {
    /// Scheduler time (seconds) at which the action becomes due
    fire_at: f64,
    /// Registration order, used to break deadline ties
    seq: u64,
    action: Box<dyn FnOnce()>,
}

/// Internal state of the frame scheduler
struct SchedulerInner {
    callbacks: SlotMap<TickCallbackId, TickFn>,
    timers: SlotMap<TimerId, Timer>,
    /// Seconds since the scheduler was created
    elapsed: f64,
    frame: u64,
    next_seq: u64,
}

/// The frame driver that owns all tick callbacks and timers
///
/// Not `Send`: everything it runs lives on the UI thread.
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                callbacks: SlotMap::with_key(),
                timers: SlotMap::with_key(),
                elapsed: 0.0,
                frame: 0,
                next_seq: 0,
            })),
        }
    }

    /// Get a weak handle for registering work
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Advance the clock by `dt` seconds and run one frame
    ///
    /// A negative or non-finite `dt` still runs the frame, but without moving
    /// the clock.
    pub fn tick(&self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            tracing::warn!(dt, "ignoring invalid frame delta");
            0.0
        };

        let (now, mut due) = {
            let mut inner = self.inner.borrow_mut();
            inner.elapsed += dt as f64;
            inner.frame += 1;
            let now = inner.elapsed;
            let due: Vec<(f64, u64, TimerId)> = inner
                .timers
                .iter()
                .filter(|(_, t)| t.fire_at <= now)
                .map(|(id, t)| (t.fire_at, t.seq, id))
                .collect();
            (now, due)
        };
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (_, _, id) in due {
            // Removed by an earlier action in this frame?
            let timer = self.inner.borrow_mut().timers.remove(id);
            if let Some(timer) = timer {
                (timer.action)();
            }
        }

        let callbacks: Vec<(TickCallbackId, TickFn)> = self
            .inner
            .borrow()
            .callbacks
            .iter()
            .map(|(id, cb)| (id, Rc::clone(cb)))
            .collect();

        for (id, callback) in callbacks {
            if !self.inner.borrow().callbacks.contains_key(id) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut f) => (*f)(dt),
                Err(_) => tracing::warn!("tick callback re-entered, skipping"),
            }
        }

        tracing::trace!(frame = self.frame_count(), now, "frame ticked");
    }

    /// Seconds elapsed since creation
    pub fn now(&self) -> f64 {
        self.inner.borrow().elapsed
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame
    }

    pub fn tick_callback_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Check if anything is registered
    pub fn is_idle(&self) -> bool {
        let inner = self.inner.borrow();
        inner.callbacks.is_empty() && inner.timers.is_empty()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the frame scheduler
///
/// Every operation is a no-op once the scheduler has been dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// A handle that is not attached to any scheduler
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Scheduler time in seconds (0 when detached)
    pub fn now(&self) -> f64 {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().elapsed)
            .unwrap_or(0.0)
    }

    /// Register a per-frame callback receiving the frame delta in seconds
    pub fn add_tick_callback<F>(&self, callback: F) -> TickGuard
    where
        F: FnMut(f32) + 'static,
    {
        let id = self.inner.upgrade().map(|inner| {
            let callback: TickFn = Rc::new(RefCell::new(callback));
            inner.borrow_mut().callbacks.insert(callback)
        });
        TickGuard {
            handle: self.clone(),
            id,
        }
    }

    /// Run `action` once, `delay` seconds from now
    pub fn schedule<F>(&self, delay: f32, action: F) -> TimerGuard
    where
        F: FnOnce() + 'static,
    {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let id = self.inner.upgrade().map(|inner| {
            let mut inner = inner.borrow_mut();
            let seq = inner.next_seq;
            inner.next_seq += 1;
            let fire_at = inner.elapsed + delay as f64;
            inner.timers.insert(Timer {
                fire_at,
                seq,
                action: Box::new(action),
            })
        });
        TimerGuard {
            handle: self.clone(),
            id,
        }
    }

    pub fn remove_tick_callback(&self, id: TickCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            // Drop the closure only after the borrow is released: it may own
            // guards that call back into the scheduler.
            let removed = inner.borrow_mut().callbacks.remove(id);
            drop(removed);
        }
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            let removed = inner.borrow_mut().timers.remove(id);
            drop(removed);
        }
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().timers.contains_key(id))
            .unwrap_or(false)
    }

    pub fn is_tick_callback_registered(&self, id: TickCallbackId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().callbacks.contains_key(id))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ============================================================================
// Guards
// ============================================================================

/// Owning handle to a per-frame callback, unregistered on drop
#[must_use = "dropping a TickGuard unregisters its callback"]
pub struct TickGuard {
    handle: SchedulerHandle,
    id: Option<TickCallbackId>,
}

impl TickGuard {
    pub fn id(&self) -> Option<TickCallbackId> {
        self.id
    }

    /// Check if the callback is still registered with a live scheduler
    pub fn is_active(&self) -> bool {
        self.id
            .map(|id| self.handle.is_tick_callback_registered(id))
            .unwrap_or(false)
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.remove_tick_callback(id);
        }
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owning handle to a deferred action, cancelled on drop
#[must_use = "dropping a TimerGuard cancels its action"]
pub struct TimerGuard {
    handle: SchedulerHandle,
    id: Option<TimerId>,
}

impl TimerGuard {
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Check if the action is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.id
            .map(|id| self.handle.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_timer(id);
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_tick_callback_runs_every_frame() {
        let scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _guard = scheduler.handle().add_tick_callback(move |_| c.set(c.get() + 1));

        for _ in 0..3 {
            scheduler.tick(FRAME);
        }
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.frame_count(), 3);
    }

    #[test]
    fn test_dropping_guard_unregisters() {
        let scheduler = FrameScheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let guard = scheduler.handle().add_tick_callback(move |_| c.set(c.get() + 1));
        scheduler.tick(FRAME);
        drop(guard);
        scheduler.tick(FRAME);
        assert_eq!(count.get(), 1);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_timer_fires_once_after_delay() {
        let scheduler = FrameScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let guard = scheduler.handle().schedule(0.1, move || f.set(f.get() + 1));

        scheduler.tick(0.05);
        assert_eq!(fired.get(), 0);
        assert!(guard.is_pending());

        scheduler.tick(0.06);
        assert_eq!(fired.get(), 1);
        assert!(!guard.is_pending());

        scheduler.tick(1.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let scheduler = FrameScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let handle = scheduler.handle();

        let o = Rc::clone(&order);
        let _late = handle.schedule(0.3, move || o.borrow_mut().push("late"));
        let o = Rc::clone(&order);
        let _early = handle.schedule(0.1, move || o.borrow_mut().push("early"));
        let o = Rc::clone(&order);
        let _tie = handle.schedule(0.1, move || o.borrow_mut().push("tie"));

        scheduler.tick(1.0);
        assert_eq!(*order.borrow(), vec!["early", "tie", "late"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = FrameScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        let mut guard = scheduler.handle().schedule(0.0, move || f.set(true));
        guard.cancel();
        scheduler.tick(FRAME);
        assert!(!fired.get());
        assert_eq!(scheduler.pending_timer_count(), 0);
    }

    #[test]
    fn test_callback_cancelled_mid_frame_does_not_fire() {
        let scheduler = FrameScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(Cell::new(0));

        // Whichever callback runs first cancels the other one
        let slot_a: Rc<RefCell<Option<TickGuard>>> = Rc::new(RefCell::new(None));
        let slot_b: Rc<RefCell<Option<TickGuard>>> = Rc::new(RefCell::new(None));

        let (f, other) = (Rc::clone(&fired), Rc::clone(&slot_b));
        let a = handle.add_tick_callback(move |_| {
            f.set(f.get() + 1);
            other.borrow_mut().take();
        });
        let (f, other) = (Rc::clone(&fired), Rc::clone(&slot_a));
        let b = handle.add_tick_callback(move |_| {
            f.set(f.get() + 1);
            other.borrow_mut().take();
        });
        *slot_a.borrow_mut() = Some(a);
        *slot_b.borrow_mut() = Some(b);

        scheduler.tick(FRAME);
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.tick_callback_count(), 1);
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let scheduler = FrameScheduler::new();
        let handle = scheduler.handle();
        let guard = handle.add_tick_callback(|_| {});
        drop(scheduler);

        assert!(!handle.is_alive());
        assert!(!guard.is_active());
        let timer = handle.schedule(0.0, || {});
        assert!(!timer.is_pending());
        drop(guard);
    }

    #[test]
    fn test_invalid_dt_does_not_move_clock() {
        let scheduler = FrameScheduler::new();
        scheduler.tick(f32::NAN);
        scheduler.tick(-1.0);
        assert_eq!(scheduler.now(), 0.0);
        assert_eq!(scheduler.frame_count(), 2);
    }
}
