//! TiltCard component
//!
//! One parameterized card: a [`CardVariant`] for the look, a [`TiltConfig`] for
//! the motion and [`CardFeatures`] for the optional behaviors. While mounted the
//! card advances once per scheduler frame through a [`TickGuard`]; unmounting
//! or dropping it cancels the tick, every ripple removal and the entrance.

use crate::composer::{ComposedCard, LayerComposer};
use crate::entrance::{Entrance, EntranceDirection};
use crate::pipeline::{TiltConfig, TiltPipeline};
use crate::registry::CardVariantRegistry;
use crate::ripple::{RippleFrame, RippleSet};
use crate::tilt::TiltAngles;
use crate::tracker::PointerTracker;
use crate::variant::{CardVariant, HoverLift};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tiltfx_animation::{SchedulerHandle, TickGuard};
use tiltfx_core::{PointerEvent, Rect};

/// Optional card behaviors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFeatures {
    /// Follow the pointer with spring-damped tilt
    pub tilt: bool,
    /// Lift and scale while hovered
    pub hover_lift: bool,
    /// Spawn a ripple at each click
    pub ripples: bool,
    /// Entrance played when the card first becomes visible
    pub entrance: Option<EntranceDirection>,
    /// Seconds between becoming visible and starting the entrance
    pub entrance_delay: f32,
}

impl CardFeatures {
    /// Tilt and entrance only
    pub fn basic() -> Self {
        Self {
            tilt: true,
            hover_lift: false,
            ripples: false,
            entrance: Some(EntranceDirection::Up),
            entrance_delay: 0.0,
        }
    }

    /// Everything on
    pub fn interactive() -> Self {
        Self {
            hover_lift: true,
            ripples: true,
            ..Self::basic()
        }
    }

    /// No tilt, no entrance; decoration and hover only
    pub fn static_card() -> Self {
        Self {
            tilt: false,
            hover_lift: true,
            ripples: false,
            entrance: None,
            entrance_delay: 0.0,
        }
    }

    pub fn with_entrance(mut self, direction: EntranceDirection, delay: f32) -> Self {
        self.entrance = Some(direction);
        self.entrance_delay = delay;
        self
    }
}

impl Default for CardFeatures {
    fn default() -> Self {
        Self::interactive()
    }
}

/// A composed card together with its live ripples
#[derive(Clone, Debug, PartialEq)]
pub struct CardFrame {
    pub card: ComposedCard,
    pub ripples: Vec<RippleFrame>,
}

struct CardState {
    rect: Rect,
    features: CardFeatures,
    pipeline: TiltPipeline,
    composer: LayerComposer,
    entrance: Entrance,
    hovered: bool,
    /// Last committed frame
    last: Option<ComposedCard>,
    frames: u64,
}

impl CardState {
    fn advance(&mut self, dt: f32) {
        let tilt = if self.features.tilt {
            self.pipeline.tick(dt)
        } else {
            TiltAngles::ZERO
        };
        self.composer.advance(dt);
        self.entrance.advance(dt);
        self.last = Some(self.render(tilt));
        self.frames += 1;
    }

    fn render(&mut self, tilt: TiltAngles) -> ComposedCard {
        let mut card = self.composer.compose(tilt, self.hovered);
        let entrance = self.entrance.state();
        card.root.translate_x += entrance.x;
        card.root.translate_y += entrance.y;
        card.root.rotate_x += entrance.rotate_x;
        card.root.rotate_y += entrance.rotate_y;
        card.root.scale *= entrance.scale;
        card.opacity = entrance.opacity;
        card
    }

    /// Forget pointer-driven state so a remount starts at rest
    fn reset_interaction(&mut self) {
        self.pipeline.reset();
        self.composer.reset_hover();
        self.hovered = false;
        self.last = None;
    }

    fn current(&mut self) -> ComposedCard {
        match &self.last {
            Some(card) => card.clone(),
            None => {
                let tilt = self.pipeline.angles();
                self.render(tilt)
            }
        }
    }
}

/// A pointer-reactive 3D card
pub struct TiltCard {
    state: Rc<RefCell<CardState>>,
    ripples: RippleSet,
    tick: Option<TickGuard>,
}

impl TiltCard {
    pub fn new(
        variant: Arc<CardVariant>,
        config: TiltConfig,
        features: CardFeatures,
        rect: Rect,
    ) -> Self {
        let variant = if features.hover_lift {
            variant
        } else {
            let mut still = CardVariant::clone(&variant);
            still.hover = HoverLift::NONE;
            Arc::new(still)
        };
        let entrance = match features.entrance {
            Some(direction) => Entrance::new(direction).delay(features.entrance_delay),
            None => Entrance::finished(),
        };

        Self {
            state: Rc::new(RefCell::new(CardState {
                rect,
                features,
                pipeline: TiltPipeline::new(config),
                composer: LayerComposer::new(variant, rect.size, config.perspective),
                entrance,
                hovered: false,
                last: None,
                frames: 0,
            })),
            ripples: RippleSet::new(SchedulerHandle::detached()),
            tick: None,
        }
    }

    /// Card for a registry key (unknown keys use the default variant)
    pub fn from_registry(
        registry: &CardVariantRegistry,
        key: &str,
        config: TiltConfig,
        features: CardFeatures,
        rect: Rect,
    ) -> Self {
        Self::new(registry.lookup_shared(key), config, features, rect)
    }

    /// Start advancing on `scheduler`; remounting moves the card to it
    pub fn mount(&mut self, scheduler: &SchedulerHandle) {
        self.unmount();

        let weak: Weak<RefCell<CardState>> = Rc::downgrade(&self.state);
        self.tick = Some(scheduler.add_tick_callback(move |dt| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            match state.try_borrow_mut() {
                Ok(mut state) => state.advance(dt),
                Err(_) => tracing::warn!("card state busy, frame skipped"),
            };
        }));
        self.ripples = RippleSet::new(scheduler.clone());

        let state = self.state.borrow();
        tracing::debug!(
            variant = %state.composer.variant().key,
            alive = scheduler.is_alive(),
            "card mounted"
        );
    }

    /// Stop advancing, cancel every pending action and return to rest
    pub fn unmount(&mut self) {
        let was_mounted = self.tick.is_some();
        self.tick = None;
        self.ripples.clear();
        if was_mounted {
            self.state.borrow_mut().reset_interaction();
            tracing::debug!("card unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.tick.as_ref().is_some_and(TickGuard::is_active)
    }

    /// Feed a pointer event; ignored while unmounted
    pub fn handle_event(&self, event: &PointerEvent) {
        if !self.is_mounted() {
            tracing::debug!(?event, "pointer event on unmounted card ignored");
            return;
        }

        let mut state = self.state.borrow_mut();
        let rect = state.rect;
        match event {
            PointerEvent::Enter { .. } => state.hovered = true,
            PointerEvent::Leave => state.hovered = false,
            PointerEvent::Click { client } => {
                if state.features.ripples {
                    self.ripples.spawn(PointerTracker::local_point(&rect, *client));
                }
            }
            PointerEvent::Move { .. } => {}
        }
        if state.features.tilt {
            state.pipeline.handle_event(&rect, event);
        }
    }

    /// Update the card's bounding rect (layout change or scroll)
    pub fn set_rect(&self, rect: Rect) {
        let mut state = self.state.borrow_mut();
        state.rect = rect;
        state.composer.resize(rect.size);
    }

    /// Report visibility; the first visible report starts the entrance
    pub fn set_visible(&self, visible: bool) {
        if visible {
            self.state.borrow_mut().entrance.play();
        }
    }

    /// The card as of the last frame, plus live ripples
    pub fn frame(&self) -> CardFrame {
        CardFrame {
            card: self.state.borrow_mut().current(),
            ripples: self.ripples.frames(),
        }
    }

    pub fn angles(&self) -> TiltAngles {
        self.state.borrow().pipeline.angles()
    }

    pub fn is_hovered(&self) -> bool {
        self.state.borrow().hovered
    }

    pub fn is_settled(&self) -> bool {
        self.state.borrow().pipeline.is_settled()
    }

    pub fn entrance_finished(&self) -> bool {
        self.state.borrow().entrance.is_finished()
    }

    /// Frames advanced since creation
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frames
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn variant_key(&self) -> String {
        self.state.borrow().composer.variant().key.clone()
    }
}

impl std::fmt::Debug for TiltCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiltCard")
            .field("variant", &self.variant_key())
            .field("mounted", &self.is_mounted())
            .field("ripples", &self.ripples)
            .finish()
    }
}
