//! tiltfx Cards
//!
//! Pointer-reactive 3D tilt cards with spring damping and layered decorative
//! composition.
//!
//! Each frame follows the same pipeline: the newest pointer sample becomes a
//! `(dx, dy)` offset from the card center, two springs smooth it, the smoothed
//! offset is projected to a clamped `(rotate_x, rotate_y)` pair, and the
//! composer stacks the variant's decorative layers around the content plane
//! inside that transform.
//!
//! # Example
//!
//! ```ignore
//! use tiltfx_animation::FrameScheduler;
//! use tiltfx_cards::prelude::*;
//!
//! let scheduler = FrameScheduler::new();
//! let mut card = TiltCard::from_registry(
//!     CardVariantRegistry::global(),
//!     "holographic",
//!     TiltConfig::card(),
//!     CardFeatures::interactive(),
//!     Rect::new(0.0, 0.0, 320.0, 200.0),
//! );
//! card.mount(&scheduler.handle());
//! card.set_visible(true);
//!
//! card.handle_event(&PointerEvent::Move { client: Point::new(280.0, 40.0) });
//! scheduler.tick(1.0 / 60.0);
//!
//! let frame = card.frame();
//! println!("{}", frame.card.root.to_css());
//! ```

pub mod card;
pub mod composer;
pub mod config;
pub mod entrance;
pub mod floating;
pub mod gradient;
pub mod palette;
pub mod pipeline;
pub mod registry;
pub mod ripple;
pub mod tilt;
pub mod tracker;
pub mod variant;

#[cfg(test)]
mod tests;

pub use card::{CardFeatures, CardFrame, TiltCard};
pub use composer::{
    ComposedCard, ContentPlane, LayerComposer, LayerPaint, RenderedDot, RenderedLayer,
    CONTENT_DEPTH,
};
pub use config::{RegistryConfig, TiltSettings, VariantOverride};
pub use entrance::{Entrance, EntranceDirection, EntranceState};
pub use floating::{FloatingField, FloatingSample, Parallax};
pub use gradient::GradientClasses;
pub use palette::{ThemeColor, ThemePalette};
pub use pipeline::{TiltConfig, TiltPipeline};
pub use registry::{CardVariantRegistry, BUILTIN_VARIANTS, DEFAULT_VARIANT};
pub use ripple::{RippleFrame, RippleId, RippleSet};
pub use tilt::{project, TiltAngles, TiltProjector};
pub use tracker::{PointerSample, PointerTracker};
pub use variant::{CardSize, CardVariant, HoloIntensity, HoverLift, LayerKind};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::card::{CardFeatures, CardFrame, TiltCard};
    pub use crate::composer::{ComposedCard, LayerPaint, RenderedLayer};
    pub use crate::entrance::EntranceDirection;
    pub use crate::pipeline::TiltConfig;
    pub use crate::registry::CardVariantRegistry;
    pub use crate::tilt::TiltAngles;
    pub use crate::variant::{CardVariant, LayerKind};

    // Core types
    pub use tiltfx_core::{Point, PointerEvent, Rect, Size, Transform3D};
}
