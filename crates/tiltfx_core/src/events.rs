//! Pointer events
//!
//! The card pipeline only cares about the pointer entering, moving over, clicking
//! and leaving a tracked surface. Coordinates are client (viewport) pixels.

use crate::geometry::Point;

/// Pointer input routed to a card
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the tracked surface
    Enter { client: Point },
    /// Pointer moved over the tracked surface
    Move { client: Point },
    /// Pointer was pressed and released over the surface
    Click { client: Point },
    /// Pointer left the tracked surface
    Leave,
}

impl PointerEvent {
    /// Client position carried by the event, if any
    pub fn client(&self) -> Option<Point> {
        match self {
            PointerEvent::Enter { client }
            | PointerEvent::Move { client }
            | PointerEvent::Click { client } => Some(*client),
            PointerEvent::Leave => None,
        }
    }

    /// Whether the pointer is inside the surface after this event
    pub fn is_inside(&self) -> bool {
        !matches!(self, PointerEvent::Leave)
    }
}

/// Pointer hit-testing behavior of a rendered layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerEvents {
    /// Normal hit testing
    #[default]
    Auto,
    /// Transparent to input (decorative layers)
    None,
}

impl PointerEvents {
    pub fn to_css(self) -> &'static str {
        match self {
            PointerEvents::Auto => "auto",
            PointerEvents::None => "none",
        }
    }
}
