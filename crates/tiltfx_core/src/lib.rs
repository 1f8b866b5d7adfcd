//! tiltfx Core
//!
//! Foundational types shared by the tiltfx crates:
//!
//! - **Geometry**: points, sizes and rects in CSS pixel space
//! - **Color**: RGBA colors, two-stop gradients and glow shadows
//! - **Transforms**: the 3D card transform (perspective, tilt, lift, scale)
//! - **Events**: pointer events fed into the card pipeline
//! - **Errors**: the `TiltError` type used by every fallible surface
//!
//! # Example
//!
//! ```rust
//! use tiltfx_core::{Point, Rect, Transform3D};
//!
//! let card = Rect::new(0.0, 0.0, 240.0, 160.0);
//! assert_eq!(card.center(), Point::new(120.0, 80.0));
//!
//! let transform = Transform3D::tilt(6.0, -3.0).with_perspective(1000.0);
//! assert_eq!(
//!     transform.to_css(),
//!     "perspective(1000px) rotateX(6deg) rotateY(-3deg)"
//! );
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod geometry;
pub mod transform;

pub use color::{Color, Gradient, GradientDirection, GradientStop, Shadow};
pub use error::{Result, TiltError};
pub use events::{PointerEvent, PointerEvents};
pub use geometry::{Point, Rect, Size, Vec3};
pub use transform::Transform3D;
